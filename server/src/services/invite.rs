//! Invite services - Gestione inviti riservata agli amministratori

use crate::core::{AppError, AppState, require_admin};
use crate::dtos::{
    CreateInviteDTO, CreateInviteRequestDTO, CreatedInviteResponseDTO, InviteDTO,
    InvitesResponseDTO, RevokeInviteDTO, SuccessDTO, UserDTO,
};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Lunghezza del token di invito
pub const INVITE_TOKEN_LEN: usize = 22;

/// Token casuale URL-safe per un nuovo invito
pub fn generate_invite_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_invites(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<InvitesResponseDTO>, AppError> {
    require_admin(&current_user)?;

    let now = Utc::now();
    let invites = state
        .invite
        .find_many_with_creator()
        .await?
        .into_iter()
        .map(|row| {
            let (invite, creator) = row.into_parts();
            InviteDTO::with_creator(invite, UserDTO::at(creator, now))
        })
        .collect();

    Ok(Json(InvitesResponseDTO { invites }))
}

#[instrument(skip(state, current_user, payload), fields(user_id = %current_user.id))]
pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    payload: Result<Json<CreateInviteRequestDTO>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedInviteResponseDTO>), AppError> {
    require_admin(&current_user)?;
    let Json(body) = payload?;
    body.validate()?;

    let now = Utc::now();
    let invite = state
        .invite
        .create(&CreateInviteDTO {
            token: generate_invite_token(),
            created_by_user_id: Some(current_user.id),
            created_at: now,
            expires_at: now + Duration::days(body.days_valid),
            max_uses: body.max_uses,
        })
        .await?;
    info!(
        "Invite {} created ({} uses, {} days)",
        invite.id, body.max_uses, body.days_valid
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedInviteResponseDTO {
            invite: invite.into(),
        }),
    ))
}

#[instrument(skip(state, current_user, payload), fields(user_id = %current_user.id))]
pub async fn revoke_invite(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    payload: Result<Json<RevokeInviteDTO>, JsonRejection>,
) -> Result<Json<SuccessDTO>, AppError> {
    require_admin(&current_user)?;
    let Json(body) = payload?;

    let invite_id = body
        .invite_id
        .as_ref()
        .and_then(|id| id.parse())
        .ok_or_else(|| AppError::bad_request("inviteId is required"))?;

    if !state.invite.revoke(&invite_id, Utc::now()).await? {
        warn!("Invite {} not found or already revoked", invite_id);
        return Err(AppError::not_found("Invite not found or already revoked"));
    }
    info!("Invite {} revoked", invite_id);

    Ok(Json(SuccessDTO { success: true }))
}
