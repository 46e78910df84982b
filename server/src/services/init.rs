//! Init services - Stato di inizializzazione e invito di bootstrap

use super::invite::generate_invite_token;
use crate::core::{AppError, AppState};
use crate::dtos::{BootstrapInviteDTO, BootstrapResponseDTO, CreateInviteDTO, InitStatusDTO};
use crate::repositories::Create;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Validità dell'invito di bootstrap
const BOOTSTRAP_INVITE_DAYS: i64 = 30;

#[instrument(skip(state))]
pub async fn init_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InitStatusDTO>, AppError> {
    let user_count = state.user.count().await?;
    Ok(Json(InitStatusDTO {
        initialized: user_count > 0,
        user_count,
    }))
}

/// Crea l'invito monouso che permette di registrare il primo utente (admin)
#[instrument(skip(state))]
pub async fn bootstrap(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<BootstrapResponseDTO>), AppError> {
    if state.user.count().await? > 0 {
        warn!("Bootstrap requested on an initialized system");
        return Err(AppError::bad_request("System is already initialized"));
    }

    let now = Utc::now();
    let invite = state
        .invite
        .create(&CreateInviteDTO {
            token: generate_invite_token(),
            created_by_user_id: None,
            created_at: now,
            expires_at: now + Duration::days(BOOTSTRAP_INVITE_DAYS),
            max_uses: 1,
        })
        .await?;
    info!("Bootstrap invite {} created", invite.id);

    Ok((
        StatusCode::CREATED,
        Json(BootstrapResponseDTO {
            invite: BootstrapInviteDTO {
                id: invite.id.to_string(),
                invite_url: format!("/auth?invite={}", invite.token),
                token: invite.token,
                expires_at: invite.expires_at,
            },
        }),
    ))
}
