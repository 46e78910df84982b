//! Auth services - Registrazione con invito, login e utente corrente

use crate::core::{AppError, AppState, auth::authenticate, issue_tokens};
use crate::dtos::{
    AuthActionDTO, AuthResponseDTO, CreateUserDTO, CurrentUserDTO, LoginDTO, RegisterDTO, UserDTO,
};
use crate::entities::User;
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// GET /auth - ritorna l'utente associato all'access token
#[instrument(skip(state, headers))]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CurrentUserDTO>, AppError> {
    let user = authenticate(&state, &headers).await?;
    debug!("Current user resolved: {}", user.username);
    Ok(Json(CurrentUserDTO {
        user: UserDTO::from(user),
    }))
}

/// POST /auth - il campo `action` del body sceglie tra register e login
pub async fn auth_action(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AuthActionDTO>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponseDTO>), AppError> {
    let Json(action) = payload?;
    match action {
        AuthActionDTO::Register(body) => register_user(&state, body).await,
        AuthActionDTO::Login(body) => login_user(&state, body).await,
    }
}

#[instrument(skip(state, body), fields(username = %body.username.trim()))]
async fn register_user(
    state: &AppState,
    body: RegisterDTO,
) -> Result<(StatusCode, Json<AuthResponseDTO>), AppError> {
    // 1. Normalizzare i campi (trim, username in minuscolo) e verificare che siano presenti
    // 2. Verificare che l'invito esista e sia ancora spendibile
    // 3. Validare il formato dei campi e l'unicità dello username
    // 4. Creare l'utente consumando l'invito nella stessa transazione
    // 5. Emettere la coppia di token
    let body = body.normalized();

    if !body.has_required_fields() {
        return Err(AppError::bad_request("All fields are required"));
    }

    if body.invite_token.is_empty() {
        warn!("Registration attempt without invite");
        return Err(AppError::forbidden("Invite token is required"));
    }

    let now = Utc::now();
    let invite = state
        .invite
        .find_by_token(&body.invite_token)
        .await?
        .ok_or_else(|| {
            warn!("Registration attempt with unknown invite");
            AppError::forbidden("Invite is not valid")
        })?;

    invite.check_usable(now).map_err(|rejection| {
        warn!("Invite {} rejected: {:?}", invite.id, rejection);
        AppError::forbidden(rejection.message())
    })?;

    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        return Err(AppError::bad_request("Username is already taken"));
    }

    let password_hash = User::hash_password(&body.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let new_user = CreateUserDTO {
        username: body.username,
        display_name: body.display_name,
        password_hash,
        created_at: now,
    };

    // None: l'invito è stato esaurito o revocato tra il controllo e la scrittura
    let user = state
        .user
        .create_with_invite(&new_user, &invite.id)
        .await?
        .ok_or_else(|| AppError::forbidden("Invite has already been used"))?;

    let (access_token, refresh_token) = issue_tokens(state, user.id)?;
    info!("User {} registered (admin: {})", user.id, user.is_admin);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDTO {
            user: UserDTO::at(user, now),
            access_token,
            refresh_token,
        }),
    ))
}

#[instrument(skip(state, body), fields(username = %body.username.trim()))]
async fn login_user(
    state: &AppState,
    body: LoginDTO,
) -> Result<(StatusCode, Json<AuthResponseDTO>), AppError> {
    let body = body.normalized();

    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::bad_request("All fields are required"));
    }

    let mut user = match state.user.find_by_username(&body.username).await? {
        Some(user) => user,
        None => return Err(AppError::unauthorized("Invalid username or password")),
    };

    if !user.verify_password(&body.password) {
        warn!("Wrong password for user {}", user.id);
        return Err(AppError::unauthorized("Invalid username or password"));
    }

    let now = Utc::now();
    state.user.touch_last_seen(&user.id, now).await?;
    user.last_seen = Some(now);

    let (access_token, refresh_token) = issue_tokens(state, user.id)?;
    info!("User {} logged in", user.id);

    Ok((
        StatusCode::OK,
        Json(AuthResponseDTO {
            user: UserDTO::at(user, now),
            access_token,
            refresh_token,
        }),
    ))
}
