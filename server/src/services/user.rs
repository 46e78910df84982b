//! User services - Elenco degli utenti registrati

use crate::core::{AppError, AppState};
use crate::dtos::{UserDTO, UsersResponseDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<UsersResponseDTO>, AppError> {
    let now = Utc::now();
    let users: Vec<UserDTO> = state
        .user
        .list_by_display_name()
        .await?
        .into_iter()
        .map(|user| UserDTO::at(user, now))
        .collect();

    debug!("Listing {} users", users.len());
    Ok(Json(UsersResponseDTO { users }))
}
