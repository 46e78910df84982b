//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce un endpoint HTTP; il metodo e il campo `action` scelgono l'operazione.

pub mod auth;
pub mod chat;
pub mod init;
pub mod invite;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{auth_action, current_user};
pub use chat::{chats_get, chats_post};
pub use init::{bootstrap, init_status};
pub use invite::{create_invite, list_invites, revoke_invite};
pub use user::list_users;

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
