//! Server library - espone i moduli principali per i test e per il client

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, auth, config, db};
pub use services::root;

use axum::{
    Router, middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Crea il router principale dell'applicazione.
///
/// Ogni risorsa ha un unico URL; il metodo HTTP e il campo `action`
/// selezionano l'operazione, i metodi non previsti rispondono 405.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(configure_public_routes())
        .merge(configure_protected_routes(state.clone()))
        .layer(cors)
        .with_state(state)
}

/// Rotte accessibili senza token: /auth gestisce da sé il GET autenticato
fn configure_public_routes() -> Router<Arc<AppState>> {
    use core::method_not_allowed;
    use services::*;

    Router::new()
        .route(
            "/auth",
            get(current_user)
                .post(auth_action)
                .fallback(method_not_allowed),
        )
        .route(
            "/init",
            get(init_status).post(bootstrap).fallback(method_not_allowed),
        )
}

/// Rotte che richiedono un access token valido
fn configure_protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::{authentication_middleware, method_not_allowed};
    use services::*;

    Router::new()
        .route(
            "/chats",
            get(chats_get).post(chats_post).fallback(method_not_allowed),
        )
        .route(
            "/invites",
            get(list_invites)
                .post(create_invite)
                .delete(revoke_invite)
                .fallback(method_not_allowed),
        )
        .route("/users", get(list_users).fallback(method_not_allowed))
        .route_layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

