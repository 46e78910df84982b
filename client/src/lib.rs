//! chatgate client library.
//!
//! Talks to the chatgate endpoints over HTTP/JSON and keeps the session and
//! the cached lists the view layer renders from.

pub mod api;
pub mod config;
pub mod dtos;
pub mod entities;
pub mod error;
pub mod navigation;
pub mod resources;
pub mod session;
pub mod store;

pub use api::{ApiClient, ApiRequest, AuthEvent};
pub use config::{ClientConfig, Endpoint, Endpoints};
pub use error::{ApiError, StoreError};
pub use navigation::{Navigator, Route};
pub use resources::{
    ChatsResource, InvitesResource, MessagesResource, ResourceState, UsersResource,
};
pub use session::{SessionController, SessionState};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Logs go to stderr so command output stays clean.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
