//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione e JWT
//! - Configurazione
//! - Database
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, authentication_middleware, decode_jwt, encode_jwt, issue_tokens, require_admin};
pub use config::Config;
pub use error::{AppError, method_not_allowed};
pub use state::AppState;
