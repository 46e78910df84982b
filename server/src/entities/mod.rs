//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod chat;
pub mod enums;
pub mod invite;
pub mod message;
pub mod user;

// Re-exports per facilitare l'import
pub use chat::Chat;
pub use enums::{ChatType, MessageStatus, TokenKind};
pub use invite::{Invite, InviteRejection};
pub use message::Message;
pub use user::User;
