//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API, camelCase con id stringa)
//! dalla rappresentazione interna (entities).

pub mod auth;
pub mod chat;
pub mod init;
pub mod invite;
pub mod message;
pub mod query;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{AuthActionDTO, AuthResponseDTO, CurrentUserDTO, LoginDTO, RegisterDTO};
pub use chat::{ChatActionDTO, ChatDTO, ChatsResponseDTO, CreatedChatDTO};
pub use init::{BootstrapInviteDTO, BootstrapResponseDTO, InitStatusDTO};
pub use invite::{
    CreateInviteDTO, CreateInviteRequestDTO, CreatedInviteDTO, CreatedInviteResponseDTO,
    InviteDTO, InvitesResponseDTO, RevokeInviteDTO, SuccessDTO,
};
pub use message::{CreateMessageDTO, MessageDTO, MessagesResponseDTO, SentMessageDTO};
pub use query::{ChatsQuery, IdParam};
pub use user::{CreateUserDTO, UserDTO, UsersResponseDTO};
