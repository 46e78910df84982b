//! Request and response bodies exchanged with the remote endpoints.
//!
//! POST bodies carry an `action` tag that selects the operation on the
//! endpoint. Missing collection fields decode as empty.

pub mod auth;
pub mod chat;
pub mod init;
pub mod invite;
pub mod user;

pub use auth::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};
pub use chat::{
    ChatsResponse, CreateChatRequest, CreateChatResponse, MessagesResponse, SendMessageRequest,
    SendMessageResponse,
};
pub use init::{BootstrapInvite, BootstrapResponse, InitStatus};
pub use invite::{
    CreateInviteRequest, CreateInviteResponse, CreatedInvite, InvitesResponse, RevokeInviteRequest,
};
pub use user::UsersResponse;
