//! Client-side copies of the server's records.

pub mod chat;
pub mod invite;
pub mod message;
pub mod token;
pub mod user;
pub mod wire;

pub use chat::{Chat, ChatType};
pub use invite::{ExpiryLabel, Invite, InviteStatus, invite_url};
pub use message::{Message, MessageStatus};
pub use token::{TokenKind, TokenPair};
pub use user::User;
