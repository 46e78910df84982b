//! Token Store.
//!
//! Holds the access/refresh pair and the cached current user. Values are
//! stored verbatim: no expiry checks, no encryption. `clear()` drops all
//! three in a single write so no other component can observe a half-cleared
//! session.

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use serde::{Deserialize, Serialize};

use crate::entities::{TokenKind, TokenPair, User};
use crate::error::StoreError;

pub trait TokenStore: Send + Sync {
    fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError>;

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), StoreError>;

    /// Cached user; `Err(StoreError::Corrupt)` when the stored JSON cannot be parsed.
    fn user(&self) -> Result<Option<User>, StoreError>;

    fn set_user(&self, user: &User) -> Result<(), StoreError>;

    /// Tokens and user together, as one write.
    fn set_session(&self, pair: &TokenPair, user: &User) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;

    fn set_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.set(TokenKind::Access, &pair.access_token)?;
        self.set(TokenKind::Refresh, &pair.refresh_token)
    }
}

/// Persisted layout shared by every store. The user is kept as raw JSON
/// text and only parsed on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
}

impl SessionRecord {
    pub fn token(&self, kind: TokenKind) -> Option<&str> {
        match kind {
            TokenKind::Access => self.access_token.as_deref(),
            TokenKind::Refresh => self.refresh_token.as_deref(),
        }
    }

    pub fn set_token(&mut self, kind: TokenKind, token: &str) {
        let slot = match kind {
            TokenKind::Access => &mut self.access_token,
            TokenKind::Refresh => &mut self.refresh_token,
        };
        *slot = Some(token.to_string());
    }

    pub fn user(&self) -> Result<Option<User>, StoreError> {
        self.current_user
            .as_deref()
            .map(|raw| serde_json::from_str(raw).map_err(|e| StoreError::Corrupt(e.to_string())))
            .transpose()
    }

    pub fn set_user(&mut self, user: &User) -> Result<(), StoreError> {
        self.current_user = Some(serde_json::to_string(user)?);
        Ok(())
    }

    pub fn set_session(&mut self, pair: &TokenPair, user: &User) -> Result<(), StoreError> {
        let current_user = serde_json::to_string(user)?;
        self.access_token = Some(pair.access_token.clone());
        self.refresh_token = Some(pair.refresh_token.clone());
        self.current_user = Some(current_user);
        Ok(())
    }
}
