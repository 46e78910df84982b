use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{SessionRecord, TokenStore};
use crate::entities::{TokenKind, TokenPair, User};
use crate::error::StoreError;

/// Process-local store; the whole record sits behind one lock.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    record: Mutex<SessionRecord>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: SessionRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    /// Copy of the current record.
    pub fn record(&self) -> SessionRecord {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError> {
        Ok(self.lock().token(kind).map(str::to_string))
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), StoreError> {
        self.lock().set_token(kind, token);
        Ok(())
    }

    fn user(&self) -> Result<Option<User>, StoreError> {
        self.lock().user()
    }

    fn set_user(&self, user: &User) -> Result<(), StoreError> {
        self.lock().set_user(user)
    }

    fn set_session(&self, pair: &TokenPair, user: &User) -> Result<(), StoreError> {
        self.lock().set_session(pair, user)
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = SessionRecord::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn alice() -> User {
        User {
            id: "1".into(),
            username: "alice".into(),
            display_name: "Alice".into(),
            avatar: Some("https://img.example/a.png".into()),
            is_admin: true,
            is_online: Some(true),
            last_seen: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single(),
            created_at: None,
        }
    }

    #[test]
    fn user_round_trip_is_field_equal() {
        let store = MemoryTokenStore::new();
        store.set_user(&alice()).unwrap();
        assert_eq!(store.user().unwrap(), Some(alice()));
    }

    #[test]
    fn session_is_stored_whole() {
        let store = MemoryTokenStore::new();
        let pair = TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
        };

        store.set_session(&pair, &alice()).unwrap();

        let record = store.record();
        assert_eq!(record.token(TokenKind::Access), Some("a"));
        assert_eq!(record.token(TokenKind::Refresh), Some("r"));
        assert_eq!(record.user().unwrap(), Some(alice()));
    }

    #[test]
    fn clear_drops_everything() {
        let store = MemoryTokenStore::new();
        store.set(TokenKind::Access, "a").unwrap();
        store.set(TokenKind::Refresh, "r").unwrap();
        store.set_user(&alice()).unwrap();

        store.clear().unwrap();
        assert_eq!(store.record(), SessionRecord::default());

        store.clear().unwrap();
        assert_eq!(store.record(), SessionRecord::default());
    }
}
