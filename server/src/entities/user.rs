//! User entity - Entità utente con metodi per gestione password

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Un utente è considerato online se visto negli ultimi 5 minuti
pub const ONLINE_WINDOW_MINUTES: i64 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password_hash).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }

    pub fn is_online_at(&self, now: DateTime<Utc>) -> bool {
        self.last_seen
            .is_some_and(|seen| seen > now - Duration::minutes(ONLINE_WINDOW_MINUTES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(last_seen: Option<DateTime<Utc>>) -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            display_name: "Alice".to_string(),
            password_hash: User::hash_password("secret").expect("hash"),
            is_admin: false,
            created_at: Utc::now(),
            last_seen,
        }
    }

    #[test]
    fn password_roundtrip() {
        let u = user(None);
        assert!(u.verify_password("secret"));
        assert!(!u.verify_password("other"));
    }

    #[test]
    fn online_window() {
        let now = Utc::now();
        assert!(user(Some(now - Duration::minutes(1))).is_online_at(now));
        assert!(!user(Some(now - Duration::minutes(6))).is_online_at(now));
        assert!(!user(None).is_online_at(now));
    }
}
