//! Invite entity - Entità invito di registrazione

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Invite {
    pub id: i64,
    pub token: String,
    // NULL solo per l'invito di bootstrap creato da /init
    pub created_by_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i64,
    pub used_count: i64,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Motivo per cui un invito non può essere usato per registrarsi
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteRejection {
    Revoked,
    Expired,
    UsedUp,
}

impl InviteRejection {
    pub fn message(&self) -> &'static str {
        match self {
            InviteRejection::Revoked => "Invite is not valid",
            InviteRejection::Expired => "Invite has expired",
            InviteRejection::UsedUp => "Invite has already been used",
        }
    }
}

impl Invite {
    /// Verifica che l'invito sia ancora spendibile all'istante `now`
    pub fn check_usable(&self, now: DateTime<Utc>) -> Result<(), InviteRejection> {
        if self.revoked_at.is_some() {
            return Err(InviteRejection::Revoked);
        }
        if self.expires_at < now {
            return Err(InviteRejection::Expired);
        }
        if self.used_count >= self.max_uses {
            return Err(InviteRejection::UsedUp);
        }
        Ok(())
    }
}
