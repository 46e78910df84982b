//! Invites and their derived status.
//!
//! Status is a pure function of the record and the current instant; it is
//! computed on every read and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    #[serde(deserialize_with = "super::wire::string_or_number")]
    pub id: String,
    pub token: String,
    pub created_by: User,
    #[serde(deserialize_with = "super::wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "super::wire::timestamp")]
    pub expires_at: DateTime<Utc>,
    pub max_uses: i64,
    pub used_count: i64,
    #[serde(default, deserialize_with = "super::wire::optional_timestamp")]
    pub revoked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteStatus {
    Active,
    Expired,
    UsedUp,
    Revoked,
}

/// Human-facing expiry bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryLabel {
    Expired,
    Today,
    Tomorrow,
    InDays(i64),
}

impl Invite {
    /// `now < expires_at ∧ used_count < max_uses ∧ revoked_at is None`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at && self.used_count < self.max_uses && self.revoked_at.is_none()
    }

    /// Revoked wins over Expired, which wins over UsedUp.
    pub fn status_at(&self, now: DateTime<Utc>) -> InviteStatus {
        if self.revoked_at.is_some() {
            InviteStatus::Revoked
        } else if now >= self.expires_at {
            InviteStatus::Expired
        } else if self.used_count >= self.max_uses {
            InviteStatus::UsedUp
        } else {
            InviteStatus::Active
        }
    }

    /// Remaining days rounded up; a negative count means expired.
    pub fn expiry_label(&self, now: DateTime<Utc>) -> ExpiryLabel {
        let remaining = (self.expires_at - now).num_milliseconds() as f64;
        let days = (remaining / MILLIS_PER_DAY).ceil() as i64;
        match days {
            d if d < 0 => ExpiryLabel::Expired,
            0 => ExpiryLabel::Today,
            1 => ExpiryLabel::Tomorrow,
            d => ExpiryLabel::InDays(d),
        }
    }
}

/// Registration link for an invite token.
pub fn invite_url(origin: &str, token: &str) -> String {
    format!("{}/auth?invite={}", origin.trim_end_matches('/'), token)
}
