//! Invite DTOs - Data Transfer Objects per inviti

use super::{IdParam, UserDTO};
use crate::entities::Invite;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invito in lista, con il creatore
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InviteDTO {
    pub id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i64,
    pub used_count: i64,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_by: UserDTO,
}

impl InviteDTO {
    pub fn with_creator(invite: Invite, created_by: UserDTO) -> Self {
        Self {
            id: invite.id.to_string(),
            token: invite.token,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
            max_uses: invite.max_uses,
            used_count: invite.used_count,
            revoked_at: invite.revoked_at,
            created_by,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InvitesResponseDTO {
    pub invites: Vec<InviteDTO>,
}

/// Invito appena creato (il creatore è il chiamante)
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInviteDTO {
    pub id: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i64,
    pub used_count: i64,
}

impl From<Invite> for CreatedInviteDTO {
    fn from(value: Invite) -> Self {
        Self {
            id: value.id.to_string(),
            token: value.token,
            created_at: value.created_at,
            expires_at: value.expires_at,
            max_uses: value.max_uses,
            used_count: value.used_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatedInviteResponseDTO {
    pub invite: CreatedInviteDTO,
}

fn default_max_uses() -> i64 {
    1
}

fn default_days_valid() -> i64 {
    7
}

/// Body di POST /invites
#[derive(Serialize, Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequestDTO {
    #[serde(default = "default_max_uses")]
    #[validate(range(min = 1, message = "maxUses must be greater than 0"))]
    pub max_uses: i64,

    #[serde(default = "default_days_valid")]
    #[validate(range(min = 1, max = 3650, message = "daysValid must be between 1 and 3650"))]
    pub days_valid: i64,
}

/// Body di DELETE /invites
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RevokeInviteDTO {
    #[serde(default)]
    pub invite_id: Option<IdParam>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SuccessDTO {
    pub success: bool,
}

/// DTO per creare un nuovo invito (senza id, used_count e revoked_at)
#[derive(Debug, Clone)]
pub struct CreateInviteDTO {
    pub token: String,
    pub created_by_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i64,
}
