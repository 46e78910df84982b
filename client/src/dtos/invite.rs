use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Invite;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvitesResponse {
    #[serde(default)]
    pub invites: Vec<Invite>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub max_uses: i64,
    pub days_valid: i64,
}

/// A freshly created invite; the server does not echo the creator back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvite {
    #[serde(deserialize_with = "crate::entities::wire::string_or_number")]
    pub id: String,
    pub token: String,
    #[serde(default, deserialize_with = "crate::entities::wire::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "crate::entities::wire::timestamp")]
    pub expires_at: DateTime<Utc>,
    pub max_uses: i64,
    #[serde(default)]
    pub used_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInviteResponse {
    pub invite: CreatedInvite,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeInviteRequest<'a> {
    pub invite_id: &'a str,
}
