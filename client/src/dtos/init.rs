use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitStatus {
    pub initialized: bool,
    #[serde(default)]
    pub user_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapInvite {
    #[serde(default, deserialize_with = "crate::entities::wire::optional_string_or_number")]
    pub id: Option<String>,
    pub token: String,
    #[serde(default, deserialize_with = "crate::entities::wire::optional_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub invite_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapResponse {
    pub invite: BootstrapInvite,
}
