//! Init DTOs - Bootstrap del primo amministratore

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InitStatusDTO {
    pub initialized: bool,
    pub user_count: i64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapInviteDTO {
    pub id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Percorso relativo, il client ci antepone la propria origin
    pub invite_url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BootstrapResponseDTO {
    pub invite: BootstrapInviteDTO,
}
