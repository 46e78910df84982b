//! Chat entity - Entità chat

use super::enums::ChatType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Chat {
    pub id: i64,
    pub chat_type: ChatType,
    pub created_at: DateTime<Utc>,
}
