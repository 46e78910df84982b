//! Message entity - Entità messaggio

use super::enums::MessageStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    // valorizzato quando il destinatario apre la chat
    pub read_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn status(&self) -> MessageStatus {
        if self.read_at.is_some() {
            MessageStatus::Read
        } else {
            MessageStatus::Sent
        }
    }
}
