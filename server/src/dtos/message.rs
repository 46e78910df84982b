//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::{Message, MessageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub status: MessageStatus,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            status: value.status(),
            id: value.id.to_string(),
            chat_id: value.chat_id.to_string(),
            sender_id: value.sender_id.to_string(),
            body: value.body,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessagesResponseDTO {
    pub messages: Vec<MessageDTO>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SentMessageDTO {
    pub message: MessageDTO,
}

/// DTO per creare un nuovo messaggio (senza id)
#[derive(Debug, Clone)]
pub struct CreateMessageDTO {
    pub chat_id: i64,
    pub sender_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
