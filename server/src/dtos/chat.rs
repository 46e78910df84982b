//! Chat DTOs - Data Transfer Objects per chat

use super::{IdParam, MessageDTO, UserDTO};
use crate::entities::{Chat, ChatType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat come la vede il client: partecipanti, ultimo messaggio e contatore non letti
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatDTO {
    pub id: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub participants: Vec<UserDTO>,
    pub last_message: Option<MessageDTO>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ChatDTO {
    pub fn assemble(
        chat: Chat,
        participants: Vec<UserDTO>,
        last_message: Option<MessageDTO>,
        unread_count: i64,
    ) -> Self {
        Self {
            id: chat.id.to_string(),
            chat_type: chat.chat_type,
            participants,
            last_message,
            unread_count,
            created_at: chat.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatsResponseDTO {
    pub chats: Vec<ChatDTO>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedChatDTO {
    pub chat_id: String,
}

/// Body delle POST su /chats, il campo `action` seleziona l'operazione
#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChatActionDTO {
    CreateChat {
        #[serde(rename = "userId", default)]
        user_id: Option<IdParam>,
    },
    SendMessage {
        #[serde(rename = "chatId", default)]
        chat_id: Option<IdParam>,
        #[serde(default)]
        body: String,
    },
}
