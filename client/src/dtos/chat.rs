use serde::{Deserialize, Serialize};

use crate::entities::{Chat, Message};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatsResponse {
    #[serde(default)]
    pub chats: Vec<Chat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename = "create_chat", rename_all = "camelCase")]
pub struct CreateChatRequest<'a> {
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatResponse {
    #[serde(deserialize_with = "crate::entities::wire::string_or_number")]
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename = "send_message", rename_all = "camelCase")]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub message: Message,
}
