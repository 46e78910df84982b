use super::{ApiClient, ApiRequest};
use crate::config::Endpoint;
use crate::dtos::{
    ChatsResponse, CreateChatRequest, CreateChatResponse, MessagesResponse, SendMessageRequest,
    SendMessageResponse,
};
use crate::entities::{Chat, Message};
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        let req = ApiRequest::get(Endpoint::Chats).query("action", "list_chats");
        let res: ChatsResponse = self.request(req).await?;
        Ok(res.chats)
    }

    pub async fn messages(&self, chat_id: &str) -> Result<Vec<Message>, ApiError> {
        let req = ApiRequest::get(Endpoint::Chats)
            .query("action", "messages")
            .query("chatId", chat_id);
        let res: MessagesResponse = self.request(req).await?;
        Ok(res.messages)
    }

    /// Open (or find) the direct chat with `user_id`; returns the chat id.
    pub async fn create_chat(&self, user_id: &str) -> Result<String, ApiError> {
        let req = ApiRequest::post(Endpoint::Chats).json(&CreateChatRequest { user_id })?;
        let res: CreateChatResponse = self.request(req).await?;
        Ok(res.chat_id)
    }

    pub async fn send_message(&self, chat_id: &str, body: &str) -> Result<Message, ApiError> {
        let req = ApiRequest::post(Endpoint::Chats).json(&SendMessageRequest { chat_id, body })?;
        let res: SendMessageResponse = self.request(req).await?;
        Ok(res.message)
    }
}
