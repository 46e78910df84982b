use std::ops::Deref;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, instrument};

use super::Resource;
use crate::api::ApiClient;
use crate::entities::Message;
use crate::error::ApiError;

/// Messages of the active chat. Switching chat reloads from the server;
/// nothing is kept for the chat left behind.
pub struct MessagesResource {
    resource: Resource<Message>,
    active: Mutex<Option<String>>,
}

impl MessagesResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new("messages", api),
            active: Mutex::new(None),
        }
    }

    pub fn active_chat(&self) -> Option<String> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the active chat and load its messages. Selecting the chat
    /// already active does nothing. Any change empties the cache first.
    #[instrument(skip(self))]
    pub async fn select_chat(&self, chat_id: Option<String>) -> Result<(), ApiError> {
        let (ticket, chat_id) = {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            if *active == chat_id {
                return Ok(());
            }
            *active = chat_id.clone();
            self.resource.clear();
            match chat_id {
                Some(chat_id) => (self.resource.begin(), chat_id),
                None => {
                    self.resource.invalidate();
                    return Ok(());
                }
            }
        };
        self.resource
            .run(ticket, |api| async move { api.messages(&chat_id).await })
            .await
    }

    /// Reload the active chat. No-op without one.
    pub async fn refetch(&self) -> Result<(), ApiError> {
        let (ticket, chat_id) = {
            let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            match active.clone() {
                Some(chat_id) => (self.resource.begin(), chat_id),
                None => return Ok(()),
            }
        };
        self.resource
            .run(ticket, |api| async move { api.messages(&chat_id).await })
            .await
    }

    /// Send to the active chat. The cache only grows once the server has
    /// returned the stored message.
    #[instrument(skip(self, body))]
    pub async fn send(&self, body: &str) -> Result<Message, ApiError> {
        let chat_id = self.active_chat().ok_or(ApiError::NoActiveChat)?;
        let api = self.resource.api();
        let epoch = api.auth_epoch();

        let message = api.send_message(&chat_id, body).await?;

        let still_active = self.active_chat().as_deref() == Some(chat_id.as_str());
        if still_active && api.auth_epoch() == epoch {
            self.resource.push(message.clone());
        } else {
            debug!(chat_id = %chat_id, message_id = %message.id, "chat changed before send completed");
        }
        Ok(message)
    }
}

impl Deref for MessagesResource {
    type Target = Resource<Message>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
