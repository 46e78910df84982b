use std::ops::Deref;

use tracing::{instrument, warn};

use super::Resource;
use crate::api::ApiClient;
use crate::entities::Chat;
use crate::error::ApiError;

/// Chats of the signed-in user.
pub struct ChatsResource {
    resource: Resource<Chat>,
}

impl ChatsResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new("chats", api),
        }
    }

    pub async fn refetch(&self) -> Result<(), ApiError> {
        self.resource
            .refetch_with(|api| async move { api.list_chats().await })
            .await
    }

    /// Open the direct chat with `user_id` and reload the list. Returns the
    /// chat id; a failed reload only shows up in the resource state.
    #[instrument(skip(self))]
    pub async fn open_direct(&self, user_id: &str) -> Result<String, ApiError> {
        let chat_id = self.resource.api().create_chat(user_id).await?;
        if let Err(e) = self.refetch().await {
            warn!(chat_id = %chat_id, "chat list reload failed: {e}");
        }
        Ok(chat_id)
    }
}

impl Deref for ChatsResource {
    type Target = Resource<Chat>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
