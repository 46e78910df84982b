use std::ops::Deref;

use super::Resource;
use crate::api::ApiClient;
use crate::entities::User;
use crate::error::ApiError;

pub struct UsersResource {
    resource: Resource<User>,
}

impl UsersResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new("users", api),
        }
    }

    pub async fn refetch(&self) -> Result<(), ApiError> {
        self.resource
            .refetch_with(|api| async move { api.list_users().await })
            .await
    }
}

impl Deref for UsersResource {
    type Target = Resource<User>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
