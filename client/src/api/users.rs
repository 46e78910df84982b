use super::{ApiClient, ApiRequest};
use crate::config::Endpoint;
use crate::dtos::UsersResponse;
use crate::entities::User;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let res: UsersResponse = self.request(ApiRequest::get(Endpoint::Users)).await?;
        Ok(res.users)
    }
}
