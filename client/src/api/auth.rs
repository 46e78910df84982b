use tracing::{info, instrument};

use super::{ApiClient, ApiRequest};
use crate::config::Endpoint;
use crate::dtos::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};
use crate::entities::User;
use crate::error::ApiError;

impl ApiClient {
    /// Sign in and persist the returned tokens and user.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let req = ApiRequest::post(Endpoint::Auth).json(&LoginRequest { username, password })?;
        let auth: AuthResponse = self.request(req).await?;
        self.persist_auth(&auth)?;
        info!(user_id = %auth.user.id, "signed in");
        Ok(auth)
    }

    /// Register with an invite token and persist the returned session.
    #[instrument(skip(self, password, invite_token))]
    pub async fn register(
        &self,
        username: &str,
        display_name: &str,
        password: &str,
        invite_token: &str,
    ) -> Result<AuthResponse, ApiError> {
        let req = ApiRequest::post(Endpoint::Auth).json(&RegisterRequest {
            username,
            display_name,
            password,
            invite_token,
        })?;
        let auth: AuthResponse = self.request(req).await?;
        self.persist_auth(&auth)?;
        info!(user_id = %auth.user.id, "registered");
        Ok(auth)
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let res: CurrentUserResponse = self.request(ApiRequest::get(Endpoint::Auth)).await?;
        Ok(res.user)
    }
}
