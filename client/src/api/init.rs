use super::{ApiClient, ApiRequest};
use crate::config::Endpoint;
use crate::dtos::{BootstrapInvite, BootstrapResponse, InitStatus};
use crate::entities::invite_url;
use crate::error::ApiError;

impl ApiClient {
    /// Whether the deployment already has users. Sent without credentials.
    pub async fn check_init(&self) -> Result<InitStatus, ApiError> {
        self.request(ApiRequest::get(Endpoint::Init).anonymous()).await
    }

    /// Ask for the one-off invite that registers the first administrator.
    pub async fn bootstrap(&self) -> Result<BootstrapInvite, ApiError> {
        let res: BootstrapResponse = self
            .request(ApiRequest::post(Endpoint::Init).anonymous())
            .await?;
        Ok(res.invite)
    }

    /// `<origin>/auth?invite=<token>` for this deployment.
    pub fn invite_link(&self, token: &str) -> String {
        invite_url(&self.config().origin, token)
    }
}
