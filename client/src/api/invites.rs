use serde_json::Value;

use super::{ApiClient, ApiRequest};
use crate::config::Endpoint;
use crate::dtos::{
    CreateInviteRequest, CreateInviteResponse, CreatedInvite, InvitesResponse, RevokeInviteRequest,
};
use crate::entities::Invite;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_invites(&self) -> Result<Vec<Invite>, ApiError> {
        let res: InvitesResponse = self.request(ApiRequest::get(Endpoint::Invites)).await?;
        Ok(res.invites)
    }

    pub async fn create_invite(
        &self,
        max_uses: i64,
        days_valid: i64,
    ) -> Result<CreatedInvite, ApiError> {
        let req = ApiRequest::post(Endpoint::Invites).json(&CreateInviteRequest {
            max_uses,
            days_valid,
        })?;
        let res: CreateInviteResponse = self.request(req).await?;
        Ok(res.invite)
    }

    pub async fn revoke_invite(&self, invite_id: &str) -> Result<(), ApiError> {
        let req = ApiRequest::delete(Endpoint::Invites).json(&RevokeInviteRequest { invite_id })?;
        // il corpo della risposta non porta informazioni utili
        let _: Value = self.request(req).await?;
        Ok(())
    }
}
