use std::ops::Deref;

use tracing::{info, instrument, warn};

use super::Resource;
use crate::api::ApiClient;
use crate::dtos::CreatedInvite;
use crate::entities::Invite;
use crate::error::ApiError;

/// Admin view of the invites. Mutations reload the whole list; a failed
/// reload is kept in the resource state and does not fail the mutation.
pub struct InvitesResource {
    resource: Resource<Invite>,
}

impl InvitesResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new("invites", api),
        }
    }

    pub async fn refetch(&self) -> Result<(), ApiError> {
        self.resource
            .refetch_with(|api| async move { api.list_invites().await })
            .await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, max_uses: i64, days_valid: i64) -> Result<CreatedInvite, ApiError> {
        let invite = self
            .resource
            .api()
            .create_invite(max_uses, days_valid)
            .await?;
        info!(invite_id = %invite.id, "invite created");
        self.reload_after_change().await;
        Ok(invite)
    }

    #[instrument(skip(self))]
    pub async fn revoke(&self, invite_id: &str) -> Result<(), ApiError> {
        self.resource.api().revoke_invite(invite_id).await?;
        info!(invite_id, "invite revoked");
        self.reload_after_change().await;
        Ok(())
    }

    async fn reload_after_change(&self) {
        if let Err(e) = self.refetch().await {
            warn!("invite list reload failed: {e}");
        }
    }
}

impl Deref for InvitesResource {
    type Target = Resource<Invite>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
