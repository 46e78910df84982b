use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery status. The order is the only allowed direction of travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sending,
    #[default]
    Sent,
    Read,
}

impl MessageStatus {
    /// Only strictly forward steps are valid.
    pub fn can_transition_to(self, next: MessageStatus) -> bool {
        next > self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(deserialize_with = "super::wire::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "super::wire::string_or_number")]
    pub chat_id: String,
    #[serde(deserialize_with = "super::wire::string_or_number")]
    pub sender_id: String,
    pub body: String,
    #[serde(deserialize_with = "super::wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: MessageStatus,
}
