use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Message, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    #[default]
    Direct,
}

/// Two-participant conversation as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(deserialize_with = "super::wire::string_or_number")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub chat_type: ChatType,
    #[serde(default)]
    pub participants: Vec<User>,
    #[serde(default)]
    pub last_message: Option<Message>,
    #[serde(default)]
    pub unread_count: i64,
    #[serde(deserialize_with = "super::wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// The participant that is not `me`.
    pub fn counterpart(&self, me: &str) -> Option<&User> {
        self.participants.iter().find(|user| user.id != me)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counterpart_skips_current_user() {
        let json = r#"{
            "id": "3",
            "type": "direct",
            "participants": [
                {"id": "1", "username": "alice", "displayName": "Alice", "isAdmin": true},
                {"id": "2", "username": "bob", "displayName": "Bob", "isAdmin": false}
            ],
            "lastMessage": null,
            "unreadCount": 4,
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let chat: Chat = serde_json::from_str(json).unwrap();
        assert_eq!(chat.counterpart("1").map(|u| u.username.as_str()), Some("bob"));
        assert_eq!(chat.counterpart("2").map(|u| u.username.as_str()), Some("alice"));
        assert_eq!(chat.unread_count, 4);
    }
}
