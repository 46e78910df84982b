//! User DTOs - Data Transfer Objects per utenti

use crate::entities::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub is_admin: bool,
    pub is_online: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserDTO {
    pub fn at(value: User, now: DateTime<Utc>) -> Self {
        Self {
            id: value.id.to_string(),
            is_online: value.is_online_at(now),
            username: value.username,
            display_name: value.display_name,
            is_admin: value.is_admin,
            last_seen: value.last_seen,
            created_at: value.created_at,
            // password_hash mai esposta al client!!!
        }
    }
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self::at(value, Utc::now())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UsersResponseDTO {
    pub users: Vec<UserDTO>,
}

/// DTO per creare un nuovo utente (senza id, password già hashata)
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
