use serde::{Deserialize, Serialize};

use crate::entities::{TokenPair, User};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename = "login")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename = "register", rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub display_name: &'a str,
    pub password: &'a str,
    pub invite_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub user: User,
}
