//! Auth DTOs - Registrazione, login e risposta con la coppia di token

use super::UserDTO;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[a-z0-9_.-]{3,32}$").expect("valid username regex");
}

/// Body delle POST su /auth, il campo `action` seleziona l'operazione
#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuthActionDTO {
    Register(RegisterDTO),
    Login(LoginDTO),
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDTO {
    #[serde(default)]
    #[validate(regex(
        path = *USERNAME_RE,
        message = "Username must be 3-32 characters: lowercase letters, digits, '_', '.', '-'"
    ))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "Display name must be between 1 and 64 characters"))]
    pub display_name: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,

    #[serde(default)]
    pub invite_token: String,
}

impl RegisterDTO {
    /// Username in minuscolo, spazi ai bordi rimossi da tutti i campi
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_lowercase(),
            display_name: self.display_name.trim().to_string(),
            password: self.password.trim().to_string(),
            invite_token: self.invite_token.trim().to_string(),
        }
    }

    pub fn has_required_fields(&self) -> bool {
        !self.username.is_empty() && !self.display_name.is_empty() && !self.password.is_empty()
    }
}

/// DTO per il login (solo username e password)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDTO {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginDTO {
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_lowercase(),
            password: self.password.trim().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDTO {
    pub user: UserDTO,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CurrentUserDTO {
    pub user: UserDTO,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str) -> RegisterDTO {
        RegisterDTO {
            username: username.to_string(),
            display_name: " Alice Liddell ".to_string(),
            password: " wonderland ".to_string(),
            invite_token: " tok ".to_string(),
        }
    }

    #[test]
    fn normalization_lowercases_and_trims() {
        let dto = register("  Alice ").normalized();
        assert_eq!(dto.username, "alice");
        assert_eq!(dto.display_name, "Alice Liddell");
        assert_eq!(dto.password, "wonderland");
        assert_eq!(dto.invite_token, "tok");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_bad_usernames() {
        assert!(register("a b").normalized().validate().is_err());
        assert!(register("ab").normalized().validate().is_err());
    }

    #[test]
    fn action_tag_selects_variant() {
        let body = r#"{"action":"login","username":"bob","password":"pw"}"#;
        match serde_json::from_str::<AuthActionDTO>(body).expect("login body") {
            AuthActionDTO::Login(login) => assert_eq!(login.username, "bob"),
            other => panic!("unexpected variant {:?}", other),
        }
    }
}
