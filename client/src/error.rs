//! Errori del client: archivio dei token e chiamate HTTP

use thiserror::Error;

/// Errori del Token Store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cached user record is corrupt: {0}")]
    Corrupt(String),
}

/// Tassonomia degli errori restituiti dall'API Client
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: le credenziali sono già state rimosse e la sessione reindirizzata
    #[error("Unauthorized")]
    Unauthenticated,

    /// Qualsiasi altra risposta non 2xx; il messaggio è quello del server se presente
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no chat is selected")]
    NoActiveChat,

    #[error("token store failed: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }

    /// Status HTTP della risposta rifiutata, se il server ha risposto
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthenticated => Some(401),
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
