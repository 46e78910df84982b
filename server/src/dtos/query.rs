//! Query DTOs - Parametri di query e identificativi ricevuti dal client

use serde::{Deserialize, Serialize};

/// Query parameters di GET /chats
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatsQuery {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// Identificativo inviato dal client: stringa (formato dell'API) oppure numero
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IdParam {
    Number(i64),
    Text(String),
}

impl IdParam {
    pub fn parse(&self) -> Option<i64> {
        match self {
            IdParam::Number(id) => Some(*id),
            IdParam::Text(text) => text.trim().parse().ok(),
        }
    }
}
