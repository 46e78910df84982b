//! Client configuration.
//!
//! Endpoint URLs, the public origin used for invite links and the session
//! storage path, read from the environment (`.env` supported).

use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// The five remote endpoints; each one is a single URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Auth,
    Chats,
    Invites,
    Users,
    Init,
}

/// Absolute URLs of the remote endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth: String,
    pub chats: String,
    pub invites: String,
    pub users: String,
    pub init: String,
}

impl Endpoints {
    /// Derive every endpoint from a common base URL.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth: format!("{base}/auth"),
            chats: format!("{base}/chats"),
            invites: format!("{base}/invites"),
            users: format!("{base}/users"),
            init: format!("{base}/init"),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Auth => &self.auth,
            Endpoint::Chats => &self.chats,
            Endpoint::Invites => &self.invites,
            Endpoint::Users => &self.users,
            Endpoint::Init => &self.init,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    /// Public origin used to build `<origin>/auth?invite=<token>` links.
    pub origin: String,
    /// Session file; `None` when no home directory can be determined.
    pub storage_path: Option<PathBuf>,
    /// Run the background session verification right after startup.
    pub verify_on_start: bool,
}

impl ClientConfig {
    /// Configuration pointing every endpoint at `base`.
    pub fn for_base_url(base: &str) -> Self {
        Self {
            endpoints: Endpoints::from_base(base),
            origin: base.trim_end_matches('/').to_string(),
            storage_path: default_storage_path(),
            verify_on_start: true,
        }
    }

    /// Load `.env`, then read the `CHATGATE_*` variables.
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let base = lookup("CHATGATE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!(
                "Invalid CHATGATE_API_URL '{base}': must start with http:// or https://"
            ));
        }

        let mut config = Self::for_base_url(&base);
        let overrides = [
            ("CHATGATE_AUTH_URL", &mut config.endpoints.auth),
            ("CHATGATE_CHATS_URL", &mut config.endpoints.chats),
            ("CHATGATE_INVITES_URL", &mut config.endpoints.invites),
            ("CHATGATE_USERS_URL", &mut config.endpoints.users),
            ("CHATGATE_INIT_URL", &mut config.endpoints.init),
        ];
        for (key, slot) in overrides {
            if let Some(url) = lookup(key) {
                *slot = url;
            }
        }

        if let Some(origin) = lookup("CHATGATE_ORIGIN") {
            config.origin = origin.trim_end_matches('/').to_string();
        }
        if let Some(path) = lookup("CHATGATE_STORAGE") {
            config.storage_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("CHATGATE_VERIFY_ON_START") {
            config.verify_on_start = parse_bool(&flag).ok_or_else(|| {
                format!("Invalid CHATGATE_VERIFY_ON_START '{flag}': expected true or false")
            })?;
        }

        Ok(config)
    }
}

/// `~/.chatgate/session.json`
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".chatgate").join("session.json"))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
