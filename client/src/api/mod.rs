//! API Client.
//!
//! Turns one (endpoint, method, query, body) tuple into one HTTP call and a
//! typed result. Fire-once: no retry, no backoff, no timeout beyond the
//! transport default.

mod auth;
mod chats;
mod init;
mod invites;
mod users;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Endpoint};
use crate::dtos::AuthResponse;
use crate::entities::TokenKind;
use crate::error::{ApiError, StoreError};
use crate::navigation::{Navigator, Route};
use crate::store::TokenStore;

const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Raised when the server rejects the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Credentials were dropped; `epoch` is the auth epoch after the drop.
    Unauthenticated { epoch: u64 },
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Attach the bearer token and apply the 401 side effects.
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint, method: Method) -> Self {
        Self {
            endpoint,
            method,
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(endpoint, Method::GET)
    }

    pub fn post(endpoint: Endpoint) -> Self {
        Self::new(endpoint, Method::POST)
    }

    pub fn delete(endpoint: Endpoint) -> Self {
        Self::new(endpoint, Method::DELETE)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// No credentials and no 401 side effects.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    navigator: Navigator,
    events: broadcast::Sender<AuthEvent>,
    auth_epoch: AtomicU64,
}

/// Shared handle to the remote endpoints. Clones share the HTTP pool, the
/// token store, the navigator and the auth epoch.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>, navigator: Navigator) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Inner {
                http: reqwest::Client::new(),
                config,
                store,
                navigator,
                events,
                auth_epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    /// Bumped every time credentials are dropped (401 or sign-out).
    pub fn auth_epoch(&self) -> u64 {
        self.inner.auth_epoch.load(Ordering::SeqCst)
    }

    pub fn subscribe_auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    /// Drop the stored credentials and start a new auth epoch.
    pub fn invalidate_session(&self) -> Result<u64, StoreError> {
        let cleared = self.inner.store.clear();
        let epoch = self.inner.auth_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        cleared.map(|_| epoch)
    }

    /// Save tokens and user after a successful login or registration.
    pub fn persist_auth(&self, auth: &AuthResponse) -> Result<(), StoreError> {
        self.inner.store.set_session(&auth.tokens(), &auth.user)
    }

    pub async fn request<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ApiError> {
        let url = self.inner.config.endpoints.url(req.endpoint);
        debug!(method = %req.method, url, "api request");

        let mut builder = self.inner.http.request(req.method.clone(), url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if req.authenticated {
            if let Some(token) = self.inner.store.get(TokenKind::Access)? {
                builder = builder.bearer_auth(token);
            }
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && req.authenticated {
            self.handle_unauthorized();
            return Err(ApiError::Unauthenticated);
        }

        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = error_message(&bytes);
            debug!(status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn handle_unauthorized(&self) {
        let epoch = match self.invalidate_session() {
            Ok(epoch) => epoch,
            Err(e) => {
                warn!("failed to clear session after 401: {e}");
                self.auth_epoch()
            }
        };
        warn!(epoch, "session rejected by server, redirecting to sign-in");
        self.inner.navigator.navigate(Route::Auth { invite: None });
        // nessun ricevitore attivo non è un errore
        let _ = self.inner.events.send(AuthEvent::Unauthenticated { epoch });
    }
}

/// The body's `error` field, or the generic failure message.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
}
