//! Session Controller.
//!
//! The single owner of the "who is signed in" state. Starts in `Loading`,
//! trusts the cached user on startup and can verify it in the background.
//! A 401 seen by any API call is applied on the next read of the state.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiClient, AuthEvent};
use crate::entities::User;
use crate::error::ApiError;
use crate::navigation::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

struct Inner {
    api: ApiClient,
    state: watch::Sender<SessionState>,
    events: Mutex<broadcast::Receiver<AuthEvent>>,
    // epoch in cui la sessione corrente è stata stabilita
    session_epoch: Mutex<u64>,
}

#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl SessionController {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        let events = Mutex::new(api.subscribe_auth_events());
        let session_epoch = Mutex::new(api.auth_epoch());
        Self {
            inner: Arc::new(Inner {
                api,
                state,
                events,
                session_epoch,
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Current state, after applying any pending rejection from the API client.
    pub fn state(&self) -> SessionState {
        self.apply_auth_events();
        self.inner.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Rehydrate from the token store without a server round trip.
    #[instrument(skip(self))]
    pub fn init(&self) -> SessionState {
        match self.inner.api.store().user() {
            Ok(Some(user)) => {
                debug!(user_id = %user.id, "restored cached user");
                self.become_authenticated(user);
            }
            Ok(None) => {
                debug!("no cached user");
                self.drop_stored_tokens();
                self.become_unauthenticated();
            }
            Err(e) => {
                warn!("cached user unreadable, clearing session: {e}");
                self.drop_stored_tokens();
                self.become_unauthenticated();
            }
        }
        self.state()
    }

    /// Confirm the cached user with the server.
    ///
    /// `Ok(None)` when there is no session to verify. A 401 ends the session;
    /// any other failure leaves it untouched and is returned.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> Result<Option<User>, ApiError> {
        if self.state().user().is_none() {
            return Ok(None);
        }
        let epoch = self.inner.api.auth_epoch();
        match self.inner.api.current_user().await {
            Ok(user) => {
                // la sessione potrebbe essere cambiata durante la chiamata
                if self.inner.api.auth_epoch() == epoch && self.state().user().is_some() {
                    self.inner.api.store().set_user(&user)?;
                    self.inner
                        .state
                        .send_replace(SessionState::Authenticated(user.clone()));
                    debug!(user_id = %user.id, "session verified");
                }
                Ok(Some(user))
            }
            Err(e) => {
                if e.is_unauthenticated() {
                    self.apply_auth_events();
                }
                Err(e)
            }
        }
    }

    /// Run `verify` on a background task when the configuration asks for it.
    pub fn spawn_verification(&self) -> Option<JoinHandle<Result<Option<User>, ApiError>>> {
        if !self.inner.api.config().verify_on_start {
            return None;
        }
        let controller = self.clone();
        Some(tokio::spawn(async move {
            let result = controller.verify().await;
            if let Err(e) = &result {
                warn!("background session verification failed: {e}");
            }
            result
        }))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let auth = self.inner.api.login(username, password).await?;
        self.become_authenticated(auth.user.clone());
        Ok(auth.user)
    }

    #[instrument(skip(self, password, invite_token))]
    pub async fn register(
        &self,
        username: &str,
        display_name: &str,
        password: &str,
        invite_token: &str,
    ) -> Result<User, ApiError> {
        let auth = self
            .inner
            .api
            .register(username, display_name, password, invite_token)
            .await?;
        self.become_authenticated(auth.user.clone());
        Ok(auth.user)
    }

    /// Sign out. Calling it again has no further effect.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        let was_signed_out = *self.inner.state.borrow() == SessionState::Unauthenticated;
        if was_signed_out {
            self.drop_stored_tokens();
        } else if let Err(e) = self.inner.api.invalidate_session() {
            warn!("failed to clear session: {e}");
        }
        self.become_unauthenticated();
        if !was_signed_out {
            info!("signed out");
        }
    }

    // token orfani senza utente: via senza toccare l'epoch
    fn drop_stored_tokens(&self) {
        if let Err(e) = self.inner.api.store().clear() {
            warn!("failed to clear session: {e}");
        }
    }

    fn become_authenticated(&self, user: User) {
        *self
            .inner
            .session_epoch
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = self.inner.api.auth_epoch();
        self.inner.state.send_replace(SessionState::Authenticated(user));
        self.inner.api.navigator().navigate(Route::Messenger);
    }

    fn become_unauthenticated(&self) {
        self.inner.state.send_replace(SessionState::Unauthenticated);
        self.inner
            .api
            .navigator()
            .navigate(Route::Auth { invite: None });
    }

    /// Drain rejections raised since the last read. Events from an epoch the
    /// current session already outlived are ignored.
    fn apply_auth_events(&self) {
        let mut latest = None;
        {
            let mut events = self
                .inner
                .events
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            loop {
                match events.try_recv() {
                    Ok(AuthEvent::Unauthenticated { epoch }) => latest = Some(epoch),
                    Err(broadcast::error::TryRecvError::Lagged(_)) => {
                        latest = Some(self.inner.api.auth_epoch())
                    }
                    Err(_) => break,
                }
            }
        }

        let Some(epoch) = latest else { return };
        let session_epoch = *self
            .inner
            .session_epoch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if epoch > session_epoch && *self.inner.state.borrow() != SessionState::Unauthenticated {
            info!(epoch, "session ended by server");
            self.inner.state.send_replace(SessionState::Unauthenticated);
        }
    }
}
