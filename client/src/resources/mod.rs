//! Resource Hooks.
//!
//! One cached collection per remote list. Every fetch takes a ticket from a
//! per-resource sequence; only the latest ticket may touch the cache, and
//! only while the auth epoch it was issued in is still current.

mod chats;
mod invites;
mod messages;
mod users;

pub use chats::ChatsResource;
pub use invites::InvitesResource;
pub use messages::MessagesResource;
pub use users::UsersResource;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

/// Issued by [`Resource::begin`]; identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    epoch: u64,
}

pub struct Resource<T> {
    name: &'static str,
    api: ApiClient,
    state: watch::Sender<ResourceState<T>>,
    seq: AtomicU64,
}

impl<T: Clone> Resource<T> {
    pub fn new(name: &'static str, api: ApiClient) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            name,
            api,
            state,
            seq: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    /// Start a fetch: the previous tickets become stale.
    pub fn begin(&self) -> Ticket {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.is_loading = true);
        Ticket {
            seq,
            epoch: self.api.auth_epoch(),
        }
    }

    fn is_latest(&self, ticket: Ticket) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket.seq
    }

    /// Apply the outcome of `ticket`'s fetch. The error, if any, is always
    /// handed back to the caller, even when the cache ignores it.
    pub fn finish(&self, ticket: Ticket, result: Result<Vec<T>, ApiError>) -> Result<(), ApiError> {
        if !self.is_latest(ticket) {
            debug!(resource = self.name, seq = ticket.seq, "dropping stale response");
            return result.map(|_| ());
        }

        let same_session = self.api.auth_epoch() == ticket.epoch;
        match result {
            Ok(items) => {
                self.state.send_modify(|state| {
                    if same_session {
                        state.items = items;
                        state.error = None;
                    } else {
                        debug!(resource = self.name, "session changed, response discarded");
                    }
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.state.send_modify(|state| {
                    state.error = Some(e.to_string());
                    state.is_loading = false;
                });
                Err(e)
            }
        }
    }

    /// Fetch with a fresh ticket and apply the result.
    pub async fn refetch_with<F, Fut>(&self, fetch: F) -> Result<(), ApiError>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let ticket = self.begin();
        self.run(ticket, fetch).await
    }

    /// Like [`Resource::refetch_with`] for a ticket taken earlier.
    pub async fn run<F, Fut>(&self, ticket: Ticket, fetch: F) -> Result<(), ApiError>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let result = fetch(self.api.clone()).await;
        self.finish(ticket, result)
    }

    /// Make every outstanding fetch stale without issuing a new one.
    pub fn invalidate(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| state.is_loading = false);
    }

    /// Drop the cached items and the last error.
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            state.items.clear();
            state.error = None;
        });
    }

    /// Append one item at the end of the cache.
    pub fn push(&self, item: T) {
        self.state.send_modify(|state| state.items.push(item));
    }
}
