//! Navigation signals for the view layer.

use std::sync::Arc;

use tokio::sync::watch;

/// Screens the session layer can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    InitSetup,
    Auth { invite: Option<String> },
    Messenger,
}

/// Publishes the route the view layer should show. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: Arc<watch::Sender<Route>>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn navigate(&self, route: Route) {
        self.tx.send_replace(route);
    }

    pub fn current(&self) -> Route {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Auth { invite: None })
    }
}
