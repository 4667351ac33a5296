use std::sync::Arc;

use crate::services::{MovieProvider, SessionStore};
use crate::store::{CredentialStore, RecordStore, WatchlistStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MovieProvider>,
    pub credentials: CredentialStore,
    pub watchlists: WatchlistStore,
    pub sessions: SessionStore,
}

impl AppState {
    /// Wires the stores over one record backend, with no sessions yet
    pub fn new(provider: Arc<dyn MovieProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            provider,
            credentials: CredentialStore::new(store.clone()),
            watchlists: WatchlistStore::new(store),
            sessions: SessionStore::new(),
        }
    }
}
