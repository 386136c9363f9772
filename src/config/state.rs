// Application state module
// Immutable shared state handed to every connection by Arc

use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::store::DocumentStore;

/// Application state
///
/// The document store is built once at bootstrap and never mutated, so
/// concurrent handlers share it without any locking.
pub struct AppState {
    pub config: Config,
    pub store: DocumentStore,

    // Cached config value for lock-free access on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config, store: DocumentStore) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Self {
            config,
            store,
            cached_access_log,
        }
    }
}
