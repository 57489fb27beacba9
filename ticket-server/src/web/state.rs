//! Application state for the web layer.

use std::sync::Arc;

use crate::store::{StoreSet, TicketStore};
use crate::verify::TicketVerifier;

/// Shared application state.
pub struct AppState<S> {
    /// Verifier over the configured ticket stores
    pub verifier: Arc<TicketVerifier<S>>,
}

impl<S: TicketStore> AppState<S> {
    /// Create a new app state.
    pub fn new(stores: StoreSet<S>) -> Self {
        Self {
            verifier: Arc::new(TicketVerifier::new(stores)),
        }
    }
}

// Manual impl: cloning shares the verifier, so `S` itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
        }
    }
}
