//! Shared handler state.

use std::sync::Arc;

use organmatch_ingress::IntakeGate;
use organmatch_settlement::MatchCommitter;
use organmatch_store::InMemoryStore;
use organmatch_types::{CascadePolicy, ServiceConfig};

/// Cloned into every handler. Everything mutable lives in the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub gate: Arc<IntakeGate>,
    pub committer: Arc<MatchCommitter>,
    pub cascade_policy: CascadePolicy,
}

impl AppState {
    /// Fresh, empty store configured from `config`.
    #[must_use]
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    /// Serve an existing store.
    #[must_use]
    pub fn with_store(store: Arc<InMemoryStore>, config: &ServiceConfig) -> Self {
        Self {
            store,
            gate: Arc::new(IntakeGate::new()),
            committer: Arc::new(MatchCommitter::with_note(config.match_note.clone())),
            cascade_policy: config.cascade_policy,
        }
    }
}
