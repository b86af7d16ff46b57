use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; read-only across requests.
    pub engine: Arc<MatchingEngine>,
    /// Whether the embedding model answered the startup probe.
    pub model_loaded: bool,
}
