use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ProfileExtractor;
use crate::matching::engine::MatchSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Owns the fitted posting index.
    pub session: Arc<MatchSession>,
    /// `LlmProfileExtractor` when an API key is configured, `UnconfiguredExtractor` otherwise.
    pub extractor: Arc<dyn ProfileExtractor>,
}
