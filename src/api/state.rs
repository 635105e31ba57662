use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::engine::RecommendationEngine;

/// Shared application state
///
/// The engine sits behind one read-write lock: ingestion and history writes
/// take the write half, queries the read half, so a query sees either the
/// pre-rebuild or post-rebuild content index, never a partial one.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<RecommendationEngine>>,
    pub config: Config,
}

impl AppState {
    /// Creates state with an empty engine.
    pub fn new(config: Config) -> Self {
        let engine = RecommendationEngine::new(config.vectorizer_max_terms);
        Self {
            engine: Arc::new(RwLock::new(engine)),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
