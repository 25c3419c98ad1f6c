use std::sync::Arc;

use crate::batch::dispatch::BatchRegistry;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable session backend. Redis when REDIS_URL is set, in-memory otherwise.
    pub store: Arc<dyn SessionStore>,
    pub batches: BatchRegistry,
}
