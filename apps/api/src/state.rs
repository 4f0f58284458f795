use std::sync::Arc;

use crate::config::Config;
use crate::creative::ranking::ScoreSource;
use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. Production: `GeminiClient`.
    pub gateway: Arc<dyn ModelGateway>,
    /// Synthetic score source for the A/B simulation. Seeded when GENIE_SCORE_SEED is set.
    pub scores: Arc<dyn ScoreSource>,
    pub config: Arc<Config>,
}
