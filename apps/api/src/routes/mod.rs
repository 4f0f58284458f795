pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::creative::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(handlers::handle_options))
        // Creative Assistant tab
        .route("/api/v1/ideas", post(handlers::handle_brainstorm))
        // Image/Poster Analysis tab
        .route(
            "/api/v1/captions/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/captions/localize", post(handlers::handle_localize))
        .with_state(state)
}
