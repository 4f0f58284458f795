mod config;
mod creative;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{body::Body, http::Request};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::creative::ranking::{RandomScoreSource, ScoreSource};
use crate::llm_client::{GeminiClient, ModelGateway};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GEMINI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Genie API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model gateway
    let gateway: Arc<dyn ModelGateway> = Arc::new(GeminiClient::new(&config)?);
    info!("Gemini client initialized (model: {})", gateway.model());

    // Synthetic A/B scores: reproducible when a seed is configured
    let scores: Arc<dyn ScoreSource> = match config.score_seed {
        Some(seed) => {
            info!("A/B simulation seeded with {seed}");
            Arc::new(RandomScoreSource::seeded(seed))
        }
        None => Arc::new(RandomScoreSource::from_entropy()),
    };

    let port = config.port;
    let state = AppState {
        gateway,
        scores,
        config: Arc::new(config),
    };

    // Build router
    let app = build_router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
