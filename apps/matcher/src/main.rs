mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod models;
mod postings;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{LlmProfileExtractor, ProfileExtractor, UnconfiguredExtractor};
use crate::llm_client::LlmClient;
use crate::matching::engine::MatchSession;
use crate::postings::source::JsonFilePostingSource;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    // Profile extraction is optional; without a key only structured profiles can be matched
    let extractor: Arc<dyn ProfileExtractor> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM profile extractor enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmProfileExtractor::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; resume text matching is disabled");
            Arc::new(UnconfiguredExtractor)
        }
    };

    // Fit the posting index eagerly; an empty or unreadable corpus is retried on first query
    let source = Arc::new(JsonFilePostingSource::new(config.postings_path.clone()));
    let session = Arc::new(MatchSession::new(source, config.match_options()));
    if let Err(e) = session.reload().await {
        warn!(error = %e, "Initial posting index build failed");
    }

    let state = AppState {
        config: config.clone(),
        session,
        extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
