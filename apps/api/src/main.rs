mod config;
mod corpus;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::feedback::{FeedbackGenerator, LlmFeedbackProvider};
use crate::matching::ranker::JobRanker;
use crate::matching::snapshot::EngineHandle;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher API v{}", env!("CARGO_PKG_VERSION"));

    // Build the initial engine snapshot; without a corpus there is nothing to serve
    let sources = config.snapshot_sources();
    let initial = {
        let sources = sources.clone();
        tokio::task::spawn_blocking(move || sources.load(0))
            .await
            .context("Snapshot build task panicked")?
            .context("Failed to build initial engine snapshot")?
    };
    let engine = Arc::new(EngineHandle::new(initial));

    // Feedback: rule-based always, LLM-backed when a key is configured
    let feedback = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.feedback_timeout)
                .context("Failed to build LLM client")?;
            info!(
                "Semantic feedback enabled (model: {}, timeout: {}ms)",
                llm_client::MODEL,
                config.feedback_timeout.as_millis()
            );
            FeedbackGenerator::with_provider(
                Arc::new(LlmFeedbackProvider(llm)),
                config.feedback_timeout,
                config.max_suggestions,
            )
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; using rule-based feedback only");
            FeedbackGenerator::rule_based_only(config.max_suggestions)
        }
    };

    let ranker = Arc::new(JobRanker::new(config.ranker_workers, config.top_k)?);
    info!(
        "Job ranker ready (top_k: {}, workers: {})",
        config.top_k,
        if config.ranker_workers == 0 {
            "default".to_string()
        } else {
            config.ranker_workers.to_string()
        }
    );

    let cors = match &config.frontend_url {
        Some(origin) => CorsLayer::permissive().allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("FRONTEND_URL is not a valid origin: {origin}"))?,
        ),
        None => CorsLayer::permissive(),
    };

    // Build app state
    let state = AppState {
        engine,
        feedback,
        ranker,
        sources,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
