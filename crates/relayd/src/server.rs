//! HTTP server assembly for relayd.

use crate::config::Config;
use crate::enrichment::EnrichmentClient;
use crate::llm::LlmClient;
use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
    pub enrichment: EnrichmentClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let llm = LlmClient::new(
            &config.llm.api_base,
            Config::llm_api_key(),
            config.llm.timeout_secs,
        )
        .context("failed to build LLM client")?;

        let enrichment = EnrichmentClient::new(
            &config.enrichment.base_url,
            Config::enrichment_token(),
            config.enrichment.timeout_secs,
        )
        .context("failed to build enrichment client")?;

        Ok(Self {
            config,
            llm,
            enrichment,
            start_time: Instant::now(),
        })
    }
}

/// Assemble the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::meta_routes())
        .merge(routes::icp_routes())
        .merge(routes::enrichment_routes())
        .merge(routes::prospect_routes())
        .merge(routes::trip_routes())
        .merge(routes::image_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind_addr();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("relayd listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("server exited with error")?;
    Ok(())
}
