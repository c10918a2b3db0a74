//! Prompt Relay daemon.
//!
//! Serves the ICP, prospect discovery, trip planning, and image generation
//! flows over HTTP, backed by a hosted chat model and an external
//! lead-enrichment service.

use anyhow::Result;
use relayd::config::{Config, LLM_API_KEY_ENV};
use relayd::server::{self, AppState};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("[BOOT] relayd v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    info!(
        "[BOOT] Chat model: {} | Image model: {} | Enrichment: {}",
        config.llm.chat_model, config.llm.image_model, config.enrichment.base_url
    );

    if Config::llm_api_key().is_none() {
        warn!(
            "[BOOT] No LLM API key found ({} unset); upstream calls will be unauthenticated",
            LLM_API_KEY_ENV
        );
    }

    let state = Arc::new(AppState::new(config)?);
    server::run(state).await
}
