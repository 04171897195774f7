use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use animedekho_core::VideoLocator;
use animedekho_server::{AppState, ServerOptions, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let options = ServerOptions::parse();
    let config = options.scanner_config();
    info!(
        "Scanner: engine={:?} navigation_timeout={}ms settle_delay={}ms headless={}",
        config.engine, config.navigation_timeout_ms, config.settle_delay_ms, config.headless
    );

    let state = AppState::new(Arc::new(VideoLocator::with_config(config)));
    let app = router(state);

    let address = options.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("AnimeDekho API listening on {}", address);
    info!("Video endpoint: /api/video?title=<title>&season=<n>&episode=<n>");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
