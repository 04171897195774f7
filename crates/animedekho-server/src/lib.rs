//! AnimeDekho HTTP API
//!
//! Exposes the video locator over HTTP with axum.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use animedekho_core::VideoLocator;
//! use animedekho_server::{AppState, router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = router(AppState::new(Arc::new(VideoLocator::new())));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```
//!
//! Then query it:
//!
//! ```text
//! curl 'http://localhost:5000/api/video?title=shinchan&season=1&episode=1'
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::trace::TraceLayer;

use animedekho_core::{Engine, ScannerConfig, UserAgent, VideoFinder};

mod handlers;

pub use handlers::{VideoQuery, health_route, root_route, status_for, video_route};

/// Shared handler state
///
/// Holds only the finder; every lookup launches its own browser session,
/// so no lock is needed around it.
#[derive(Clone)]
pub struct AppState {
    pub(crate) finder: Arc<dyn VideoFinder>,
}

impl AppState {
    pub fn new(finder: Arc<dyn VideoFinder>) -> Self {
        Self { finder }
    }
}

/// Builds the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_route))
        .route("/api/video", get(video_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Command-line options for the API server
#[derive(Debug, Clone, Parser)]
#[command(name = "animedekho-server", version, about = "HTTP API for animedekho.co video URLs")]
pub struct ServerOptions {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Browser source: chromium or managed-chromium
    #[arg(long, default_value = "chromium")]
    pub engine: Engine,

    /// Explicit Chrome/Chromium executable
    #[arg(long = "chrome")]
    pub chrome: Option<PathBuf>,

    /// User agent presented to the site
    #[arg(long, default_value = UserAgent::DESKTOP_CHROMIUM)]
    pub user_agent: String,

    /// Per-candidate page load timeout in milliseconds
    #[arg(long, default_value_t = 20_000)]
    pub navigation_timeout_ms: u64,

    /// Wait after page load for player requests, in milliseconds
    #[arg(long, default_value_t = 3_000)]
    pub settle_delay_ms: u64,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,
}

impl ServerOptions {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig {
            engine: self.engine,
            user_agent: self.user_agent.clone(),
            navigation_timeout_ms: self.navigation_timeout_ms,
            settle_delay_ms: self.settle_delay_ms,
            headless: !self.headful,
            executable: self.chrome.clone(),
        }
    }
}
