//! AnimeDekho Video Locator Core Library
//!
//! Finds the direct video-stream URL for an anime episode on animedekho.co.
//!
//! # Overview
//!
//! The site's episode URLs cannot be computed reliably and the video URL
//! only appears once the player script runs, so a lookup:
//! - derives URL slugs from the title
//! - builds a fixed, ordered list of candidate episode pages
//! - loads each page in a headless Chromium and watches outgoing requests
//!   until one goes to the video host
//!
//! # Example
//!
//! ```no_run
//! use animedekho_core::{ScanOutcome, SearchRequest, VideoLocator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let locator = VideoLocator::new();
//!     let request = SearchRequest::parse(Some("shinchan"), Some("1"), Some("1")).unwrap();
//!
//!     match locator.find(&request).await {
//!         ScanOutcome::Found(url) => println!("Video URL: {}", url),
//!         ScanOutcome::NotFound => println!("No video URL found"),
//!         ScanOutcome::Failed(e) => eprintln!("Scan failed: {}", e),
//!     }
//! }
//! ```
//!
//! # Timing
//!
//! Each candidate gets up to 20 s to reach DOMContentLoaded plus a 3 s
//! settle delay, so a lookup without a match can take about three minutes.
//! Both bounds are configurable through [`ScannerConfig`].

pub mod browser;
mod config;
mod error;
pub mod interceptor;
mod locator;
mod scanner;
pub mod slug;
mod types;
pub mod url;

// Re-export configuration
pub use config::{Engine, ScannerConfig, UserAgent};

// Re-export error types
pub use error::{Result, ScanError, ValidationError};

// Re-export browser seam
pub use browser::{BrowserLauncher, BrowserSession, ChromiumLauncher};

// Re-export interception
pub use interceptor::{RequestInterceptor, match_video_url};

// Re-export main locator API
pub use locator::{VideoFinder, VideoLocator};
pub use scanner::InterceptionScanner;

// Re-export data types
pub use types::{ScanOutcome, ScanResult, SearchRequest};

// Re-export slug and URL helpers for convenience
pub use slug::make_slugs;
pub use url::{build_candidate_urls, candidate_urls};
