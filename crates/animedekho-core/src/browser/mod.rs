//! Browser session abstraction
//!
//! The scanner only needs two things from a browser: load a page up to
//! DOMContentLoaded, and feed every outgoing request URL to a
//! [`RequestInterceptor`]. [`BrowserLauncher`] and [`BrowserSession`] are
//! that seam; [`ChromiumLauncher`] is the DevTools-protocol implementation.

mod chromium;
mod locate;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ScannerConfig;
use crate::error::Result;
use crate::interceptor::RequestInterceptor;

pub use chromium::{ChromiumLauncher, ChromiumSession};
pub use locate::{download_managed_browser, find_browser_executable, resolve_executable};

/// Starts isolated browser sessions
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launches a browser and opens one page in a fresh browsing context
    ///
    /// The page presents `config.user_agent` and reports every outgoing
    /// request URL to `interceptor` until it captures a match.
    ///
    /// # Errors
    /// Any failure here is a scan-level failure; partially started
    /// resources are released before returning.
    async fn launch(
        &self,
        config: &ScannerConfig,
        interceptor: Arc<RequestInterceptor>,
    ) -> Result<Box<dyn BrowserSession>>;
}

/// One page inside one browsing context, owned by a single scan
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates the page and resolves once the DOM content has loaded
    ///
    /// Timeouts are applied by the caller.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Tears down the page, the browsing context and the browser process
    async fn close(self: Box<Self>) -> Result<()>;
}
