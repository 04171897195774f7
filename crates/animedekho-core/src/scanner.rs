//! Interception scanner
//!
//! Visits candidate pages in order inside one browser session and stops
//! as soon as the page has issued a request to the video host.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::browser::{BrowserLauncher, BrowserSession, ChromiumLauncher};
use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::interceptor::RequestInterceptor;

/// Sequential, browser-backed search over candidate URLs
///
/// Every call to [`scan`](Self::scan) launches its own session; nothing
/// is shared between scans.
pub struct InterceptionScanner {
    launcher: Arc<dyn BrowserLauncher>,
    config: ScannerConfig,
}

impl InterceptionScanner {
    /// Create a Chromium-backed scanner with default configuration
    pub fn new() -> Self {
        Self::with_config(ScannerConfig::default())
    }

    /// Create a Chromium-backed scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self::with_launcher(Arc::new(ChromiumLauncher::new()), config)
    }

    /// Create a scanner on top of any browser implementation
    pub fn with_launcher(launcher: Arc<dyn BrowserLauncher>, config: ScannerConfig) -> Self {
        Self { launcher, config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scans candidates in order until one triggers a video request
    ///
    /// # Returns
    /// `Some(video_url)` for the first intercepted match, `None` when every
    /// candidate was visited without one.
    ///
    /// # Errors
    /// Launch and teardown failures. Failures loading an individual
    /// candidate are logged and skipped.
    pub async fn scan(&self, candidates: &[String]) -> Result<Option<String>> {
        let interceptor = Arc::new(RequestInterceptor::new());
        let mut session = self
            .launcher
            .launch(&self.config, Arc::clone(&interceptor))
            .await?;

        let found = self.visit_candidates(session.as_mut(), &interceptor, candidates).await;

        session.close().await?;

        match &found {
            Some(url) => info!("Video URL found: {}", url),
            None => info!("No video URL after {} candidates", candidates.len()),
        }
        Ok(found)
    }

    async fn visit_candidates(
        &self,
        session: &mut dyn BrowserSession,
        interceptor: &RequestInterceptor,
        candidates: &[String],
    ) -> Option<String> {
        let timeout = self.config.navigation_timeout();
        let settle = self.config.settle_delay();

        for (index, url) in candidates.iter().enumerate() {
            if let Some(found) = interceptor.matched() {
                debug!("Match captured, skipping remaining {} candidates", candidates.len() - index);
                return Some(found);
            }

            info!("Trying candidate {}/{}: {}", index + 1, candidates.len(), url);
            let loaded = match tokio::time::timeout(timeout, session.navigate(url)).await {
                Ok(result) => result,
                Err(_) => Err(ScanError::NavigationTimeout {
                    url: url.clone(),
                    timeout_ms: self.config.navigation_timeout_ms,
                }),
            };

            if let Err(e) = loaded {
                warn!("Skipping candidate: {}", e);
                continue;
            }

            // Player requests fire from scripts after DOMContentLoaded
            interceptor.wait_for_match(settle).await;
        }

        interceptor.matched()
    }
}

impl Default for InterceptionScanner {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    const VIDEO: &str = "https://play.zephyrflick.top/video/ep5-abc";

    fn scanner(launcher: &Arc<FakeLauncher>) -> InterceptionScanner {
        InterceptionScanner::with_launcher(launcher.clone(), fast_config())
    }

    #[tokio::test]
    async fn test_scan_stops_after_third_candidate_matches() {
        let urls = candidates();
        let launcher = Arc::new(FakeLauncher::new().page(
            &urls[2],
            FakePage::Requests(vec![
                "https://animedekho.co/wp-includes/js/jquery.js".to_string(),
                VIDEO.to_string(),
            ]),
        ));

        let found = scanner(&launcher).scan(&urls).await.unwrap();

        assert_eq!(found.as_deref(), Some(VIDEO));
        assert_eq!(launcher.navigations(), urls[..3].to_vec());
        assert_eq!(launcher.closes(), 1);
    }

    #[tokio::test]
    async fn test_scan_without_match_visits_every_candidate() {
        let urls = candidates();
        let launcher = Arc::new(FakeLauncher::new());

        let found = scanner(&launcher).scan(&urls).await.unwrap();

        assert_eq!(found, None);
        assert_eq!(launcher.navigations().len(), 8);
        assert_eq!(launcher.launches(), 1);
        assert_eq!(launcher.closes(), 1);
    }

    #[tokio::test]
    async fn test_scan_skips_failed_and_hanging_candidates() {
        let urls = candidates();
        let launcher = Arc::new(
            FakeLauncher::new()
                .page(&urls[0], FakePage::Fail)
                .page(&urls[1], FakePage::Hang)
                .page(&urls[3], FakePage::Requests(vec![VIDEO.to_string()])),
        );

        let found = scanner(&launcher).scan(&urls).await.unwrap();

        assert_eq!(found.as_deref(), Some(VIDEO));
        assert_eq!(launcher.navigations(), urls[..4].to_vec());
        assert_eq!(launcher.launches(), 1);
        assert_eq!(launcher.closes(), 1);
    }

    #[tokio::test]
    async fn test_scan_keeps_first_match() {
        let urls = candidates();
        let launcher = Arc::new(FakeLauncher::new().page(
            &urls[0],
            FakePage::Requests(vec![
                "https://play.zephyrflick.top/video/first".to_string(),
                "https://play.zephyrflick.top/video/second".to_string(),
            ]),
        ));

        let found = scanner(&launcher).scan(&urls).await.unwrap();

        assert_eq!(found.as_deref(), Some("https://play.zephyrflick.top/video/first"));
        assert_eq!(launcher.navigations().len(), 1);
    }

    #[tokio::test]
    async fn test_scan_propagates_launch_failure() {
        let launcher = Arc::new(FakeLauncher::new().failing_launch());

        let result = scanner(&launcher).scan(&candidates()).await;

        assert!(matches!(result, Err(ScanError::Launch(_))));
        assert!(launcher.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_scan_propagates_teardown_failure() {
        let urls = candidates();
        let launcher = Arc::new(
            FakeLauncher::new()
                .page(&urls[0], FakePage::Requests(vec![VIDEO.to_string()]))
                .failing_close(),
        );

        let result = scanner(&launcher).scan(&urls).await;

        assert!(matches!(result, Err(ScanError::Teardown(_))));
        assert_eq!(launcher.closes(), 1);
    }

    #[tokio::test]
    async fn test_scan_with_no_candidates() {
        let launcher = Arc::new(FakeLauncher::new());

        let found = scanner(&launcher).scan(&[]).await.unwrap();

        assert_eq!(found, None);
        assert_eq!(launcher.closes(), 1);
    }

    #[test]
    fn test_scanner_default_config() {
        let scanner = InterceptionScanner::new();
        assert_eq!(scanner.config(), &ScannerConfig::default());
    }
}
