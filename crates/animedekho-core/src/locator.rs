//! Main locator API
//!
//! Ties slug generation, candidate URLs and the interception scanner
//! together, and reports every outcome as a [`ScanResult`].

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::ScannerConfig;
use crate::scanner::InterceptionScanner;
use crate::types::{ScanOutcome, ScanResult, SearchRequest};
use crate::url::{BASE_URL, candidate_urls_on};

/// Anything that can look up an episode's video URL
///
/// The HTTP layer depends on this rather than on [`VideoLocator`] so
/// routes can be exercised without a browser.
#[async_trait]
pub trait VideoFinder: Send + Sync {
    /// Runs one lookup for an already validated request
    async fn find_video(&self, request: &SearchRequest) -> ScanOutcome;
}

/// Main locator API for animedekho.co
pub struct VideoLocator {
    scanner: InterceptionScanner,
    base_url: String,
}

impl VideoLocator {
    /// Create a locator with default scanner configuration
    pub fn new() -> Self {
        Self::with_scanner(InterceptionScanner::new())
    }

    /// Create a locator with custom scanner configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self::with_scanner(InterceptionScanner::with_config(config))
    }

    /// Create a locator around an existing scanner
    pub fn with_scanner(scanner: InterceptionScanner) -> Self {
        Self {
            scanner,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point candidate URLs at a different site root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The ordered candidate page URLs for a request
    pub fn candidates(&self, request: &SearchRequest) -> Vec<String> {
        candidate_urls_on(&self.base_url, &request.title, &request.season, &request.episode)
    }

    /// Runs the scan for a validated request
    ///
    /// Never fails: scan errors become [`ScanOutcome::Failed`].
    pub async fn find(&self, request: &SearchRequest) -> ScanOutcome {
        let candidates = self.candidates(request);
        info!(
            "Looking up '{}' S{}E{} across {} candidates",
            request.title,
            request.season,
            request.episode,
            candidates.len()
        );

        match self.scanner.scan(&candidates).await {
            Ok(Some(url)) => ScanOutcome::Found(url),
            Ok(None) => ScanOutcome::NotFound,
            Err(e) => {
                error!("Scan failed: {}", e);
                ScanOutcome::Failed(e)
            }
        }
    }

    /// Validates raw input, scans, and reports the result
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() {
    /// use animedekho_core::VideoLocator;
    /// let locator = VideoLocator::new();
    /// let result = locator.lookup(Some("shinchan"), Some("1"), Some("1")).await;
    /// println!("{}", serde_json::to_string(&result).unwrap());
    /// # }
    /// ```
    pub async fn lookup(
        &self,
        title: Option<&str>,
        season: Option<&str>,
        episode: Option<&str>,
    ) -> ScanResult {
        match SearchRequest::parse(title, season, episode) {
            Ok(request) => self.find(&request).await.into(),
            Err(e) => ScanResult::invalid(&e),
        }
    }
}

impl Default for VideoLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoFinder for VideoLocator {
    async fn find_video(&self, request: &SearchRequest) -> ScanOutcome {
        self.find(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::scanner::testing::{FakeLauncher, FakePage, fast_config};
    use crate::types::{FAILED_MESSAGE, NOT_FOUND_ERROR, NOT_FOUND_MESSAGE};

    fn locator(launcher: &Arc<FakeLauncher>) -> VideoLocator {
        VideoLocator::with_scanner(InterceptionScanner::with_launcher(
            launcher.clone(),
            fast_config(),
        ))
    }

    fn request() -> SearchRequest {
        SearchRequest::parse(Some("Naruto"), Some("1"), Some("5")).unwrap()
    }

    #[test]
    fn test_candidates_for_request() {
        let locator = VideoLocator::new();
        let urls = locator.candidates(&request());
        assert_eq!(urls.len(), 8);
        assert_eq!(urls[0], "https://animedekho.co/epi/naruto-1x5/");
        assert_eq!(urls[7], "https://animedekho.co/episodes/naruto/1x5/");
    }

    #[test]
    fn test_candidates_with_base_url() {
        let locator = VideoLocator::new().with_base_url("http://localhost:9000");
        let urls = locator.candidates(&request());
        assert_eq!(urls[1], "http://localhost:9000/episodes/naruto-1x5/");
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let launcher = Arc::new(FakeLauncher::new().page(
            "https://animedekho.co/epi/naruto/1x5/",
            FakePage::Requests(vec!["https://play.zephyrflick.top/video/n15".to_string()]),
        ));

        let result = locator(&launcher).lookup(Some("Naruto"), Some("1"), Some("5")).await;

        assert_eq!(result, ScanResult::found("https://play.zephyrflick.top/video/n15"));
        assert_eq!(launcher.navigations().len(), 3);
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let launcher = Arc::new(FakeLauncher::new());

        let result = locator(&launcher).lookup(Some("Naruto"), Some("1"), Some("5")).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(NOT_FOUND_ERROR));
        assert_eq!(result.message, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_lookup_launch_failure() {
        let launcher = Arc::new(FakeLauncher::new().failing_launch());

        let result = locator(&launcher).lookup(Some("Naruto"), Some("1"), Some("5")).await;

        assert!(!result.success);
        assert!(result.video_url.is_none());
        assert!(result.error.unwrap().starts_with("An error occurred:"));
        assert_eq!(result.message, FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_lookup_invalid_input_skips_scan() {
        let launcher = Arc::new(FakeLauncher::new());

        let result = locator(&launcher).lookup(Some("Naruto"), Some("abc"), Some("5")).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Invalid season or episode number"));
        assert_eq!(launcher.launches(), 0);
    }

    #[tokio::test]
    async fn test_find_video_through_trait_object() {
        let launcher = Arc::new(FakeLauncher::new());
        let finder: Arc<dyn VideoFinder> = Arc::new(locator(&launcher));

        let outcome = finder.find_video(&request()).await;

        assert!(matches!(outcome, ScanOutcome::NotFound));
    }
}
