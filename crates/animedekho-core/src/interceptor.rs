//! Network request interception
//!
//! [`RequestInterceptor`] receives every outgoing request URL a page makes
//! and captures the first one pointing at the video host. Capture happens
//! once; later requests are ignored. The scan loop awaits the capture
//! through a watch channel instead of polling a shared flag.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::sync::watch;
use tracing::{debug, info};

/// Pattern identifying a direct video URL on the video host
pub const VIDEO_URL_PATTERN: &str = r"(?i)https://play\.zephyrflick\.top/video/[A-Za-z0-9\-_]+";

static VIDEO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VIDEO_URL_PATTERN).expect("static video URL pattern"));

/// Finds a video host URL inside an arbitrary request URL
///
/// # Example
/// ```
/// use animedekho_core::interceptor::match_video_url;
/// let url = "https://play.zephyrflick.top/video/abc-123?autoplay=1";
/// assert_eq!(match_video_url(url), Some("https://play.zephyrflick.top/video/abc-123"));
/// assert_eq!(match_video_url("https://animedekho.co/wp-content/x.js"), None);
/// ```
pub fn match_video_url(url: &str) -> Option<&str> {
    VIDEO_URL.find(url).map(|m| m.as_str())
}

/// Single-capture observer for outgoing request URLs
pub struct RequestInterceptor {
    found: watch::Sender<Option<String>>,
}

impl RequestInterceptor {
    pub fn new() -> Self {
        let (found, _) = watch::channel(None);
        Self { found }
    }

    /// Inspects one request URL
    ///
    /// # Returns
    /// `true` if this call captured the match. Calls after the first
    /// capture always return `false`.
    pub fn observe(&self, url: &str) -> bool {
        let Some(video_url) = match_video_url(url) else {
            return false;
        };

        let captured = self.found.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(video_url.to_string());
            true
        });

        if captured {
            info!("Intercepted video request: {}", video_url);
        } else {
            debug!("Ignoring video request after first match: {}", url);
        }
        captured
    }

    /// The captured video URL, if any
    pub fn matched(&self) -> Option<String> {
        self.found.borrow().clone()
    }

    /// Whether the observer should still be fed requests
    pub fn is_listening(&self) -> bool {
        self.found.borrow().is_none()
    }

    /// Waits until a match is captured or `timeout` elapses
    ///
    /// Returns immediately if a match was already captured.
    pub async fn wait_for_match(&self, timeout: Duration) -> Option<String> {
        let mut rx = self.found.subscribe();
        match tokio::time::timeout(timeout, rx.wait_for(Option::is_some)).await {
            Ok(Ok(found)) => found.clone(),
            _ => self.matched(),
        }
    }
}

impl Default for RequestInterceptor {
    fn default() -> Self {
        Self::new()
    }
}
