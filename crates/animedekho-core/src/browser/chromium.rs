//! Chromium sessions over the DevTools protocol
//!
//! Each session owns a whole browser process: one browsing context, one
//! page, a tracked handler task driving the CDP connection and a request
//! observer task feeding the interceptor. Everything is released by
//! [`BrowserSession::close`], or best-effort by `Drop` if the session is
//! abandoned mid-scan.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams as NetworkEnableParams, EventRequestWillBeSent, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::{
    EnableParams as PageEnableParams, EventDomContentEventFired, NavigateParams,
};
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use super::locate::resolve_executable;
use super::{BrowserLauncher, BrowserSession};
use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::interceptor::RequestInterceptor;

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Launches headless Chromium sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumLauncher;

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(
        &self,
        config: &ScannerConfig,
        interceptor: Arc<RequestInterceptor>,
    ) -> Result<Box<dyn BrowserSession>> {
        let executable = resolve_executable(config).await?;
        let user_data_dir = unique_profile_dir();

        tokio::fs::create_dir_all(&user_data_dir)
            .await
            .map_err(|e| ScanError::Launch(format!("cannot create profile dir: {}", e)))?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(executable)
            .user_data_dir(user_data_dir.clone())
            .request_timeout(config.navigation_timeout() + Duration::from_secs(10))
            .window_size(1920, 1080)
            .no_sandbox()
            .arg(format!("--user-agent={}", config.user_agent))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--disable-notifications")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--mute-audio");

        builder = if config.headless {
            builder.headless_mode(HeadlessMode::default())
        } else {
            builder.with_head()
        };

        let browser_config = match builder.build() {
            Ok(cfg) => cfg,
            Err(e) => {
                remove_profile_dir(&user_data_dir);
                return Err(ScanError::Launch(format!("invalid browser config: {}", e)));
            }
        };

        info!("Launching browser (engine: {:?})", config.engine);
        let (browser, mut handler) = match Browser::launch(browser_config).await {
            Ok(launched) => launched,
            Err(e) => {
                remove_profile_dir(&user_data_dir);
                return Err(ScanError::Launch(e.to_string()));
            }
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let message = e.to_string();
                    // chromiumoxide does not model every CDP message; those
                    // deserialization failures are harmless
                    if message.contains("data did not match any variant")
                        || message.contains("Failed to deserialize WS response")
                    {
                        trace!("Suppressed CDP message error: {}", message);
                    } else {
                        error!("Browser handler error: {:?}", e);
                    }
                }
            }
            debug!("Browser handler task completed");
        });

        let mut session = ChromiumSession {
            browser,
            handler: handler_task,
            observer: None,
            context_id: None,
            page: None,
            user_data_dir: Some(user_data_dir),
        };

        if let Err(e) = session.open_page(config, interceptor).await {
            if let Err(close_err) = session.shutdown().await {
                warn!("Cleanup after failed launch also failed: {}", close_err);
            }
            return Err(ScanError::Launch(e.to_string()));
        }

        Ok(Box::new(session))
    }
}

/// A running browser with one isolated page
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    observer: Option<JoinHandle<()>>,
    context_id: Option<BrowserContextId>,
    page: Option<Page>,
    user_data_dir: Option<PathBuf>,
}

impl ChromiumSession {
    /// Creates the browsing context and page, and wires the request observer
    async fn open_page(
        &mut self,
        config: &ScannerConfig,
        interceptor: Arc<RequestInterceptor>,
    ) -> Result<()> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await?
            .result
            .browser_context_id;
        self.context_id = Some(context_id.clone());

        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id)
            .build()
            .map_err(ScanError::Browser)?;
        let page = self.browser.new_page(target).await?;
        self.page = Some(page.clone());

        page.execute(NetworkEnableParams::default()).await?;
        page.execute(PageEnableParams::default()).await?;
        page.execute(SetUserAgentOverrideParams::new(config.user_agent.clone()))
            .await?;

        let mut requests = page.event_listener::<EventRequestWillBeSent>().await?;
        self.observer = Some(tokio::spawn(async move {
            while let Some(event) = requests.next().await {
                trace!("Request: {}", event.request.url);
                if interceptor.observe(&event.request.url) || !interceptor.is_listening() {
                    break;
                }
            }
            debug!("Request observer detached");
        }));

        debug!("Browsing context ready with user agent: {}", config.user_agent);
        Ok(())
    }

    /// Releases every resource, collecting failures instead of stopping at the first
    async fn shutdown(&mut self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(observer) = self.observer.take() {
            observer.abort();
        }

        if let Some(page) = self.page.take()
            && let Err(e) = page.close().await
        {
            warn!("Failed to close page: {}", e);
            errors.push(format!("page close: {}", e));
        }

        if let Some(context_id) = self.context_id.take()
            && let Err(e) = self
                .browser
                .execute(DisposeBrowserContextParams::new(context_id))
                .await
        {
            warn!("Failed to dispose browsing context: {}", e);
            errors.push(format!("context dispose: {}", e));
        }

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
            errors.push(format!("browser close: {}", e));
        } else if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
            errors.push(format!("browser wait: {}", e));
        }

        self.handler.abort();

        if let Some(dir) = self.user_data_dir.take() {
            remove_profile_dir(&dir);
        }

        if errors.is_empty() {
            debug!("Browser session closed");
            Ok(())
        } else {
            Err(ScanError::Teardown(errors.join("; ")))
        }
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| ScanError::Browser("session has no open page".to_string()))?;

        // Subscribe before navigating so the event cannot be missed
        let mut dom_ready = page.event_listener::<EventDomContentEventFired>().await?;

        let response = page
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| ScanError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(reason) = response.result.error_text.clone() {
            return Err(ScanError::Navigation {
                url: url.to_string(),
                reason,
            });
        }

        match dom_ready.next().await {
            Some(_) => Ok(()),
            None => Err(ScanError::Navigation {
                url: url.to_string(),
                reason: "page closed before DOMContentLoaded".to_string(),
            }),
        }
    }

    async fn close(mut self: Box<Self>) -> Result<()> {
        self.shutdown().await
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.abort();
        }
        self.handler.abort();

        // Browser's own Drop kills the child process
        if let Some(dir) = self.user_data_dir.take() {
            warn!("Browser session dropped without close, removing profile dir in Drop");
            remove_profile_dir(&dir);
        }
    }
}

fn unique_profile_dir() -> PathBuf {
    let n = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("animedekho_chrome_{}_{}", std::process::id(), n))
}

fn remove_profile_dir(dir: &Path) {
    if let Err(e) = std::fs::remove_dir_all(dir) {
        warn!("Failed to remove profile dir {}: {}", dir.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_profile_dir_differs_per_session() {
        let first = unique_profile_dir();
        let second = unique_profile_dir();
        assert_ne!(first, second);
        assert!(first.starts_with(std::env::temp_dir()));
    }

    #[tokio::test]
    async fn test_launch_with_missing_browser_fails() {
        let config = ScannerConfig {
            executable: Some(PathBuf::from("/definitely/not/a/browser")),
            ..ScannerConfig::default()
        };
        let interceptor = Arc::new(RequestInterceptor::new());
        let result = ChromiumLauncher::new().launch(&config, interceptor).await;
        assert!(matches!(result, Err(ScanError::BrowserNotFound(_))));
    }

    #[tokio::test]
    #[ignore = "requires a local Chrome/Chromium installation"]
    async fn test_scan_intercepts_script_request_on_local_site() {
        use crate::{InterceptionScanner, ScanOutcome, SearchRequest, VideoLocator};
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let page = r#"<!doctype html>
            <html><head><title>Naruto 1x5</title></head>
            <body>
              <div id="player"></div>
              <script>
                setTimeout(function () {
                  fetch("https://play.zephyrflick.top/video/wm-test-15").catch(function () {});
                }, 200);
              </script>
            </body></html>"#;
        Mock::given(method("GET"))
            .and(path("/episodes/naruto-1x5/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
            .mount(&server)
            .await;

        let config = ScannerConfig {
            settle_delay_ms: 2_000,
            ..ScannerConfig::default()
        };
        let locator = VideoLocator::with_scanner(InterceptionScanner::with_config(config))
            .with_base_url(server.uri());
        let request = SearchRequest::parse(Some("Naruto"), Some("1"), Some("5")).unwrap();

        match locator.find(&request).await {
            ScanOutcome::Found(url) => {
                assert_eq!(url, "https://play.zephyrflick.top/video/wm-test-15")
            }
            other => panic!("Expected a match, got {:?}", other),
        }

        let visited: Vec<String> = server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.url.path().to_string())
            .filter(|p| p.starts_with("/epi"))
            .collect();
        assert_eq!(visited, vec!["/epi/naruto-1x5/", "/episodes/naruto-1x5/"]);
    }
}
