//! Browser executable discovery
//!
//! Finds an installed Chrome/Chromium, or downloads a managed Chromium
//! build into the user cache directory.

use std::path::{Path, PathBuf};

use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use tracing::{debug, info, warn};

use crate::config::{Engine, ScannerConfig};
use crate::error::{Result, ScanError};

/// Well-known install locations for the current platform
fn platform_paths() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    }
}

/// Finds an installed Chrome/Chromium executable
///
/// Checks `explicit` first, then platform install paths, then `which`
/// on Unix.
///
/// # Errors
/// `BrowserNotFound` if nothing usable exists, or if `explicit` points
/// at a missing file.
pub async fn find_browser_executable(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            info!("Using configured browser: {}", path.display());
            return Ok(path.to_path_buf());
        }
        return Err(ScanError::BrowserNotFound(format!(
            "configured path does not exist: {}",
            path.display()
        )));
    }

    for candidate in platform_paths() {
        let path = PathBuf::from(candidate);
        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
            let output = tokio::process::Command::new("which").arg(cmd).output().await;
            if let Ok(output) = output
                && output.status.success()
            {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!("Found browser using 'which': {}", found);
                    return Ok(PathBuf::from(found));
                }
            }
        }
    }

    Err(ScanError::BrowserNotFound(
        "no Chrome/Chromium installation found".to_string(),
    ))
}

/// Downloads (or reuses) a managed Chromium build
///
/// Builds live under `<cache dir>/animedekho/chromium`, falling back to
/// the system temp directory when no cache directory is known.
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir();
            warn!(
                "No user cache directory, storing Chromium under {}",
                fallback.display()
            );
            fallback
        })
        .join("animedekho")
        .join("chromium");

    tokio::fs::create_dir_all(&cache_dir)
        .await
        .map_err(|e| ScanError::BrowserNotFound(format!("cannot create {}: {}", cache_dir.display(), e)))?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .map_err(|e| ScanError::BrowserNotFound(format!("invalid fetcher options: {}", e)))?;

    info!("Fetching managed Chromium into {}", cache_dir.display());
    let installation = BrowserFetcher::new(options)
        .fetch()
        .await
        .map_err(|e| ScanError::BrowserNotFound(format!("Chromium download failed: {}", e)))?;

    debug!("Managed Chromium ready at {}", installation.executable_path.display());
    Ok(installation.executable_path)
}

/// Resolves the executable for the configured engine
pub async fn resolve_executable(config: &ScannerConfig) -> Result<PathBuf> {
    match config.engine {
        Engine::Chromium => find_browser_executable(config.executable.as_deref()).await,
        Engine::ManagedChromium => match config.executable.as_deref() {
            Some(path) => find_browser_executable(Some(path)).await,
            None => download_managed_browser().await,
        },
    }
}
