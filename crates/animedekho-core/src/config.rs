//! Scanner configuration
//!
//! One configuration struct replaces per-browser copies of the scan
//! logic: which browser to run, which identity it presents, and how long
//! each candidate page gets.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Desktop user-agent presets
pub struct UserAgent;

impl UserAgent {
    /// Generic Windows desktop identity
    pub const DESKTOP_CHROMIUM: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
    /// Windows Firefox 91 identity
    pub const DESKTOP_FIREFOX: &'static str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) Gecko/20100101 Firefox/91.0";
}

/// Where the browser executable comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    /// An installed Chrome/Chromium found on this machine
    #[default]
    Chromium,
    /// A Chromium build downloaded into the user cache directory
    ManagedChromium,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Engine::Chromium),
            "managed-chromium" | "managed" => Ok(Engine::ManagedChromium),
            other => Err(format!(
                "unknown engine '{}', expected 'chromium' or 'managed-chromium'",
                other
            )),
        }
    }
}

/// Configuration for the interception scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Browser source (default: installed Chromium)
    pub engine: Engine,
    /// User agent presented by the browsing context
    pub user_agent: String,
    /// Per-candidate DOMContentLoaded timeout in milliseconds (default: 20000)
    pub navigation_timeout_ms: u64,
    /// Wait after DOMContentLoaded for script-driven requests (default: 3000)
    pub settle_delay_ms: u64,
    /// Run without a visible window (default: true)
    pub headless: bool,
    /// Explicit browser executable, skipping discovery
    pub executable: Option<PathBuf>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            user_agent: UserAgent::DESKTOP_CHROMIUM.to_string(),
            navigation_timeout_ms: 20_000,
            settle_delay_ms: 3_000,
            headless: true,
            executable: None,
        }
    }
}

impl ScannerConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Upper bound on a scan that never matches
    pub fn worst_case(&self, candidates: usize) -> Duration {
        (self.navigation_timeout() + self.settle_delay()) * candidates as u32
    }
}
