//! Error types for the animedekho video locator
//!
//! Two enums cover the two places a lookup can fail: input validation
//! (before any browser is started) and the browser scan itself.
//! Both serialize as their display string so adapters can embed them
//! directly in JSON payloads.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Rejected lookup input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of title, season, episode is absent or blank
    #[error("Missing required parameters: title, season, episode")]
    MissingParameters,

    /// Season or episode does not parse as an integer
    #[error("Invalid season or episode number")]
    InvalidNumber,
}

impl ValidationError {
    /// Hint shown to the caller next to the error
    pub fn hint(&self) -> &'static str {
        match self {
            ValidationError::MissingParameters => {
                "Please provide title, season, and episode as query parameters"
            }
            ValidationError::InvalidNumber => "Season and episode must be valid numbers",
        }
    }
}

/// Error type for browser scan operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// No usable Chrome/Chromium executable could be located
    #[error("Browser executable not found: {0}")]
    BrowserNotFound(String),

    /// Browser process or session failed to start
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// DevTools protocol command failed outside of navigation
    #[error("Browser error: {0}")]
    Browser(String),

    /// A single candidate page failed to load
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A single candidate page did not reach DOMContentLoaded in time
    #[error("Navigation to {url} timed out after {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    /// Browser context or process could not be shut down cleanly
    #[error("Failed to close browser: {0}")]
    Teardown(String),
}

impl From<chromiumoxide::error::CdpError> for ScanError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScanError::Browser(err.to_string())
    }
}

impl Serialize for ScanError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
