//! Core data types for the video locator
//!
//! Contains the lookup request, the typed scan outcome and the uniform
//! result payload handed to adapters.

use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ValidationError};

/// Message attached to a successful lookup
pub const FOUND_MESSAGE: &str = "Video URL found successfully";
/// Error text for a completed scan without a match
pub const NOT_FOUND_ERROR: &str = "No video URL found. Try different season/episode numbers.";
/// Message attached to a completed scan without a match
pub const NOT_FOUND_MESSAGE: &str = "No video URL found";
/// Message attached to a scan that failed outright
pub const FAILED_MESSAGE: &str = "Failed to fetch video URL";

/// A request to locate one episode's video URL
///
/// Season and episode stay strings so they are formatted into candidate
/// URLs exactly as given (e.g. "01" stays "01").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text anime title (e.g., "Shinchan")
    pub title: String,

    /// Season number as text (e.g., "1")
    pub season: String,

    /// Episode number as text (e.g., "5")
    pub episode: String,
}

impl SearchRequest {
    /// Validates raw, possibly missing inputs into a request
    ///
    /// # Errors
    /// - `MissingParameters` if any input is absent or blank
    /// - `InvalidNumber` if season or episode is not an integer literal
    ///   (see [`is_integer_literal`])
    pub fn parse(
        title: Option<&str>,
        season: Option<&str>,
        episode: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let (Some(title), Some(season), Some(episode)) = (
            title.filter(|t| !t.trim().is_empty()),
            season.filter(|s| !s.is_empty()),
            episode.filter(|e| !e.is_empty()),
        ) else {
            return Err(ValidationError::MissingParameters);
        };

        if !is_integer_literal(season) || !is_integer_literal(episode) {
            return Err(ValidationError::InvalidNumber);
        }

        Ok(Self {
            title: title.to_string(),
            season: season.to_string(),
            episode: episode.to_string(),
        })
    }
}

/// Whether `text` reads as an integer
///
/// Accepts surrounding whitespace, one leading sign and `_` between ASCII
/// digits (`" 5"`, `"+3"`, `"1_0"`). There is no magnitude limit since the
/// value is only checked, never converted.
pub fn is_integer_literal(text: &str) -> bool {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty()
        && digits
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

/// Typed outcome of a lookup, before it is flattened into a [`ScanResult`]
#[derive(Debug)]
pub enum ScanOutcome {
    /// A request to the video host was observed
    Found(String),
    /// Every candidate was tried without a match
    NotFound,
    /// The scan could not run to completion
    Failed(ScanError),
}

/// Uniform result payload returned to API and CLI callers
///
/// Either `video_url` or `error` is set, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Whether a video URL was found
    pub success: bool,

    /// Direct video URL on the video host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// What went wrong, for unsuccessful lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Short human-readable summary
    pub message: String,
}

impl ScanResult {
    /// Successful lookup
    pub fn found(video_url: impl Into<String>) -> Self {
        Self {
            success: true,
            video_url: Some(video_url.into()),
            error: None,
            message: FOUND_MESSAGE.to_string(),
        }
    }

    /// Unsuccessful lookup with an error and a summary message
    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            video_url: None,
            error: Some(error.into()),
            message: message.into(),
        }
    }

    /// Unsuccessful lookup caused by rejected input
    pub fn invalid(error: &ValidationError) -> Self {
        Self::failure(error.to_string(), error.hint())
    }
}

impl From<ScanOutcome> for ScanResult {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Found(url) => ScanResult::found(url),
            ScanOutcome::NotFound => ScanResult::failure(NOT_FOUND_ERROR, NOT_FOUND_MESSAGE),
            ScanOutcome::Failed(e) => {
                ScanResult::failure(format!("An error occurred: {}", e), FAILED_MESSAGE)
            }
        }
    }
}
