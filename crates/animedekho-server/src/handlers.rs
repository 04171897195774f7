//! HTTP route handlers
//!
//! Handlers validate query input, delegate to the shared [`VideoFinder`]
//! and map its outcome onto a status code.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use animedekho_core::{ScanOutcome, ScanResult, SearchRequest};

use crate::AppState;

/// Raw `/api/video` query parameters
///
/// All optional so missing parameters reach validation instead of being
/// rejected by the extractor.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VideoQuery {
    pub title: Option<String>,
    pub season: Option<String>,
    pub episode: Option<String>,
}

impl VideoQuery {
    /// Builds the query from decoded pairs, keeping the first value of a
    /// repeated key and ignoring unknown keys
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "title" => &mut query.title,
                "season" => &mut query.season,
                "episode" => &mut query.episode,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Status code for a finished lookup
pub fn status_for(outcome: &ScanOutcome) -> StatusCode {
    match outcome {
        ScanOutcome::Found(_) => StatusCode::OK,
        ScanOutcome::NotFound => StatusCode::NOT_FOUND,
        ScanOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Look up the video URL for an episode
///
/// `GET /api/video?title=<string>&season=<int>&episode=<int>`
///
/// # Returns
/// - 200 with `video_url` when a video request was intercepted
/// - 400 for missing or non-numeric parameters (no scan is started)
/// - 404 when every candidate page was tried without a match
/// - 500 when the browser scan itself failed
pub async fn video_route(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match pairs {
        Ok(Query(pairs)) => VideoQuery::from_pairs(pairs),
        Err(e) => {
            warn!("Unreadable video query: {}", e);
            VideoQuery::default()
        }
    };

    let request = match SearchRequest::parse(
        query.title.as_deref(),
        query.season.as_deref(),
        query.episode.as_deref(),
    ) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected video lookup: {}", e);
            return (StatusCode::BAD_REQUEST, Json(ScanResult::invalid(&e))).into_response();
        }
    };

    info!(
        "Video lookup: title='{}' season={} episode={}",
        request.title, request.season, request.episode
    );
    let outcome = state.finder.find_video(&request).await;
    let status = status_for(&outcome);
    (status, Json(ScanResult::from(outcome))).into_response()
}

/// API documentation
///
/// `GET /`
pub async fn root_route() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "message": "AnimeDekho API",
            "description": "API to fetch video URLs from animedekho.co",
            "endpoints": {
                "/api/video": {
                    "method": "GET",
                    "description": "Fetch video URL for an anime episode",
                    "parameters": {
                        "title": "Anime title (string)",
                        "season": "Season number (integer)",
                        "episode": "Episode number (integer)"
                    },
                    "example": "/api/video?title=shinchan&season=1&episode=1"
                }
            }
        })),
    )
}

/// Liveness probe
///
/// `GET /health`
pub async fn health_route() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "message": "AnimeDekho API is running"
        })),
    )
}
