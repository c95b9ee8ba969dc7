//! JSON status and liveness handlers.

use axum::extract::State;
use axum::Json;
use strum::IntoEnumIterator;

use super::super::types::{AppState, StatusResponse};
use crate::error_handling::FailureKind;

/// JSON counters accumulated since startup
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let stats = state.scraper.stats();

    Json(StatusResponse {
        requests: stats.requests(),
        succeeded: stats.succeeded(),
        failed: stats.total_terminal_failures(),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        wins: stats.wins().into_iter().collect(),
        attempt_failures: FailureKind::iter()
            .map(|kind| (kind.as_str().to_string(), stats.get_attempt_failure_count(kind)))
            .collect(),
        request_failures: FailureKind::iter()
            .map(|kind| (kind.as_str().to_string(), stats.get_terminal_failure_count(kind)))
            .collect(),
    })
}

pub async fn health_handler() -> &'static str {
    "ok"
}
