//! Request/response types and the error-to-response mapping.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error_handling::{FailureKind, ScrapeError};
use crate::models::ExtractedDocument;
use crate::pipeline::Scraper;
use crate::utils::sanitize::sanitize_and_truncate_error_message;

pub const MSG_URL_REQUIRED: &str = "URL is required";
pub const MSG_INVALID_URL: &str = "Please enter a valid website URL.";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MSG_TIMEOUT: &str = "Website took too long to respond. Please try again.";
pub const MSG_NOT_FOUND: &str = "Website could not be found. Please check the URL.";
pub const MSG_BLOCKED: &str =
    "Website is blocking automated requests. Please try a different website.";
pub const MSG_GENERIC: &str = "Failed to scrape website";

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<Scraper>,
    pub expose_technical_errors: bool,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(scraper: Scraper, expose_technical_errors: bool) -> Self {
        Self {
            scraper: Arc::new(scraper),
            expose_technical_errors,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Body of `POST /api/scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct ScrapeSuccess {
    pub success: bool,
    pub data: ExtractedDocument,
}

impl ScrapeSuccess {
    pub fn new(data: ExtractedDocument) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_error: Option<String>,
}

/// A failure ready to be sent to the client.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
    pub technical: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            technical: None,
        }
    }

    /// Attaches sanitized technical detail when `expose` is set.
    pub fn with_technical(mut self, detail: &str, expose: bool) -> Self {
        if expose {
            self.technical = Some(sanitize_and_truncate_error_message(detail));
        }
        self
    }

    /// Maps a scrape failure to its status code and user-facing message.
    pub fn from_scrape_error(error: &ScrapeError, expose: bool) -> Self {
        let (status, message) = match error {
            ScrapeError::MissingUrl => (StatusCode::BAD_REQUEST, MSG_URL_REQUIRED),
            ScrapeError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, MSG_INVALID_URL),
            ScrapeError::Retrieval(_) | ScrapeError::Parse(_) => match error.kind() {
                FailureKind::Timeout => (StatusCode::REQUEST_TIMEOUT, MSG_TIMEOUT),
                FailureKind::Blocked => (StatusCode::SERVICE_UNAVAILABLE, MSG_BLOCKED),
                FailureKind::NotFound => (StatusCode::INTERNAL_SERVER_ERROR, MSG_NOT_FOUND),
                FailureKind::Other => (StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERIC),
            },
        };
        Self::new(status, message).with_technical(&error.to_string(), expose)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message.to_string(),
            technical_error: self.technical,
        };
        (self.status, Json(body)).into_response()
    }
}

/// JSON response for `/api/status`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub requests: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub uptime_seconds: f64,
    /// Successful requests per strategy name
    pub wins: BTreeMap<String, usize>,
    /// Failed strategy attempts per failure kind
    pub attempt_failures: BTreeMap<String, usize>,
    /// Failed requests per failure kind
    pub request_failures: BTreeMap<String, usize>,
}
