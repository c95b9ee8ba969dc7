//! `POST /api/scrape`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{
    ApiError, AppState, ScrapeRequest, ScrapeSuccess, MSG_INVALID_URL, MSG_METHOD_NOT_ALLOWED,
    MSG_URL_REQUIRED,
};

/// Scrapes the URL in the JSON body.
///
/// A body that is not valid JSON, or lacks `url`, is a 400 before any network
/// I/O happens.
pub async fn scrape_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::debug!("Rejected scrape body: {}", rejection.body_text());
            return ApiError::new(StatusCode::BAD_REQUEST, MSG_INVALID_URL)
                .with_technical(&rejection.body_text(), state.expose_technical_errors)
                .into_response();
        }
    };

    let Some(url) = request.url.filter(|url| !url.trim().is_empty()) else {
        return ApiError::new(StatusCode::BAD_REQUEST, MSG_URL_REQUIRED).into_response();
    };

    match state.scraper.scrape(&url).await {
        Ok(document) => (StatusCode::OK, Json(ScrapeSuccess::new(document))).into_response(),
        Err(error) => {
            ApiError::from_scrape_error(&error, state.expose_technical_errors).into_response()
        }
    }
}

/// Plain `OPTIONS` (CORS preflights are answered by the CORS layer).
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the scrape route.
pub async fn method_not_allowed() -> Response {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED).into_response()
}

