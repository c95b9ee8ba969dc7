//! HTTP server exposing the scrape endpoint.
//!
//! Provides three endpoints:
//! - `POST /api/scrape` - scrape a page, `{ "url": "..." }` in, document out
//! - `GET /api/status` - JSON counters since startup
//! - `GET /health` - liveness probe
//!
//! Every response carries permissive CORS headers so browser front-ends on
//! any origin can call the API.

mod handlers;
mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::app::{print_final_statistics, shutdown_signal};
use crate::config::{Config, CORS_ALLOWED_HEADERS, CORS_ALLOWED_METHODS};
use crate::pipeline::Scraper;

use handlers::{
    health_handler, method_not_allowed, preflight_handler, scrape_handler, status_handler,
};
pub use types::{
    ApiError, AppState, ErrorBody, ScrapeRequest, StatusResponse, MSG_BLOCKED, MSG_GENERIC,
    MSG_INVALID_URL, MSG_METHOD_NOT_ALLOWED, MSG_NOT_FOUND, MSG_TIMEOUT, MSG_URL_REQUIRED,
};

/// Wildcard-origin CORS policy for the API.
///
/// Credentials are not allowed: browsers reject them alongside a `*` origin.
pub fn cors_layer() -> CorsLayer {
    let methods: Vec<Method> = CORS_ALLOWED_METHODS
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();
    let headers: Vec<HeaderName> = CORS_ALLOWED_HEADERS
        .iter()
        .copied()
        .map(HeaderName::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers(headers)
}

/// Builds the application router around `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/scrape",
            post(scrape_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .route("/api/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer())
        .with_state(state)
}

/// Builds the scraper from `config` and serves until a shutdown signal.
///
/// # Errors
///
/// Returns an error if the transport chain cannot be built, the listener
/// cannot bind, or the server fails while running.
pub async fn serve(config: Config) -> Result<(), anyhow::Error> {
    let scraper = Scraper::from_config(&config).context("Failed to initialize scraper")?;
    let state = AppState::new(scraper, config.expose_technical_errors);
    let stats = Arc::clone(state.scraper.stats());
    let start_time = Arc::clone(&state.start_time);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    log::info!("Listening on http://{}/", config.bind);
    log::info!("  - Scrape: POST http://{}/api/scrape", config.bind);
    log::info!("  - Status: http://{}/api/status", config.bind);
    if config.expose_technical_errors {
        log::warn!("Technical error details are included in API responses");
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    print_final_statistics(&stats, start_time.elapsed().as_secs_f64());
    Ok(())
}
