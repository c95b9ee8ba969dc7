//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client shared by the direct, relay and fallback strategies.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirect following (up to `MAX_REDIRECT_HOPS` hops)
/// - A TCP connect timeout, so unroutable hosts fail fast
/// - Transparent gzip/brotli/deflate decoding
///
/// No User-Agent or request timeout is set here: both vary per strategy and
/// are applied to each request.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client() -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .build()
}
