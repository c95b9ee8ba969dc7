//! HTTP header constants.
//!
//! This module defines the header values sent to upstream sites and the
//! cross-origin allow-lists advertised by the scrape endpoint.

// Browser profile header values
/// Accept header of a modern Chrome navigation request
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
/// Accept-Language header (English-speaking user)
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// Client hint brand list matching the Chrome User-Agents in the rotation pool
pub const BROWSER_SEC_CH_UA: &str =
    "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"131\", \"Google Chrome\";v=\"131\"";

/// HTTP methods allowed for cross-origin callers.
pub const CORS_ALLOWED_METHODS: &[&str] = &["GET", "OPTIONS", "PATCH", "DELETE", "POST", "PUT"];

/// Request headers allowed for cross-origin callers.
pub const CORS_ALLOWED_HEADERS: &[&str] = &[
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];
