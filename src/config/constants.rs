//! Configuration constants.
//!
//! This module defines the default values used throughout the application,
//! including per-strategy timeouts, size limits, and extraction caps.

/// Default listen address for the scrape endpoint
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

// Transport timeouts
/// Direct fetch timeout in seconds
pub const DIRECT_TIMEOUT_SECS: u64 = 15;
/// Upstream forward-proxy fetch timeout in seconds
pub const PROXY_TIMEOUT_SECS: u64 = 30;
/// Third-party relay fetch timeout in seconds
/// Relays fetch the page themselves before answering, so they get more room than a direct fetch
pub const RELAY_TIMEOUT_SECS: u64 = 20;
/// Minimal-header fallback timeout in seconds
pub const SIMPLE_TIMEOUT_SECS: u64 = 10;
/// Deadline for the whole strategy chain in seconds
/// Each attempt is clamped to whatever is left of this budget
pub const OVERALL_TIMEOUT_SECS: u64 = 45;
/// Pause between two strategy attempts in milliseconds
pub const ATTEMPT_DELAY_MS: u64 = 500;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum number of redirect hops to follow per attempt
pub const MAX_REDIRECT_HOPS: usize = 5;

/// Maximum response body size in bytes (2MB)
/// Bodies larger than this fail the attempt instead of being buffered
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum technical error message length in characters
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

/// Default relay template. `{url}` is replaced with the percent-encoded target URL.
pub const DEFAULT_RELAY: &str = "raw|https://api.allorigins.win/raw?url={url}";

/// Placeholder substituted into relay templates
pub const RELAY_URL_PLACEHOLDER: &str = "{url}";

/// Browser User-Agent strings rotated across requests.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
];

/// User-Agent sent by the minimal-header strategy
pub const MINIMAL_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Element nesting depth beyond which the sanitizer keeps only the subtree's text
pub const MAX_SANITIZE_DEPTH: usize = 256;

// Extraction caps (defaults for `ExtractionLimits`)
pub const MAX_TEXT_CHARS: usize = 10_000;
pub const MAX_HTML_CHARS: usize = 100_000;
pub const MAX_LINKS: usize = 50;
pub const MAX_LINK_TEXT_CHARS: usize = 200;
pub const MAX_IMAGES: usize = 30;
pub const MAX_HEADINGS: usize = 50;
pub const MAX_PARAGRAPHS: usize = 100;
/// Paragraphs must be strictly longer than this (in characters) to be kept
pub const MIN_PARAGRAPH_CHARS: usize = 10;
pub const MAX_LISTS: usize = 20;
pub const MAX_LIST_ITEMS: usize = 20;
pub const MAX_TABLES: usize = 10;
pub const MAX_TABLE_ROWS: usize = 10;
pub const MAX_TABLE_CELLS: usize = 20;
/// Per-item text cap for headings, paragraphs, list items, cells, keywords, title and description
pub const MAX_ITEM_TEXT_CHARS: usize = 1000;
pub const MAX_KEYWORDS: usize = 50;
pub const MAX_METADATA_ENTRIES: usize = 100;
pub const MAX_METADATA_VALUE_CHARS: usize = 1000;

// Placeholders
pub const NO_TITLE: &str = "No title found";
pub const NO_DESCRIPTION: &str = "No description found";
pub const NO_LINK_TEXT: &str = "No text";
pub const NO_ALT_TEXT: &str = "No alt text";
pub const DEFAULT_LANGUAGE: &str = "en";
