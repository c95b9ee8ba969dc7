//! URL validation and normalization.

use std::fmt;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::ScrapeError;

/// Matches an explicit `scheme://` prefix so that `ftp://host` is rejected
/// instead of being turned into `https://ftp://host`.
static EXPLICIT_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*)://")
        .unwrap_or_else(|e| panic!("explicit scheme pattern must compile: {e}"))
});

/// An absolute http(s) URL derived from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    url: Url,
}

impl NormalizedUrl {
    /// `http` or `https`
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Validates and normalizes a URL.
///
/// Trims whitespace and adds an `https://` prefix if the input has no scheme,
/// then validates that the URL is syntactically valid and uses the http/https
/// scheme. Rejects inputs longer than `MAX_URL_LENGTH`.
///
/// # Errors
///
/// - `ScrapeError::MissingUrl` if the input is empty after trimming
/// - `ScrapeError::InvalidUrl` if the input is too long, unparseable, or uses another scheme
pub fn validate_and_normalize_url(raw: &str) -> Result<NormalizedUrl, ScrapeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        );
        return Err(ScrapeError::InvalidUrl(format!(
            "URL exceeds {MAX_URL_LENGTH} characters"
        )));
    }

    let normalized = match EXPLICIT_SCHEME.captures(trimmed) {
        Some(caps) => {
            let scheme = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                warn!("Rejecting unsupported scheme for URL: {trimmed}");
                return Err(ScrapeError::InvalidUrl(format!(
                    "unsupported scheme '{scheme}'"
                )));
            }
            trimmed.to_string()
        }
        None => format!("https://{trimmed}"),
    };

    let url = Url::parse(&normalized).map_err(|e| {
        warn!("Rejecting invalid URL {trimmed}: {e}");
        ScrapeError::InvalidUrl(e.to_string())
    })?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some_and(|h| !h.is_empty()) => {
            Ok(NormalizedUrl { url })
        }
        "http" | "https" => Err(ScrapeError::InvalidUrl("URL has no host".to_string())),
        other => Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}
