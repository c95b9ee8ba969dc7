//! Error type definitions.
//!
//! This module defines the per-attempt transport failures, the terminal
//! retrieval failure, and the top-level scrape error surfaced to callers.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Invalid transport configuration (bad proxy URL, empty strategy list, ...).
    #[error("Transport configuration error: {0}")]
    TransportConfigError(String),
}

/// Broad class of a failure, used to pick the user-facing message and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// The upstream (or the chain deadline) ran out of time
    Timeout,
    /// The upstream refused us: 403/429/451, refused connection, relay rejection
    Blocked,
    /// The page does not exist: 404/410 or the host does not resolve
    NotFound,
    /// Anything else
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Blocked => "blocked",
            FailureKind::NotFound => "not_found",
            FailureKind::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single transport strategy attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The attempt exceeded its time budget.
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The TCP connection could not be established.
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    /// The host name could not be resolved.
    #[error("host could not be resolved: {0}")]
    Unresolved(String),

    /// The upstream answered with a non-success status.
    #[error("HTTP error status {0}")]
    HttpStatus(u16),

    /// A relay answered but did not hand back the page.
    #[error("relay rejected the request: {0}")]
    RelayRejected(String),

    /// Anything else that went wrong on the wire (redirect loops, oversized or undecodable bodies).
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl TransportError {
    /// Classifies this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::Timeout(_) => FailureKind::Timeout,
            TransportError::ConnectionRefused(_) | TransportError::RelayRejected(_) => {
                FailureKind::Blocked
            }
            TransportError::Unresolved(_) => FailureKind::NotFound,
            TransportError::HttpStatus(code) => match code {
                403 | 429 | 451 => FailureKind::Blocked,
                404 | 410 => FailureKind::NotFound,
                408 | 504 => FailureKind::Timeout,
                _ => FailureKind::Other,
            },
            TransportError::Protocol(_) => FailureKind::Other,
        }
    }
}

/// Terminal failure of the strategy chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// Every strategy was tried (or the chain deadline ran out) without a body.
    ///
    /// Only the most recent failure is kept; earlier ones are logged.
    #[error("all transports failed after {attempts} attempt(s); last ({method}): {last}")]
    AllTransportsFailed {
        /// Number of strategies actually invoked
        attempts: usize,
        /// Name of the strategy that produced `last`
        method: String,
        /// The most recent failure
        last: TransportError,
    },
}

impl RetrievalError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RetrievalError::AllTransportsFailed { last, .. } => last.kind(),
        }
    }
}

/// Errors surfaced by a scrape call.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The request carried no URL.
    #[error("URL is required")]
    MissingUrl,

    /// The input could not be turned into an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No transport strategy produced a body.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Sanitization or extraction failed.
    #[error("Failed to process page content: {0}")]
    Parse(String),
}

impl ScrapeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScrapeError::Retrieval(e) => e.kind(),
            ScrapeError::MissingUrl | ScrapeError::InvalidUrl(_) | ScrapeError::Parse(_) => {
                FailureKind::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_kind_as_str_unique() {
        let names: std::collections::HashSet<_> =
            FailureKind::iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), FailureKind::iter().count());
    }

    #[test]
    fn test_transport_error_kinds() {
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(1)).kind(),
            FailureKind::Timeout
        );
        assert_eq!(TransportError::HttpStatus(403).kind(), FailureKind::Blocked);
        assert_eq!(TransportError::HttpStatus(429).kind(), FailureKind::Blocked);
        assert_eq!(TransportError::HttpStatus(404).kind(), FailureKind::NotFound);
        assert_eq!(TransportError::HttpStatus(410).kind(), FailureKind::NotFound);
        assert_eq!(TransportError::HttpStatus(504).kind(), FailureKind::Timeout);
        assert_eq!(TransportError::HttpStatus(500).kind(), FailureKind::Other);
        assert_eq!(
            TransportError::ConnectionRefused("refused".into()).kind(),
            FailureKind::Blocked
        );
        assert_eq!(
            TransportError::RelayRejected("empty".into()).kind(),
            FailureKind::Blocked
        );
        assert_eq!(
            TransportError::Unresolved("nx".into()).kind(),
            FailureKind::NotFound
        );
        assert_eq!(
            TransportError::Protocol("bad".into()).kind(),
            FailureKind::Other
        );
    }

    #[test]
    fn test_retrieval_error_takes_kind_of_last_failure() {
        let err = RetrievalError::AllTransportsFailed {
            attempts: 3,
            method: "simple".to_string(),
            last: TransportError::HttpStatus(404),
        };
        assert_eq!(err.kind(), FailureKind::NotFound);
        let msg = err.to_string();
        assert!(msg.contains("3 attempt"));
        assert!(msg.contains("simple"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_scrape_error_kind() {
        assert_eq!(ScrapeError::MissingUrl.kind(), FailureKind::Other);
        let err = ScrapeError::from(RetrievalError::AllTransportsFailed {
            attempts: 1,
            method: "direct".to_string(),
            last: TransportError::Timeout(Duration::from_secs(15)),
        });
        assert_eq!(err.kind(), FailureKind::Timeout);
    }
}
