//! Error categorization.
//!
//! Turns `reqwest` failures into transport errors the orchestrator can reason about.

use std::error::Error as StdError;
use std::time::Duration;

use super::types::TransportError;

/// Renders an error together with its `source()` chain.
///
/// `reqwest` keeps the interesting part (DNS failure, refused connection) in
/// nested sources, so the top-level `Display` alone is not enough.
pub fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !message.contains(&cause_msg) {
            message.push_str(": ");
            message.push_str(&cause_msg);
        }
        source = cause.source();
    }
    message
}

/// Heuristic for name-resolution failures hidden inside connect errors.
///
/// hyper's resolver errors are not exposed as typed errors, so we look at the message.
fn looks_like_dns_failure(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("dns")
        || msg.contains("failed to lookup")
        || msg.contains("name or service not known")
        || msg.contains("no such host")
        || msg.contains("nodename nor servname")
}

/// Categorizes a `reqwest::Error` into a `TransportError`.
///
/// HTTP status codes are checked first, then the reqwest error kind.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
/// * `budget` - The time budget of the attempt, reported on timeouts
pub fn categorize_reqwest_error(error: &reqwest::Error, budget: Duration) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::HttpStatus(status.as_u16());
    }

    let message = error_chain_message(error);

    if error.is_timeout() {
        TransportError::Timeout(budget)
    } else if error.is_connect() {
        if looks_like_dns_failure(&message) {
            TransportError::Unresolved(message)
        } else {
            TransportError::ConnectionRefused(message)
        }
    } else if error.is_redirect() {
        TransportError::Protocol(format!("redirect error: {message}"))
    } else if error.is_body() || error.is_decode() {
        TransportError::Protocol(format!("body error: {message}"))
    } else if looks_like_dns_failure(&message) {
        TransportError::Unresolved(message)
    } else {
        TransportError::Protocol(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(Inner);
    #[derive(Debug)]
    struct Inner;

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("error sending request")
        }
    }
    impl std::fmt::Display for Inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("dns error: failed to lookup address information")
        }
    }
    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }
    impl StdError for Inner {}

    #[test]
    fn test_error_chain_message_includes_sources() {
        let msg = error_chain_message(&Outer(Inner));
        assert_eq!(
            msg,
            "error sending request: dns error: failed to lookup address information"
        );
    }

    #[test]
    fn test_looks_like_dns_failure() {
        assert!(looks_like_dns_failure("dns error: failed to lookup address"));
        assert!(looks_like_dns_failure("Name or service not known"));
        assert!(!looks_like_dns_failure("Connection refused (os error 111)"));
    }

    #[tokio::test]
    async fn test_categorize_connection_refused() {
        // Port 1 on localhost is essentially never listening
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .expect_err("nothing listens on port 1");
        match categorize_reqwest_error(&err, Duration::from_secs(1)) {
            TransportError::ConnectionRefused(_) => {}
            other => panic!("expected ConnectionRefused, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_categorize_builder_error_is_protocol() {
        let client = reqwest::Client::new();
        let err = client
            .get("not a url")
            .send()
            .await
            .expect_err("invalid URL must fail");
        assert!(matches!(
            categorize_reqwest_error(&err, Duration::from_secs(1)),
            TransportError::Protocol(_)
        ));
    }
}
