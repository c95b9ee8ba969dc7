//! Bounded response body reading.

use std::time::Duration;

use crate::error_handling::{categorize_reqwest_error, TransportError};

/// Fails the attempt unless the final status (after redirects) is a success.
pub(crate) fn ensure_success(response: &reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::HttpStatus(status.as_u16()))
    }
}

/// Reads a response body into a string, refusing bodies over `limit` bytes.
///
/// The declared `Content-Length` is checked first so oversized pages are
/// rejected without downloading them; chunked bodies are counted as they
/// arrive. Invalid UTF-8 is replaced rather than rejected.
pub(crate) async fn read_bounded_body(
    mut response: reqwest::Response,
    limit: usize,
    budget: Duration,
) -> Result<String, TransportError> {
    if let Some(declared) = response.content_length() {
        if declared > limit as u64 {
            return Err(TransportError::Protocol(format!(
                "response body of {declared} bytes exceeds limit of {limit} bytes"
            )));
        }
    }

    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| categorize_reqwest_error(&e, budget))?
    {
        if buf.len() + chunk.len() > limit {
            return Err(TransportError::Protocol(format!(
                "response body exceeds limit of {limit} bytes"
            )));
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
