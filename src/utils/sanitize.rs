//! Utilities for sanitizing error text before it leaves the process.
//!
//! Technical error details can be echoed back to API clients (when enabled).
//! Control characters are stripped and the text is bounded so a pathological
//! upstream message cannot bloat a response.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

use super::text::truncate_chars;

/// Removes control characters, keeping newline, tab and carriage return.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Sanitizes and truncates an error message to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// Truncated messages end with a marker carrying the original length, and the
/// whole result (marker included) stays within the limit.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();

    if length <= MAX_ERROR_MESSAGE_LENGTH {
        return sanitized;
    }

    let marker = format!("... (truncated, original length: {length} chars)");
    let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(marker.chars().count());
    format!("{}{}", truncate_chars(&sanitized, keep), marker)
}
