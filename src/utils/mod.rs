//! Small shared helpers.
//!
//! This module provides:
//! - Error message sanitization for API responses
//! - Character-safe string truncation
//! - Static CSS selector parsing

pub mod sanitize;
mod selector;
mod text;

pub use selector::parse_selector_unsafe;
pub use text::{collapse_whitespace, truncate_chars};
