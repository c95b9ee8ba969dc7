//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (per-attempt, terminal, and top-level)
//! - Categorization of `reqwest` failures into transport errors
//! - Processing statistics tracking
//!
//! Failures are classified into a small set of kinds (timeout, blocked,
//! not found, other) that drive both the user-facing message and the HTTP status.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{FailureKind, InitializationError, RetrievalError, ScrapeError, TransportError};
