//! Main application modules.
//!
//! This module provides URL normalization, shutdown handling and the final
//! statistics summary used by the scrape pipeline and the server binary.

pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use shutdown::shutdown_signal;
pub use statistics::print_final_statistics;
pub use url::{validate_and_normalize_url, NormalizedUrl};
