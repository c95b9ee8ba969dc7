//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger (plain or JSON)
//! - HTTP client (redirect limit, connect timeout)
//! - Transport strategy chain and its orchestrator
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;
mod transport;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use transport::{init_orchestrator, init_strategies};
