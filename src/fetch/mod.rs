//! Page retrieval.
//!
//! This module provides:
//! - The `TransportStrategy` abstraction and its implementations
//!   (direct, upstream proxy, third-party relay)
//! - Header profiles and bounded body reading shared by the strategies
//! - Per-request rotation of User-Agent and proxy
//! - The `Orchestrator` that falls back through strategies in order

mod body;
mod direct;
mod orchestrator;
mod proxy;
mod relay;
mod request;
mod rotation;
mod strategy;

// Re-export public API
pub use direct::DirectStrategy;
pub use orchestrator::{Orchestrator, Retrieved};
pub use proxy::ProxyStrategy;
pub use relay::RelayStrategy;
pub use request::HeaderProfile;
pub use rotation::Rotation;
pub use strategy::{AttemptContext, TransportStrategy};
