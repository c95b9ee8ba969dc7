//! The transport strategy abstraction.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error_handling::TransportError;

/// Per-request selection state handed to every strategy.
///
/// Strategies own no mutable state; anything that rotates across requests
/// (User-Agent, upstream proxy) is chosen once per request by
/// [`Rotation`](super::Rotation) and passed in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptContext {
    /// Browser User-Agent to send with browser-profile requests
    pub user_agent: String,
    /// Rotation slot; strategies with a pool (proxies) index it modulo the pool size
    pub slot: usize,
}

/// One technique for fetching a page's bytes.
///
/// Implementations perform exactly one bounded network fetch per call and
/// never retry internally; fallback is the orchestrator's job.
#[async_trait]
pub trait TransportStrategy: Send + Sync {
    /// Name reported as the `method` of a successful scrape.
    fn name(&self) -> &str;

    /// Time budget for one attempt.
    fn timeout(&self) -> Duration;

    /// Fetches `url` and returns the page body.
    async fn attempt(&self, url: &Url, ctx: &AttemptContext) -> Result<String, TransportError>;
}
