//! Fetching through rotating upstream forward proxies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::ClientBuilder;
use url::Url;

use crate::config::{MAX_REDIRECT_HOPS, MAX_RESPONSE_BODY_SIZE, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::{categorize_reqwest_error, InitializationError, TransportError};

use super::body::{ensure_success, read_bounded_body};
use super::request::HeaderProfile;
use super::strategy::{AttemptContext, TransportStrategy};

/// Sends the browser-profile request through one of several forward proxies.
///
/// The proxy is picked from the request's rotation slot, so consecutive
/// requests spread over the pool without the strategy keeping a cursor.
pub struct ProxyStrategy {
    name: String,
    /// One client per proxy; reqwest binds proxies at client construction
    pool: Vec<(String, reqwest::Client)>,
    timeout: Duration,
}

impl ProxyStrategy {
    /// Builds a client for every proxy URL.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::TransportConfigError` if the list is empty or
    /// a proxy URL is invalid, and `HttpClientError` if a client cannot be built.
    pub fn new(
        name: impl Into<String>,
        proxies: &[String],
        timeout: Duration,
    ) -> Result<Self, InitializationError> {
        if proxies.is_empty() {
            return Err(InitializationError::TransportConfigError(
                "proxy strategy needs at least one proxy".to_string(),
            ));
        }

        let mut pool = Vec::with_capacity(proxies.len());
        for proxy in proxies {
            let upstream = reqwest::Proxy::all(proxy).map_err(|e| {
                InitializationError::TransportConfigError(format!("invalid proxy '{proxy}': {e}"))
            })?;
            let client = ClientBuilder::new()
                .proxy(upstream)
                .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
                .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
                .build()?;
            pool.push((proxy.clone(), client));
        }

        Ok(Self {
            name: name.into(),
            pool,
            timeout,
        })
    }

    /// The proxy used for a given rotation slot.
    pub fn proxy_for(&self, slot: usize) -> &str {
        &self.pool[slot % self.pool.len()].0
    }
}

#[async_trait]
impl TransportStrategy for ProxyStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(&self, url: &Url, ctx: &AttemptContext) -> Result<String, TransportError> {
        let (proxy, client) = &self.pool[ctx.slot % self.pool.len()];
        log::debug!("[{}] fetching {} via {}", self.name, url, proxy);

        let response = HeaderProfile::Browser
            .apply(client.get(url.as_str()), &ctx.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e, self.timeout))?;

        ensure_success(&response)?;
        read_bounded_body(response, MAX_RESPONSE_BODY_SIZE, self.timeout).await
    }
}
