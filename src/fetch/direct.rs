//! Strategies that fetch the target URL directly.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::{categorize_reqwest_error, TransportError};

use super::body::{ensure_success, read_bounded_body};
use super::request::HeaderProfile;
use super::strategy::{AttemptContext, TransportStrategy};

/// Plain GET of the target URL with a fixed header profile.
///
/// Used twice in the default chain: `direct` (browser profile, first) and
/// `simple` (minimal profile, last resort).
pub struct DirectStrategy {
    name: String,
    client: reqwest::Client,
    profile: HeaderProfile,
    timeout: Duration,
}

impl DirectStrategy {
    pub fn new(
        name: impl Into<String>,
        client: reqwest::Client,
        profile: HeaderProfile,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            profile,
            timeout,
        }
    }
}

#[async_trait]
impl TransportStrategy for DirectStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(&self, url: &Url, ctx: &AttemptContext) -> Result<String, TransportError> {
        let request = self
            .profile
            .apply(self.client.get(url.as_str()), &ctx.user_agent)
            .timeout(self.timeout);

        let response = request
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e, self.timeout))?;

        log::debug!(
            "[{}] {} answered {} (final URL {})",
            self.name,
            url,
            response.status(),
            response.url()
        );

        ensure_success(&response)?;
        read_bounded_body(response, MAX_RESPONSE_BODY_SIZE, self.timeout).await
    }
}
