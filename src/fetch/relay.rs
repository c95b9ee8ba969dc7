//! Fetching through a third-party content relay.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::{RelayFormat, RelaySpec, MAX_RESPONSE_BODY_SIZE, RELAY_URL_PLACEHOLDER};
use crate::error_handling::{categorize_reqwest_error, TransportError};

use super::body::read_bounded_body;
use super::request::HeaderProfile;
use super::strategy::{AttemptContext, TransportStrategy};

/// Asks a relay service to fetch the page on our behalf.
///
/// The target URL is percent-encoded into the relay's URL template. Relays
/// that wrap the page in JSON are unwrapped according to [`RelayFormat`].
pub struct RelayStrategy {
    name: String,
    client: reqwest::Client,
    relay: RelaySpec,
    timeout: Duration,
}

impl RelayStrategy {
    pub fn new(
        name: impl Into<String>,
        client: reqwest::Client,
        relay: RelaySpec,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            relay,
            timeout,
        }
    }

    /// Rewrites `target` into the relay URL.
    pub fn relay_url(&self, target: &Url) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
        self.relay.template.replace(RELAY_URL_PLACEHOLDER, &encoded)
    }

    fn unwrap_body(&self, body: String) -> Result<String, TransportError> {
        let page = match &self.relay.format {
            RelayFormat::Raw => body,
            RelayFormat::Json(field) => {
                let envelope: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
                    TransportError::RelayRejected(format!("relay returned invalid JSON: {e}"))
                })?;
                envelope
                    .get(field)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        TransportError::RelayRejected(format!(
                            "relay response has no '{field}' string"
                        ))
                    })?
            }
        };

        if page.trim().is_empty() {
            return Err(TransportError::RelayRejected(
                "relay returned no content".to_string(),
            ));
        }
        Ok(page)
    }
}

#[async_trait]
impl TransportStrategy for RelayStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(&self, url: &Url, ctx: &AttemptContext) -> Result<String, TransportError> {
        let relay_url = self.relay_url(url);
        log::debug!("[{}] relaying {} via {}", self.name, url, relay_url);

        let response = HeaderProfile::Browser
            .apply(self.client.get(&relay_url), &ctx.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            // Relays pass "not found" through; everything else is the relay refusing us
            return Err(match status.as_u16() {
                code @ (404 | 410) => TransportError::HttpStatus(code),
                code => TransportError::RelayRejected(format!("relay answered HTTP {code}")),
            });
        }

        let body = read_bounded_body(response, MAX_RESPONSE_BODY_SIZE, self.timeout).await?;
        self.unwrap_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> AttemptContext {
        AttemptContext {
            user_agent: "Agent".to_string(),
            slot: 0,
        }
    }

    fn relay(server: &MockServer, spec: &str) -> RelayStrategy {
        let spec: RelaySpec = spec.replace("{base}", &server.uri()).parse().unwrap();
        RelayStrategy::new(
            "cors-proxy",
            reqwest::Client::new(),
            spec,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_relay_url_encodes_target() {
        let strategy = RelayStrategy::new(
            "cors-proxy",
            reqwest::Client::new(),
            "raw|https://relay.test/raw?url={url}".parse().unwrap(),
            Duration::from_secs(1),
        );
        let target = Url::parse("https://example.com/a b?x=1&y=2").unwrap();
        assert_eq!(
            strategy.relay_url(&target),
            "https://relay.test/raw?url=https%3A%2F%2Fexample.com%2Fa%2520b%3Fx%3D1%26y%3D2"
        );
    }

    #[tokio::test]
    async fn test_raw_relay_returns_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .and(query_param("url", "https://example.com/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>relayed</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let strategy = relay(&server, "raw|{base}/raw?url={url}");
        let body = strategy
            .attempt(&Url::parse("https://example.com/").unwrap(), &ctx())
            .await
            .unwrap();
        assert_eq!(body, "<p>relayed</p>");
    }

    #[tokio::test]
    async fn test_json_relay_unwraps_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contents": "<p>wrapped</p>",
                "status": { "http_code": 200 }
            })))
            .mount(&server)
            .await;

        let strategy = relay(&server, "json:contents|{base}/get?url={url}");
        let body = strategy
            .attempt(&Url::parse("https://example.com/").unwrap(), &ctx())
            .await
            .unwrap();
        assert_eq!(body, "<p>wrapped</p>");
    }

    #[tokio::test]
    async fn test_json_relay_without_content_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contents": null
            })))
            .mount(&server)
            .await;

        let strategy = relay(&server, "json:contents|{base}/get?url={url}");
        let err = strategy
            .attempt(&Url::parse("https://example.com/").unwrap(), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::RelayRejected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_relay_error_status_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let strategy = relay(&server, "raw|{base}/raw?url={url}");
        let err = strategy
            .attempt(&Url::parse("https://example.com/").unwrap(), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::RelayRejected(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_empty_raw_relay_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("   "))
            .mount(&server)
            .await;

        let strategy = relay(&server, "raw|{base}/raw?url={url}");
        let err = strategy
            .attempt(&Url::parse("https://example.com/").unwrap(), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::RelayRejected(_)), "got {err:?}");
    }
}
