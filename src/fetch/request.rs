//! HTTP request header profiles.
//!
//! A strategy either looks like a real browser navigation or sends the bare
//! minimum. Both are applied to a `reqwest::RequestBuilder` right before sending.

use reqwest::header::{self, HeaderName};

use crate::config::{
    BROWSER_ACCEPT, BROWSER_ACCEPT_LANGUAGE, BROWSER_SEC_CH_UA, MINIMAL_USER_AGENT,
};

/// Which headers a strategy sends.
///
/// # Browser profile
///
/// Mimics a Chrome navigation so header-based bot detection sees a plausible
/// request: content negotiation, language, `Sec-Fetch-*` and client hints.
/// `Accept-Encoding` is left to reqwest, which only advertises the codings it
/// can actually decode.
///
/// # Minimal profile
///
/// A short User-Agent and nothing else. Some sites block exactly the header
/// fingerprints the browser profile produces, so the last-resort strategy
/// deliberately looks different.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    Browser,
    Minimal,
}

impl HeaderProfile {
    /// Applies this profile to a request.
    ///
    /// `user_agent` is the rotated browser User-Agent for this request; the
    /// minimal profile ignores it.
    pub fn apply(
        self,
        builder: reqwest::RequestBuilder,
        user_agent: &str,
    ) -> reqwest::RequestBuilder {
        match self {
            HeaderProfile::Minimal => builder.header(header::USER_AGENT, MINIMAL_USER_AGENT),
            HeaderProfile::Browser => builder
                .header(header::USER_AGENT, user_agent)
                .header(header::ACCEPT, BROWSER_ACCEPT)
                .header(header::ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::UPGRADE_INSECURE_REQUESTS, "1")
                .header(HeaderName::from_static("sec-fetch-dest"), "document")
                .header(HeaderName::from_static("sec-fetch-mode"), "navigate")
                .header(HeaderName::from_static("sec-fetch-site"), "none")
                .header(HeaderName::from_static("sec-fetch-user"), "?1")
                .header(HeaderName::from_static("sec-ch-ua"), BROWSER_SEC_CH_UA)
                .header(HeaderName::from_static("sec-ch-ua-mobile"), "?0")
                .header(HeaderName::from_static("sec-ch-ua-platform"), "\"Windows\""),
        }
    }
}
