//! Link and image extraction.
//!
//! Every `href`/`src` is resolved against the page URL and kept only if the
//! result is an absolute http(s) URL, so `javascript:`, `mailto:` and `data:`
//! references never reach the response.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::config::{ExtractionLimits, NO_ALT_TEXT, NO_LINK_TEXT};
use crate::models::{Dimensions, Image, Link};
use crate::utils::{collapse_whitespace, truncate_chars};

const ANCHOR_SELECTOR_STR: &str = "a[href]";
const IMAGE_SELECTOR_STR: &str = "img[src]";

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(ANCHOR_SELECTOR_STR, "ANCHOR_SELECTOR"));
static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(IMAGE_SELECTOR_STR, "IMAGE_SELECTOR"));

/// Resolves a reference found in the page against the page URL.
///
/// Handles the usual forms:
/// - `/path` resolves against the origin
/// - `./path` and bare `path` resolve against the base directory
/// - `#frag` keeps the page URL and replaces its fragment
/// - `//host/path` takes the page's scheme
///
/// Returns `None` for blank references and anything that does not end up as
/// an absolute `http`/`https` URL with a host.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = match href.strip_prefix('#') {
        Some(fragment) => {
            let mut target = base.clone();
            target.set_fragment(Some(fragment));
            target
        }
        None => base.join(href).ok()?,
    };

    match resolved.scheme() {
        "http" | "https" if resolved.host_str().is_some() => Some(resolved),
        _ => None,
    }
}

/// Extracts anchors in document order, up to `limits.max_links`.
pub fn extract_links(document: &Html, base: &Url, limits: &ExtractionLimits) -> Vec<Link> {
    let mut links = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        if links.len() >= limits.max_links {
            break;
        }

        let Some(resolved) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_href(base, href))
        else {
            continue;
        };

        let text = collapse_whitespace(&element.text().collect::<String>());
        let text = if text.is_empty() {
            NO_LINK_TEXT.to_string()
        } else {
            truncate_chars(&text, limits.max_link_text_chars)
        };

        links.push(Link {
            is_external: resolved.host_str() != base.host_str(),
            href: resolved.into(),
            text,
        });
    }

    links
}

/// Extracts images in document order, up to `limits.max_images`.
///
/// `dimensions` is present only when both `width` and `height` are declared.
/// `alt` and `title` are capped at `limits.max_item_text_chars`.
pub fn extract_images(document: &Html, base: &Url, limits: &ExtractionLimits) -> Vec<Image> {
    document
        .select(&IMAGE_SELECTOR)
        .filter_map(|element| {
            let attrs = element.value();
            let src = attrs.attr("src").and_then(|src| resolve_href(base, src))?;

            let alt = attrs
                .attr("alt")
                .map(str::trim)
                .filter(|alt| !alt.is_empty())
                .unwrap_or(NO_ALT_TEXT);
            let dimensions = match (attrs.attr("width"), attrs.attr("height")) {
                (Some(width), Some(height)) => Some(Dimensions {
                    width: width.trim().to_string(),
                    height: height.trim().to_string(),
                }),
                _ => None,
            };

            Some(Image {
                src: src.into(),
                alt: truncate_chars(alt, limits.max_item_text_chars),
                title: truncate_chars(
                    attrs.attr("title").map(str::trim).unwrap_or_default(),
                    limits.max_item_text_chars,
                ),
                dimensions,
            })
        })
        .take(limits.max_images)
        .collect()
}
