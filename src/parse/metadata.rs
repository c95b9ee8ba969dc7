//! `<meta>` tag collection (Open Graph, Twitter Cards and a few named tags).

use std::collections::BTreeMap;

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::ExtractionLimits;
use crate::utils::truncate_chars;

const META_SELECTOR_STR: &str = "meta[content]";

/// Named (non-prefixed) meta tags that are collected.
const NAMED_META_KEYS: &[&str] = &["keywords", "author", "viewport", "robots"];

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(META_SELECTOR_STR, "META_SELECTOR"));

fn is_collected(key: &str) -> bool {
    key.starts_with("og:") || key.starts_with("twitter:") || NAMED_META_KEYS.contains(&key)
}

/// Collects meta tags into an ordered map.
///
/// The key is the tag's `property` or `name` attribute, lower-cased. The first
/// occurrence of a key wins. Values are truncated to
/// `limits.max_metadata_value_chars` and at most `limits.max_metadata_entries`
/// keys are kept.
pub fn extract_metadata(document: &Html, limits: &ExtractionLimits) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    for element in document.select(&META_SELECTOR) {
        if metadata.len() >= limits.max_metadata_entries {
            break;
        }

        let attrs = element.value();
        let Some(key) = attrs.attr("property").or_else(|| attrs.attr("name")) else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if !is_collected(&key) || metadata.contains_key(&key) {
            continue;
        }

        let value = attrs.attr("content").unwrap_or_default().trim();
        metadata.insert(key, truncate_chars(value, limits.max_metadata_value_chars));
    }

    metadata
}
