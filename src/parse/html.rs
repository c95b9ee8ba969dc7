//! Head-level HTML extraction.
//!
//! This module provides functions to extract document-level fields:
//! - Page title
//! - Meta description (falling back to Open Graph)
//! - Meta keywords
//! - Document language
//!
//! These read the raw document, since the sanitizer strips `<meta>` tags.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::{ExtractionLimits, DEFAULT_LANGUAGE, NO_DESCRIPTION, NO_TITLE};
use crate::utils::{collapse_whitespace, truncate_chars};

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";
const META_DESCRIPTION_SELECTOR_STR: &str = "meta[name='description']";
const OG_DESCRIPTION_SELECTOR_STR: &str = "meta[property='og:description']";
const META_KEYWORDS_SELECTOR_STR: &str = "meta[name='keywords']";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(TITLE_SELECTOR_STR, "TITLE_SELECTOR"));
static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe(META_DESCRIPTION_SELECTOR_STR, "META_DESCRIPTION_SELECTOR")
});
static OG_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe(OG_DESCRIPTION_SELECTOR_STR, "OG_DESCRIPTION_SELECTOR")
});
static META_KEYWORDS_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe(META_KEYWORDS_SELECTOR_STR, "META_KEYWORDS_SELECTOR")
});

/// Extracts the page title from an HTML document.
///
/// Uses the first `<title>` element. Entities are decoded by the parser and
/// internal whitespace is collapsed. Returns `"No title found"` if the element
/// is missing or blank.
pub fn extract_title(document: &Html) -> String {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .unwrap_or_default();

    if title.is_empty() {
        log::debug!("No title element found in document");
        NO_TITLE.to_string()
    } else {
        title
    }
}

/// Extracts the meta description.
///
/// Prefers `<meta name="description">`, then `<meta property="og:description">`.
/// Blank values are skipped. Returns `"No description found"` if neither has content.
pub fn extract_meta_description(document: &Html) -> String {
    [&*META_DESCRIPTION_SELECTOR, &*OG_DESCRIPTION_SELECTOR]
        .into_iter()
        .filter_map(|selector| {
            document
                .select(selector)
                .next()
                .and_then(|element| element.value().attr("content"))
                .map(str::trim)
                .filter(|content| !content.is_empty())
        })
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Extracts meta keywords from an HTML document.
///
/// Parses the comma-separated `<meta name="keywords">` content, trimming and
/// lower-casing each entry and dropping empty ones. Keyword count and length
/// are capped by `limits`; a missing tag yields an empty list.
pub fn extract_meta_keywords(document: &Html, limits: &ExtractionLimits) -> Vec<String> {
    document
        .select(&META_KEYWORDS_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| {
            content
                .split(',')
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .take(limits.max_keywords)
                .map(|keyword| truncate_chars(&keyword, limits.max_item_text_chars))
                .collect()
        })
        .unwrap_or_default()
}

/// Returns the root element's `lang` attribute, or `"en"`.
pub fn extract_language(document: &Html) -> String {
    document
        .root_element()
        .value()
        .attr("lang")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}
