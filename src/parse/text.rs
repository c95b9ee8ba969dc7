//! Body text extraction.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::utils::collapse_whitespace;

const BODY_SELECTOR_STR: &str = "body";

/// Punctuation kept by [`clean_text`] besides letters, digits, `_` and whitespace.
const KEPT_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '-'];

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(BODY_SELECTOR_STR, "BODY_SELECTOR"));

/// Returns the text nodes of `<body>` joined by single spaces.
pub fn body_text(document: &Html) -> String {
    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| collapse_whitespace(&body.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}

/// Drops characters outside the safe subset, then collapses whitespace.
pub fn clean_text(text: &str) -> String {
    let filtered: String = text
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || *c == '_' || c.is_whitespace() || KEPT_PUNCTUATION.contains(c)
        })
        .collect();
    collapse_whitespace(&filtered)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
