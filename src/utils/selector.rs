//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector that must succeed.
///
/// Intended for the `LazyLock<Selector>` statics used by the extractors, whose
/// selector strings are constants.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_unsafe_accepts_valid_selector() {
        let selector = parse_selector_unsafe("meta[property^='og:']", "test");
        let html = scraper::Html::parse_document(r#"<meta property="og:title" content="x">"#);
        assert_eq!(html.select(&selector).count(), 1);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_parse_selector_unsafe_panics_on_invalid_selector() {
        parse_selector_unsafe("a[", "test");
    }
}
