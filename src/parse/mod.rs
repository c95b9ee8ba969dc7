//! HTML parsing and data extraction.
//!
//! This module turns a fetched page into an [`ExtractedDocument`]:
//! - Title, description, keywords, language and meta tags (from the raw page)
//! - Body text, links, images, headings, paragraphs, lists and tables (from
//!   the sanitized page)
//!
//! All parsing is done using CSS selectors via the `scraper` crate, and every
//! collection is bounded by [`ExtractionLimits`].

mod html;
mod links;
mod metadata;
mod structure;
mod text;

use chrono::Utc;
use scraper::Html;
use url::Url;

use crate::config::ExtractionLimits;
use crate::models::ExtractedDocument;
use crate::utils::truncate_chars;

// Re-export public API
pub use html::{extract_language, extract_meta_description, extract_meta_keywords, extract_title};
pub use links::{extract_images, extract_links, resolve_href};
pub use metadata::extract_metadata;
pub use structure::{extract_headings, extract_lists, extract_paragraphs, extract_tables};
pub use text::{body_text, clean_text, word_count};

/// Builds the full document from a fetched page.
///
/// `raw_html` is the page as retrieved and `sanitized_html` the output of
/// [`crate::sanitizer::sanitize_html`] for it. `method` names the strategy that
/// fetched the page.
pub fn extract_document(
    raw_html: &str,
    sanitized_html: &str,
    page_url: &Url,
    method: &str,
    limits: &ExtractionLimits,
) -> ExtractedDocument {
    let raw = Html::parse_document(raw_html);
    let clean = Html::parse_document(sanitized_html);

    let body = body_text(&clean);
    let text = truncate_chars(&clean_text(&body), limits.max_text_chars);
    let content_length = text.chars().count();

    let document = ExtractedDocument {
        url: page_url.to_string(),
        title: truncate_chars(&extract_title(&raw), limits.max_item_text_chars),
        description: truncate_chars(&extract_meta_description(&raw), limits.max_item_text_chars),
        keywords: extract_meta_keywords(&raw, limits),
        clean_text: text,
        html: truncate_chars(sanitized_html, limits.max_html_chars),
        links: extract_links(&clean, page_url, limits),
        images: extract_images(&clean, page_url, limits),
        headings: extract_headings(&clean, limits),
        paragraphs: extract_paragraphs(&clean, limits),
        lists: extract_lists(&clean, limits),
        tables: extract_tables(&clean, limits),
        metadata: extract_metadata(&raw, limits),
        language: extract_language(&raw),
        word_count: word_count(&body),
        method: method.to_string(),
        content_length,
        scraped_at: Utc::now(),
    };

    log::debug!(
        "Extracted {}: {} chars, {} links, {} images, {} headings",
        page_url,
        document.content_length,
        document.links.len(),
        document.images.len(),
        document.headings.len()
    );

    document
}
