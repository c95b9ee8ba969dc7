//! Structured page content returned by a scrape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything extracted from one page.
///
/// Every collection is bounded by the corresponding `ExtractionLimits` cap and
/// every `href`/`src` is an absolute http(s) URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    /// Normalized URL that was requested
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Filtered body text
    #[serde(rename = "text")]
    pub clean_text: String,
    /// Sanitized markup
    pub html: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub lists: Vec<List>,
    pub tables: Vec<Table>,
    pub metadata: BTreeMap<String, String>,
    pub language: String,
    pub word_count: usize,
    /// Name of the transport strategy that fetched the page
    pub method: String,
    /// Character count of `clean_text`
    pub content_length: usize,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    pub text: String,
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// Declared `width`/`height` attributes, verbatim (`"100"`, `"50%"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 for `h1` through 6 for `h6`
    pub level: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ul,
    Ol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}
