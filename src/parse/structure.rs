//! Content structure extraction: headings, paragraphs, lists and tables.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::config::ExtractionLimits;
use crate::models::{Heading, List, ListKind, Table};
use crate::utils::{collapse_whitespace, truncate_chars};

const HEADING_SELECTOR_STR: &str = "h1, h2, h3, h4, h5, h6";
const PARAGRAPH_SELECTOR_STR: &str = "p";
const LIST_SELECTOR_STR: &str = "ul, ol";
const LIST_ITEM_SELECTOR_STR: &str = "li";
const TABLE_SELECTOR_STR: &str = "table";
const ROW_SELECTOR_STR: &str = "tr";
const CELL_SELECTOR_STR: &str = "td, th";

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(HEADING_SELECTOR_STR, "HEADING_SELECTOR"));
static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe(PARAGRAPH_SELECTOR_STR, "PARAGRAPH_SELECTOR")
});
static LIST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(LIST_SELECTOR_STR, "LIST_SELECTOR"));
static LIST_ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe(LIST_ITEM_SELECTOR_STR, "LIST_ITEM_SELECTOR")
});
static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(TABLE_SELECTOR_STR, "TABLE_SELECTOR"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(ROW_SELECTOR_STR, "ROW_SELECTOR"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(CELL_SELECTOR_STR, "CELL_SELECTOR"));

fn element_text(element: ElementRef<'_>, max_chars: usize) -> String {
    truncate_chars(&collapse_whitespace(&element.text().collect::<String>()), max_chars)
}

/// Extracts `h1`-`h6` in document order, skipping blank headings.
pub fn extract_headings(document: &Html, limits: &ExtractionLimits) -> Vec<Heading> {
    document
        .select(&HEADING_SELECTOR)
        .filter_map(|element| {
            let text = element_text(element, limits.max_item_text_chars);
            if text.is_empty() {
                return None;
            }
            // Selector guarantees h1..h6
            let level = element.value().name()[1..].parse::<u8>().ok()?;
            let id = element
                .value()
                .id()
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            Some(Heading { level, text, id })
        })
        .take(limits.max_headings)
        .collect()
}

/// Extracts paragraphs longer than `limits.min_paragraph_chars` characters.
pub fn extract_paragraphs(document: &Html, limits: &ExtractionLimits) -> Vec<String> {
    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|element| element_text(element, limits.max_item_text_chars))
        .filter(|text| text.chars().count() > limits.min_paragraph_chars)
        .take(limits.max_paragraphs)
        .collect()
}

/// Extracts `ul`/`ol` lists; lists without non-blank items are omitted.
///
/// Items include nested `li` descendants, so a nested list contributes to
/// both its parent and itself.
pub fn extract_lists(document: &Html, limits: &ExtractionLimits) -> Vec<List> {
    document
        .select(&LIST_SELECTOR)
        .filter_map(|element| {
            let kind = match element.value().name() {
                "ol" => ListKind::Ol,
                _ => ListKind::Ul,
            };
            let items: Vec<String> = element
                .select(&LIST_ITEM_SELECTOR)
                .map(|item| element_text(item, limits.max_item_text_chars))
                .filter(|item| !item.is_empty())
                .take(limits.max_list_items)
                .collect();
            (!items.is_empty()).then_some(List { kind, items })
        })
        .take(limits.max_lists)
        .collect()
}

/// Extracts tables as rows of cell text; empty rows and tables are omitted.
///
/// Rows, cells per row and cell text are all capped by `limits`.
pub fn extract_tables(document: &Html, limits: &ExtractionLimits) -> Vec<Table> {
    document
        .select(&TABLE_SELECTOR)
        .filter_map(|table| {
            let rows: Vec<Vec<String>> = table
                .select(&ROW_SELECTOR)
                .map(|row| {
                    row.select(&CELL_SELECTOR)
                        .take(limits.max_table_cells)
                        .map(|cell| element_text(cell, limits.max_item_text_chars))
                        .collect::<Vec<_>>()
                })
                .filter(|cells| !cells.is_empty())
                .take(limits.max_table_rows)
                .collect();
            (!rows.is_empty()).then_some(Table { rows })
        })
        .take(limits.max_tables)
        .collect()
}
