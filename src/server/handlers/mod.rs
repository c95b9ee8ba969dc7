//! HTTP handlers.

mod scrape;
mod status;

pub use scrape::{method_not_allowed, preflight_handler, scrape_handler};
pub use status::{health_handler, status_handler};
