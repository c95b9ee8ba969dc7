//! page_scrape library: resilient single-page scraping
//!
//! This library fetches one web page through an ordered chain of fallback
//! transports (direct, upstream proxy, content relay, minimal headers),
//! strips non-content markup, and extracts a size-bounded structured
//! document: title, text, links, images, headings, lists, tables, metadata.
//!
//! # Example
//!
//! ```no_run
//! use page_scrape::{Config, Scraper};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     attempt_delay_ms: 0,
//!     ..Default::default()
//! };
//!
//! let scraper = Scraper::from_config(&config)?;
//! let document = scraper.scrape("example.com").await?;
//! println!("{} ({} words, fetched via {})",
//!          document.title, document.word_count, document.method);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod parse;
mod pipeline;
pub mod sanitizer;
pub mod server;
mod utils;

// Re-export public API
pub use app::{validate_and_normalize_url, NormalizedUrl};
pub use config::{Config, ExtractionLimits, LogFormat, LogLevel, RelayFormat, RelaySpec, RotationMode};
pub use error_handling::{
    FailureKind, InitializationError, ProcessingStats, RetrievalError, ScrapeError,
    TransportError,
};
pub use models::ExtractedDocument;
pub use pipeline::Scraper;
pub use server::{build_router, serve, AppState};
