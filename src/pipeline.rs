//! The scrape pipeline: normalize, retrieve, sanitize, extract.

use std::sync::Arc;

use log::{error, info};

use crate::app::validate_and_normalize_url;
use crate::config::{Config, ExtractionLimits};
use crate::error_handling::{InitializationError, ProcessingStats, ScrapeError};
use crate::fetch::{Orchestrator, Rotation};
use crate::initialization::init_orchestrator;
use crate::models::ExtractedDocument;
use crate::parse::extract_document;
use crate::sanitizer::sanitize_html;

/// Runs scrapes; shared by all request handlers.
///
/// The only state mutated across calls is the rotation counter and the
/// statistics, both atomic.
pub struct Scraper {
    orchestrator: Orchestrator,
    rotation: Rotation,
    limits: ExtractionLimits,
    stats: Arc<ProcessingStats>,
}

impl Scraper {
    pub fn new(orchestrator: Orchestrator, rotation: Rotation, limits: ExtractionLimits) -> Self {
        let stats = Arc::new(ProcessingStats::new(orchestrator.strategy_names()));
        Self {
            orchestrator,
            rotation,
            limits,
            stats,
        }
    }

    /// Builds the default strategy chain, rotation and limits from `config`.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the transport chain cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let orchestrator = init_orchestrator(config)?;
        let rotation = Rotation::new(config.user_agents.clone(), config.rotation);
        Ok(Self::new(orchestrator, rotation, config.limits.clone()))
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Scrapes one page.
    ///
    /// # Errors
    ///
    /// - `ScrapeError::MissingUrl` / `InvalidUrl` for unusable input (no network I/O happens)
    /// - `ScrapeError::Retrieval` if every transport strategy failed
    /// - `ScrapeError::Parse` if the extraction task could not complete
    pub async fn scrape(&self, raw_input: &str) -> Result<ExtractedDocument, ScrapeError> {
        self.stats.record_request();
        let result = self.run(raw_input).await;
        match &result {
            Ok(document) => self.stats.record_success(&document.method),
            Err(e) => {
                error!("Scrape of '{}' failed: {}", raw_input.trim(), e);
                self.stats.record_terminal_failure(e.kind());
            }
        }
        result
    }

    async fn run(&self, raw_input: &str) -> Result<ExtractedDocument, ScrapeError> {
        let url = validate_and_normalize_url(raw_input)?;
        let ctx = self.rotation.next_context();

        let retrieved = self
            .orchestrator
            .retrieve(url.as_url(), &ctx, |_, failure| {
                self.stats.record_attempt_failure(failure.kind())
            })
            .await?;

        let page_url = url.as_url().clone();
        let limits = self.limits.clone();
        let method = retrieved.method;
        let raw = retrieved.body;

        // Parsing is CPU-bound and scraper's DOM is !Send
        let document = tokio::task::spawn_blocking(move || {
            let sanitized = sanitize_html(&raw);
            extract_document(&raw, &sanitized, &page_url, &method, &limits)
        })
        .await
        .map_err(|e| ScrapeError::Parse(e.to_string()))?;

        info!(
            "Scraped {} via '{}' ({} chars, {} links)",
            document.url,
            document.method,
            document.content_length,
            document.links.len()
        );
        Ok(document)
    }
}
