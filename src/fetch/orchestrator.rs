//! Sequential fallback across transport strategies.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use url::Url;

use crate::error_handling::{InitializationError, RetrievalError, TransportError};

use super::strategy::{AttemptContext, TransportStrategy};

/// Body fetched by the first successful strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieved {
    pub body: String,
    /// Name of the strategy that produced `body`
    pub method: String,
}

/// Tries strategies one after another until one returns a body.
///
/// The chain is strictly sequential: no two strategies run at the same time
/// for the same request, and the first success ends the run. Each attempt is
/// bounded by the smaller of its own timeout and what is left of the overall
/// deadline.
pub struct Orchestrator {
    strategies: Vec<Box<dyn TransportStrategy>>,
    attempt_delay: Duration,
    deadline: Duration,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("strategies", &self.strategy_names())
            .field("attempt_delay", &self.attempt_delay)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl Orchestrator {
    /// Creates an orchestrator over `strategies`, tried in the given order.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::TransportConfigError` if `strategies` is empty.
    pub fn new(
        strategies: Vec<Box<dyn TransportStrategy>>,
        attempt_delay: Duration,
        deadline: Duration,
    ) -> Result<Self, InitializationError> {
        if strategies.is_empty() {
            return Err(InitializationError::TransportConfigError(
                "at least one transport strategy is required".to_string(),
            ));
        }
        Ok(Self {
            strategies,
            attempt_delay,
            deadline,
        })
    }

    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.name().to_string()).collect()
    }

    /// Fetches `url`, falling back through the strategy list.
    ///
    /// `on_failure` is called once per failed attempt (used for statistics);
    /// it does not influence the control flow.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::AllTransportsFailed` carrying the last failure
    /// if no strategy produced a body before the list or the deadline ran out.
    pub async fn retrieve<F>(
        &self,
        url: &Url,
        ctx: &AttemptContext,
        mut on_failure: F,
    ) -> Result<Retrieved, RetrievalError>
    where
        F: FnMut(&str, &TransportError),
    {
        let started = Instant::now();
        let mut attempts = 0;
        let mut last: Option<(String, TransportError)> = None;

        for (index, strategy) in self.strategies.iter().enumerate() {
            let remaining = self.deadline.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                warn!(
                    "Deadline of {:?} exhausted for {}, skipping '{}' and later strategies",
                    self.deadline,
                    url,
                    strategy.name()
                );
                // Skipped strategies are not reported; the timeout belongs to the last one run
                let method = last.map(|(name, _)| name).unwrap_or_default();
                last = Some((method, TransportError::Timeout(self.deadline)));
                break;
            }

            let budget = strategy.timeout().min(remaining);
            attempts += 1;
            debug!(
                "Trying strategy {}/{} '{}' for {} (budget {:?})",
                index + 1,
                self.strategies.len(),
                strategy.name(),
                url,
                budget
            );

            let outcome = match tokio::time::timeout(budget, strategy.attempt(url, ctx)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(TransportError::Timeout(budget)),
            };

            match outcome {
                Ok(body) => {
                    info!(
                        "Fetched {} with strategy '{}' ({} bytes, attempt {})",
                        url,
                        strategy.name(),
                        body.len(),
                        attempts
                    );
                    return Ok(Retrieved {
                        body,
                        method: strategy.name().to_string(),
                    });
                }
                Err(error) => {
                    warn!("Strategy '{}' failed for {}: {}", strategy.name(), url, error);
                    on_failure(strategy.name(), &error);
                    last = Some((strategy.name().to_string(), error));
                }
            }

            let is_last = index + 1 == self.strategies.len();
            if !is_last && !self.attempt_delay.is_zero() {
                let left = self.deadline.saturating_sub(started.elapsed());
                tokio::time::sleep(self.attempt_delay.min(left)).await;
            }
        }

        // `strategies` is never empty, so either a failure or the deadline was recorded
        let (method, last) = last.unwrap_or_else(|| {
            (
                String::new(),
                TransportError::Protocol("no strategy was attempted".to_string()),
            )
        });
        Err(RetrievalError::AllTransportsFailed {
            attempts,
            method,
            last,
        })
    }
}
