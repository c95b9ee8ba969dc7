//! Processing statistics tracking.
//!
//! Thread-safe counters for scrape requests, winning strategies, and failures.
//! These are the only values shared across requests besides the rotation counter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe processing statistics tracker.
///
/// Tracks requests and their outcomes using atomic counters, allowing
/// concurrent access from multiple request handlers. All keys are created
/// up front so recording never allocates or locks.
///
/// # Categories
///
/// - **Attempt failures**: every failed strategy attempt, by kind
/// - **Terminal failures**: requests that ended in an error, by kind
/// - **Wins**: successful requests, by the strategy that produced the body
pub struct ProcessingStats {
    requests: AtomicUsize,
    succeeded: AtomicUsize,
    attempt_failures: HashMap<FailureKind, AtomicUsize>,
    terminal_failures: HashMap<FailureKind, AtomicUsize>,
    wins: HashMap<String, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker for the given strategy names.
    pub fn new<I, S>(strategy_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attempt_failures = FailureKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        let terminal_failures = FailureKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        let wins = strategy_names
            .into_iter()
            .map(|name| (name.into(), AtomicUsize::new(0)))
            .collect();

        ProcessingStats {
            requests: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            attempt_failures,
            terminal_failures,
            wins,
        }
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful request served by `method`.
    pub fn record_success(&self, method: &str) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        match self.wins.get(method) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => log::warn!("No win counter for strategy '{method}'"),
        }
    }

    pub fn record_attempt_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.attempt_failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_terminal_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.terminal_failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    pub fn get_attempt_failure_count(&self, kind: FailureKind) -> usize {
        self.attempt_failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_terminal_failure_count(&self, kind: FailureKind) -> usize {
        self.terminal_failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_terminal_failures(&self) -> usize {
        FailureKind::iter()
            .map(|k| self.get_terminal_failure_count(k))
            .sum()
    }

    /// Win counts per strategy name.
    pub fn wins(&self) -> HashMap<String, usize> {
        self.wins
            .iter()
            .map(|(name, c)| (name.clone(), c.load(Ordering::SeqCst)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new(["direct", "simple"]);
        assert_eq!(stats.requests(), 0);
        assert_eq!(stats.succeeded(), 0);
        for kind in FailureKind::iter() {
            assert_eq!(stats.get_attempt_failure_count(kind), 0);
            assert_eq!(stats.get_terminal_failure_count(kind), 0);
        }
        assert_eq!(stats.wins().len(), 2);
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new(["direct", "simple"]);
        stats.record_request();
        stats.record_request();
        stats.record_success("simple");
        stats.record_attempt_failure(FailureKind::Blocked);
        stats.record_terminal_failure(FailureKind::Timeout);

        assert_eq!(stats.requests(), 2);
        assert_eq!(stats.succeeded(), 1);
        assert_eq!(stats.wins()["simple"], 1);
        assert_eq!(stats.wins()["direct"], 0);
        assert_eq!(stats.get_attempt_failure_count(FailureKind::Blocked), 1);
        assert_eq!(stats.total_terminal_failures(), 1);
    }

    #[test]
    fn test_processing_stats_unknown_strategy_does_not_panic() {
        let stats = ProcessingStats::new(["direct"]);
        stats.record_success("unknown");
        assert_eq!(stats.succeeded(), 1);
        assert_eq!(stats.wins()["direct"], 0);
    }
}
