//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, ProcessingStats};

/// Logs the counters accumulated since startup.
///
/// Called once when the server shuts down.
pub fn print_final_statistics(stats: &ProcessingStats, uptime_seconds: f64) {
    let requests = stats.requests();
    info!(
        "Served {} scrape request{} ({} succeeded, {} failed) in {:.1}s",
        requests,
        if requests == 1 { "" } else { "s" },
        stats.succeeded(),
        stats.total_terminal_failures(),
        uptime_seconds
    );
    print_strategy_statistics(stats);
    print_error_statistics(stats);
}

fn print_strategy_statistics(stats: &ProcessingStats) {
    let mut wins: Vec<_> = stats.wins().into_iter().filter(|(_, n)| *n > 0).collect();
    if wins.is_empty() {
        return;
    }
    wins.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    info!("Winning strategies:");
    for (name, count) in wins {
        info!("   {}: {}", name, count);
    }
}

/// Logs failed attempts and failed requests, by failure kind.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let attempt_failures: usize = FailureKind::iter()
        .map(|kind| stats.get_attempt_failure_count(kind))
        .sum();
    if attempt_failures > 0 {
        info!("Failed attempts ({} total):", attempt_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_attempt_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    let terminal = stats.total_terminal_failures();
    if terminal > 0 {
        info!("Failed requests ({} total):", terminal);
        for kind in FailureKind::iter() {
            let count = stats.get_terminal_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
