//! User-Agent and proxy rotation across requests.
//!
//! The counter is the only mutable state shared between requests in the
//! transport layer. It is advanced with a single atomic `fetch_add`, so two
//! concurrent requests never observe the same read-then-increment window.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use crate::config::{RotationMode, DEFAULT_USER_AGENTS};

use super::strategy::AttemptContext;

/// Picks the per-request [`AttemptContext`].
#[derive(Debug)]
pub struct Rotation {
    user_agents: Vec<String>,
    mode: RotationMode,
    counter: AtomicUsize,
}

impl Rotation {
    /// Creates a rotation over `user_agents`.
    ///
    /// An empty list falls back to the built-in pool.
    pub fn new(user_agents: Vec<String>, mode: RotationMode) -> Self {
        let user_agents = if user_agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
        } else {
            user_agents
        };
        Self {
            user_agents,
            mode,
            counter: AtomicUsize::new(0),
        }
    }

    /// Chooses the User-Agent and rotation slot for one request.
    pub fn next_context(&self) -> AttemptContext {
        let slot = match self.mode {
            RotationMode::RoundRobin => self.counter.fetch_add(1, Ordering::Relaxed),
            RotationMode::Random => rand::rng().random_range(0..usize::MAX),
        };
        let user_agent = self.user_agents[slot % self.user_agents.len()].clone();
        log::debug!(
            "Rotation slot {slot} selected User-Agent: {}...",
            user_agent.chars().take(50).collect::<String>()
        );
        AttemptContext { user_agent, slot }
    }
}
