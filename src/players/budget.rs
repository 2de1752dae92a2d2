//! Search budget parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How much work a search-based player may spend on one decision.
///
/// Running out of budget is the search's stopping condition, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Random playouts sampled per candidate action.
    pub rollouts_per_action: u32,

    /// Forward Model cycles allowed per playout before it is scored as a draw.
    pub max_cycles: u32,

    /// Wall-clock ceiling per decision (`None` = unlimited).
    pub time_limit: Option<Duration>,

    /// Random seed for the player's own RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Worker threads for rollouts (1 = evaluate on the calling thread).
    pub threads: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            rollouts_per_action: 16,
            max_cycles: 500,
            time_limit: None,
            seed: 42,
            threads: 1,
        }
    }
}

impl SearchBudget {
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts_per_action = rollouts;
        self
    }

    pub fn with_max_cycles(mut self, cycles: u32) -> Self {
        self.max_cycles = cycles;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}
