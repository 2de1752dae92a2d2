//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected while a search-based player decides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Decisions made.
    pub decisions: u32,

    /// Playouts completed.
    pub simulations: u32,

    /// Samples thrown away because the action was illegal in the
    /// redeterminized copy or the playout hit an engine error.
    pub failed_samples: u32,

    /// Forward Model cycles run inside playouts.
    pub cycles: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.decisions += other.decisions;
        self.simulations += other.simulations;
        self.failed_samples += other.failed_samples;
        self.cycles += other.cycles;
        self.time_us += other.time_us;
    }

    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average playout length in Forward Model cycles.
    #[must_use]
    pub fn avg_cycles_per_simulation(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.cycles as f64 / self.simulations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_rates() {
        let mut stats = SearchStats::new();
        stats.simulations = 1000;
        stats.cycles = 20_000;
        stats.time_us = 1_000_000;

        assert_eq!(stats.simulations_per_second(), 1000.0);
        assert_eq!(stats.avg_cycles_per_simulation(), 20.0);
    }

    #[test]
    fn test_stats_merge_and_reset() {
        let mut total = SearchStats::new();
        let part = SearchStats {
            decisions: 1,
            simulations: 8,
            failed_samples: 2,
            cycles: 90,
            time_us: 10,
        };

        total.merge(&part);
        total.merge(&part);
        assert_eq!(total.simulations, 16);
        assert_eq!(total.failed_samples, 4);

        total.reset();
        assert_eq!(total, SearchStats::default());
    }
}
