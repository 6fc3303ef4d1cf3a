//! Statistics collection for Monte Carlo searches
//!
//! This module provides structures for collecting and reporting per-candidate trial
//! outcomes and overall search figures.

use std::time::Duration;

use crate::action::Action;

/// Trial outcomes for one candidate action
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStats {
    pub action: Action,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// +1 per win, -1 per loss
    pub value: i64,
}

impl CandidateStats {
    pub fn new(action: Action) -> Self {
        CandidateStats {
            action,
            wins: 0,
            losses: 0,
            draws: 0,
            value: 0,
        }
    }

    pub fn trials(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Wins over trials, `None` before the first trial
    pub fn win_ratio(&self) -> Option<f64> {
        match self.trials() {
            0 => None,
            trials => Some(f64::from(self.wins) / f64::from(trials)),
        }
    }
}

/// Statistics collected during a Monte Carlo search
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Number of completed trials
    pub trials: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Whether the wall-clock budget stopped the search
    pub stopped_early: bool,

    /// Whether the heuristic action was played instead of the best ratio
    pub used_fallback: bool,

    /// Per-candidate outcomes, in candidate order
    pub candidates: Vec<CandidateStats>,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of trials per second
    pub fn trials_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.trials as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Monte Carlo Search Statistics:\n\
             - Trials: {}\n\
             - Total time: {:.3} seconds\n\
             - Trials per second: {:.1}\n\
             - Stopped early: {}\n\
             - Used fallback: {}",
            self.trials,
            self.total_time.as_secs_f64(),
            self.trials_per_second(),
            self.stopped_early,
            self.used_fallback
        );

        for candidate in &self.candidates {
            let ratio = candidate.win_ratio().map_or(0.0, |r| r * 100.0);
            summary.push_str(&format!(
                "\n   {}: {} / {} / {} {:.1}%",
                candidate.action, candidate.wins, candidate.draws, candidate.losses, ratio
            ));
        }
        summary
    }
}
