//! Configuration for the rules engine and the Monte Carlo search
//!
//! [`RulesConfig`] holds the optional restrictions applied by the action generator;
//! [`SearchConfig`] holds the search budget and embeds the rules it plays by.

use std::time::Duration;

use crate::{GameError, Result};

/// Optional restrictions on generated actions
///
/// # Example
///
/// ```
/// use canopy_mc::RulesConfig;
///
/// let rules = RulesConfig::default()
///     .with_first_available_seed_only(true)
///     .with_seed_only_if_free(true);
/// assert!(rules.first_available_seed_only);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RulesConfig {
    /// Only the first tree able to seed in a day yields seed actions
    pub first_available_seed_only: bool,

    /// Seeding is only offered while it costs nothing
    pub seed_only_if_free: bool,
}

impl RulesConfig {
    /// Sets whether only the first tree able to seed yields seed actions
    pub fn with_first_available_seed_only(mut self, enabled: bool) -> Self {
        self.first_available_seed_only = enabled;
        self
    }

    /// Sets whether seeding is offered only while it is free
    pub fn with_seed_only_if_free(mut self, enabled: bool) -> Self {
        self.seed_only_if_free = enabled;
        self
    }
}

/// Configuration for the Monte Carlo search
///
/// # Example
///
/// ```
/// use canopy_mc::SearchConfig;
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_turn_budget(Duration::from_millis(80))
///     .with_first_turn_budget(Duration::from_millis(900))
///     .with_max_trials(5_000)
///     .with_seed(42);
/// assert_eq!(config.budget_for(0), Duration::from_millis(900));
/// assert_eq!(config.budget_for(3), Duration::from_millis(80));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Wall-clock budget for a normal turn
    pub turn_budget: Duration,

    /// Wall-clock budget for the first turn of a game
    pub first_turn_budget: Duration,

    /// Stop issuing trials after this many, even with time left
    pub max_trials: Option<usize>,

    /// RNG seed for reproducible searches; entropy when unset
    pub seed: Option<u64>,

    /// When off, the heuristic best action is played without any rollout
    pub simulation: bool,

    /// Restrictions used by the action generator during rollouts
    pub rules: RulesConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            turn_budget: Duration::from_millis(99),
            first_turn_budget: Duration::from_millis(999),
            max_trials: None,
            seed: None,
            simulation: true,
            rules: RulesConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Sets the budget for a normal turn
    pub fn with_turn_budget(mut self, budget: Duration) -> Self {
        self.turn_budget = budget;
        self
    }

    /// Sets the budget for the first turn of a game
    pub fn with_first_turn_budget(mut self, budget: Duration) -> Self {
        self.first_turn_budget = budget;
        self
    }

    /// Sets the maximum number of trials
    pub fn with_max_trials(mut self, trials: usize) -> Self {
        self.max_trials = Some(trials);
        self
    }

    /// Sets the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets whether rollouts run at all
    pub fn with_simulation(mut self, enabled: bool) -> Self {
        self.simulation = enabled;
        self
    }

    /// Sets the generator restrictions
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Budget for a decision taken at `round`
    pub fn budget_for(&self, round: u32) -> Duration {
        if round == 0 {
            self.first_turn_budget
        } else {
            self.turn_budget
        }
    }

    /// Checks the configuration for values the search cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_trials == Some(0) {
            return Err(GameError::InvalidConfiguration(
                "max_trials must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
