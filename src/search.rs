//! Time-boxed Monte Carlo action selection
//!
//! This module ranks the searching player's candidate actions by playing full games
//! from cloned copies of the decision state. There is no search tree: every trial
//! starts from the root, forces one candidate as the first move, and plays both
//! players forward with rollout policies until the game is scored.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    action::Action,
    config::SearchConfig,
    game_state::{GameResult, GameState, PlayerId},
    generator::ActionGenerator,
    policy::{FixedPolicy, GreedyPolicy, RandomPolicy, RolloutPolicy},
    stats::{CandidateStats, SearchStatistics},
    GameError, Result,
};

/// The Monte Carlo search
///
/// Trials round-robin over the candidates until the wall-clock budget is spent. A
/// trial always runs to the end of the game; the budget is only checked between
/// trials.
pub struct MonteCarloSearch {
    /// Configuration for the search
    config: SearchConfig,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Action generator used inside trials
    generator: ActionGenerator,

    /// Policy for the searching player's moves after the forced first one
    searcher_policy: Box<dyn RolloutPolicy>,

    /// Policy for the opponent's moves after its greedy first reply
    opponent_policy: Box<dyn RolloutPolicy>,

    rng: StdRng,
}

impl MonteCarloSearch {
    /// Creates a new search with random play for the searching player and greedy play
    /// for the opponent
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MonteCarloSearch {
            generator: ActionGenerator::new(config.rules),
            config,
            statistics: SearchStatistics::new(),
            searcher_policy: Box::new(RandomPolicy::new()),
            opponent_policy: Box::new(GreedyPolicy::new()),
            rng,
        }
    }

    /// Sets the policy for the searching player's later moves
    pub fn with_searcher_policy<P: RolloutPolicy + 'static>(mut self, policy: P) -> Self {
        self.searcher_policy = Box::new(policy);
        self
    }

    /// Sets the policy for the opponent's later moves
    pub fn with_opponent_policy<P: RolloutPolicy + 'static>(mut self, policy: P) -> Self {
        self.opponent_policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn generator(&self) -> &ActionGenerator {
        &self.generator
    }

    /// Generates the searching player's candidates and searches them, counting the
    /// budget from `started`
    pub fn decide(&mut self, state: &GameState, started: Instant) -> Result<Action> {
        let candidates = self.generator.generate(state, PlayerId::Me);
        self.search_since(state, &candidates, started)
    }

    /// Runs the search with the budget for the state's round, starting now
    pub fn search(&mut self, state: &GameState, candidates: &[Action]) -> Result<Action> {
        self.search_since(state, candidates, Instant::now())
    }

    /// Runs the search with the budget for the state's round, counted from `started`
    pub fn search_since(
        &mut self,
        state: &GameState,
        candidates: &[Action],
        started: Instant,
    ) -> Result<Action> {
        let budget = self.config.budget_for(state.round);
        self.search_for_time(state, candidates, started, budget)
    }

    /// Runs the search until `budget` has elapsed since `started`
    ///
    /// # Returns
    ///
    /// * `Ok(action)` - The candidate with the best win ratio, or the heuristic best
    ///   candidate when too few trials completed or every candidate always won
    /// * `Err(GameError)` - If there are no candidates, the configuration is invalid,
    ///   or a trial hit an action the state could not apply
    pub fn search_for_time(
        &mut self,
        state: &GameState,
        candidates: &[Action],
        started: Instant,
        budget: Duration,
    ) -> Result<Action> {
        self.config.validate()?;

        self.statistics = SearchStatistics::new();
        let fallback = GreedyPolicy::best(candidates)
            .copied()
            .ok_or(GameError::NoCandidates)?;
        self.statistics.candidates = candidates.iter().copied().map(CandidateStats::new).collect();

        if !self.config.simulation {
            self.statistics.used_fallback = true;
            return Ok(fallback);
        }

        let opponent_actions = self.generator.generate(state, PlayerId::Opponent);
        let opening_reply = GreedyPolicy::best(&opponent_actions)
            .copied()
            .unwrap_or_default();
        debug!(
            "search on day {} round {}: {} candidates, opponent opens with {}, budget {:?}",
            state.day,
            state.round,
            candidates.len(),
            opening_reply,
            budget
        );
        for (side, actions) in [("my", candidates), ("opponent", opponent_actions.as_slice())] {
            for action in actions {
                debug!(
                    "{} action {} cost {} value {}",
                    side, action, action.cost, action.value
                );
            }
        }

        let mut next = 0;
        loop {
            if started.elapsed() >= budget {
                self.statistics.stopped_early = true;
                break;
            }
            if let Some(max_trials) = self.config.max_trials {
                if self.statistics.trials >= max_trials {
                    break;
                }
            }

            let candidate = self.statistics.candidates[next].action;
            let result = self.run_trial(state, candidate, opening_reply)?;
            self.record(next, result);
            next = (next + 1) % candidates.len();
        }

        self.statistics.total_time = started.elapsed();
        let chosen = self.select(fallback);

        info!("{}", self.statistics.summary());
        info!("best action: {}", chosen);
        Ok(chosen)
    }

    /// Plays one full game from a clone of `root`
    ///
    /// The searching player opens with `candidate` and the opponent with
    /// `opening_reply`; every later move comes from the configured policies.
    pub fn run_trial(
        &mut self,
        root: &GameState,
        candidate: Action,
        opening_reply: Action,
    ) -> Result<GameResult> {
        let mut sim = root.clone();
        let opening = FixedPolicy::new(candidate);
        sim.player_mut(PlayerId::Me).last_action = opening.choose(&[], &mut self.rng);
        sim.player_mut(PlayerId::Opponent).last_action = opening_reply;

        while sim.result == GameResult::Unknown {
            for id in PlayerId::ALL {
                let action = sim.player(id).last_action;
                sim.apply_action(id, &action)?;
            }

            sim.end_round();
            if sim.result != GameResult::Unknown {
                break;
            }

            for id in PlayerId::ALL {
                let actions = self.generator.generate(&sim, id);
                let policy = match id {
                    PlayerId::Me => &self.searcher_policy,
                    PlayerId::Opponent => &self.opponent_policy,
                };
                let choice = policy.choose(&actions, &mut self.rng);
                sim.player_mut(id).last_action = choice;
            }
        }

        trace!("trial for {} ended {:?}", candidate, sim.result);
        Ok(sim.result)
    }

    fn record(&mut self, index: usize, result: GameResult) {
        let candidate = &mut self.statistics.candidates[index];
        match result {
            GameResult::Won => {
                candidate.wins += 1;
                candidate.value += 1;
            }
            GameResult::Lost => {
                candidate.losses += 1;
                candidate.value -= 1;
            }
            _ => candidate.draws += 1,
        }
        self.statistics.trials += 1;
    }

    /// Picks the best win ratio, later candidates winning ties
    fn select(&mut self, fallback: Action) -> Action {
        let mut best = fallback;
        let mut best_ratio = 0.0;
        let mut all_won = true;

        for candidate in &self.statistics.candidates {
            let Some(ratio) = candidate.win_ratio() else {
                all_won = false;
                continue;
            };
            if ratio < 1.0 {
                all_won = false;
            }
            if best_ratio <= ratio {
                best = candidate.action;
                best_ratio = ratio;
            }
        }

        if self.statistics.trials < self.statistics.candidates.len() || all_won {
            warn!(
                "falling back to heuristic action {} after {} trials",
                fallback, self.statistics.trials
            );
            self.statistics.used_fallback = true;
            return fallback;
        }
        best
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
