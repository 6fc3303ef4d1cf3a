//! Rollout policy implementations

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::action::Action;

/// Trait for policies that choose a player's next action during a trial
pub trait RolloutPolicy: Send + Sync {
    /// Chooses one of `actions`; falls back to WAIT when the list is empty
    fn choose(&self, actions: &[Action], rng: &mut StdRng) -> Action;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn RolloutPolicy>;
}

/// Greedy policy
///
/// Plays the action with the highest heuristic value. On ties the action listed last
/// wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        GreedyPolicy
    }

    /// The highest-valued action, later actions winning ties
    pub fn best(actions: &[Action]) -> Option<&Action> {
        // max_by_key keeps the last of equal maxima
        actions.iter().max_by_key(|action| action.value)
    }
}

impl RolloutPolicy for GreedyPolicy {
    fn choose(&self, actions: &[Action], _rng: &mut StdRng) -> Action {
        Self::best(actions).copied().unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "greedy"
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        Box::new(*self)
    }
}

/// Random policy
///
/// Plays a uniformly random legal action.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl RolloutPolicy for RandomPolicy {
    fn choose(&self, actions: &[Action], rng: &mut StdRng) -> Action {
        actions.choose(rng).copied().unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "random"
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        Box::new(*self)
    }
}

/// Fixed policy
///
/// Always plays the stored action, whatever the list offers. Used to force the
/// candidate under test as the searching player's first move.
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy {
    action: Action,
}

impl FixedPolicy {
    pub fn new(action: Action) -> Self {
        FixedPolicy { action }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}

impl RolloutPolicy for FixedPolicy {
    fn choose(&self, _actions: &[Action], _rng: &mut StdRng) -> Action {
        self.action
    }

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        Box::new(*self)
    }
}

impl RolloutPolicy for Box<dyn RolloutPolicy> {
    fn choose(&self, actions: &[Action], rng: &mut StdRng) -> Action {
        (**self).choose(actions, rng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn clone_box(&self) -> Box<dyn RolloutPolicy> {
        (**self).clone_box()
    }
}

impl Clone for Box<dyn RolloutPolicy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
