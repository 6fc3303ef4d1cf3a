//! Rollout policies for the Monte Carlo search
//!
//! A rollout policy picks one action out of the generator's list for a player during
//! a trial. The search assigns one policy per role:
//! - the searching player's first move: always a [`FixedPolicy`] holding the
//!   candidate under test
//! - the searching player's later moves: [`RandomPolicy`] by default
//! - the opponent: [`GreedyPolicy`] by default

pub mod rollout;

pub use rollout::{FixedPolicy, GreedyPolicy, RandomPolicy, RolloutPolicy};
