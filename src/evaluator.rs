//! Heuristic action evaluator
//!
//! A pure scoring function used to rank candidates before the search and, unchanged,
//! as the greedy rollout policy.

use crate::{
    action::ActionKind,
    game_state::{GameState, PlayerId},
};

pub const COMPLETE_BONUS: i32 = 1000;
pub const COMPLETE_RICH_FACTOR: i32 = 2;

pub const GROW_BONUS: i32 = 500;
pub const GROW_SIZE_FACTOR: i32 = 10;
pub const GROW_RICH_FACTOR: i32 = 2;

pub const SEED_RICH_FACTOR: i32 = 50;
pub const SEED_OPPONENT_SHADOW_BONUS: i32 = 10;
pub const SEED_FRIENDLY_SHADOW_MALUS: i32 = -10;

/// Scores `kind` for `player` in `state`. WAIT is always worth 0.
pub fn evaluate(state: &GameState, player: PlayerId, kind: &ActionKind) -> i32 {
    let richness = |cell: usize| i32::from(state.board().richness(cell));

    match *kind {
        ActionKind::Wait => 0,
        ActionKind::Complete { cell } => COMPLETE_BONUS + richness(cell) * COMPLETE_RICH_FACTOR,
        ActionKind::Grow { cell } => {
            let size = state.tree_at(cell).map_or(0, |tree| i32::from(tree.size));
            GROW_BONUS + size * GROW_SIZE_FACTOR + richness(cell) * GROW_RICH_FACTOR
        }
        ActionKind::Seed { target, .. } => {
            let sun = state.sun_direction();
            let friendly = i32::from(state.shade(target, sun, player));
            let hostile = i32::from(state.shade(target, sun, player.other()));
            friendly * SEED_FRIENDLY_SHADOW_MALUS
                + hostile * SEED_OPPONENT_SHADOW_BONUS
                + richness(target) * SEED_RICH_FACTOR
        }
    }
}
