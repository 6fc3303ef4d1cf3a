//! Legal action enumeration
//!
//! The generator reproduces the game's legality rules plus a handful of day-dependent
//! restrictions that keep rollouts sensible (no harvesting before enough trees are
//! grown, no growing seeds that cannot mature before the end, and so on). Every action
//! it returns can be applied by the transition function without error.

use crate::{
    action::{Action, ActionKind},
    config::RulesConfig,
    evaluator::evaluate,
    game_state::{GameState, PlayerId, Tree, MAX_DAY, SIZE_MAX},
};

pub const COMPLETE_COST: u32 = 4;
/// Size-3 trees required to harvest from day 12 on
pub const COMPLETE_NB_TREE_MIN: u32 = 4;
/// Size-3 trees required to harvest before day 12
pub const COMPLETE_NB_TREE_MIN_START: u32 = 6;
pub const COMPLETE_MIN_DAY_START: u32 = 12;
/// Harvesting is unrestricted during this many final days
pub const COMPLETE_LAST_DAYS: u32 = 3;

/// Base grow cost by current size
pub const GROW_COSTS: [u32; 3] = [1, 3, 7];
pub const MAX_TREES_SIZE_2: u32 = 4;
pub const MAX_TREES_SIZE_1: u32 = 3;
pub const GROW_LAST_DAY_SIZE_2: u32 = 1;
pub const GROW_LAST_DAY_SIZE_1: u32 = 2;
pub const GROW_LAST_DAY_SIZE_0: u32 = 3;

pub const SEED_MIN_SIZE: u8 = 2;
/// Paid seeding stops on this day
pub const SEED_LAST_DAY: u32 = 20;

/// Enumerates legal actions for one player
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionGenerator {
    rules: RulesConfig,
}

impl ActionGenerator {
    /// Creates a generator applying the given restrictions
    pub fn new(rules: RulesConfig) -> Self {
        ActionGenerator { rules }
    }

    /// Returns the restrictions in use
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Legal actions for `player`, each valued by the evaluator
    ///
    /// WAIT is always first. A player who already waits this day gets nothing else.
    pub fn generate(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        let mut actions = vec![Action::wait()];
        let owner = state.player(player);
        if owner.waiting {
            return actions;
        }

        let mut seeding_closed = false;
        for tree in state.trees() {
            if tree.dormant || tree.owner != player {
                continue;
            }

            let mut grow_allowed = true;
            let mut seed_allowed = true;

            if let Some(action) = self.complete(state, player, tree) {
                let counts = &owner.trees_by_size;
                if counts[3] + 1 >= complete_minimum(state.day)
                    && counts[2] > 0
                    && owner.sun >= COMPLETE_COST + GROW_COSTS[2]
                {
                    grow_allowed = false;
                }
                seed_allowed = false;
                actions.push(action);
            }

            if grow_allowed {
                if let Some(action) = self.grow(state, player, tree) {
                    seed_allowed = false;
                    actions.push(action);
                }
            }

            if seed_allowed && !seeding_closed {
                let before = actions.len();
                self.seeds(state, player, tree, &mut actions);
                if self.rules.first_available_seed_only && actions.len() > before {
                    seeding_closed = true;
                }
            }
        }

        actions
    }

    fn complete(&self, state: &GameState, player: PlayerId, tree: &Tree) -> Option<Action> {
        let owner = state.player(player);
        if tree.size < SIZE_MAX
            || owner.sun < COMPLETE_COST
            || owner.trees_by_size[SIZE_MAX as usize] < complete_minimum(state.day)
        {
            return None;
        }
        Some(valued(
            state,
            player,
            ActionKind::Complete { cell: tree.cell },
            COMPLETE_COST,
        ))
    }

    fn grow(&self, state: &GameState, player: PlayerId, tree: &Tree) -> Option<Action> {
        if tree.size >= SIZE_MAX {
            return None;
        }
        let owner = state.player(player);
        let counts = &owner.trees_by_size;
        let size = tree.size as usize;
        let cost = GROW_COSTS[size] + counts[size + 1];

        let blocked = owner.sun < cost
            || (tree.size < 2 && counts[2] >= MAX_TREES_SIZE_2)
            || (tree.size < 1 && counts[1] >= MAX_TREES_SIZE_1)
            || (state.day > MAX_DAY - GROW_LAST_DAY_SIZE_2 && tree.size < 3)
            || (state.day > MAX_DAY - GROW_LAST_DAY_SIZE_1 && tree.size < 2)
            || (state.day > MAX_DAY - GROW_LAST_DAY_SIZE_0 && tree.size < 1);
        if blocked {
            return None;
        }
        Some(valued(
            state,
            player,
            ActionKind::Grow { cell: tree.cell },
            cost,
        ))
    }

    fn seeds(&self, state: &GameState, player: PlayerId, tree: &Tree, actions: &mut Vec<Action>) {
        let owner = state.player(player);
        let cost = owner.trees_by_size[0];

        if tree.size < SEED_MIN_SIZE
            || owner.sun < cost
            || (state.day >= SEED_LAST_DAY && cost != 0)
            || (self.rules.seed_only_if_free && cost != 0)
        {
            return;
        }

        let board = state.board();
        for target in 0..board.len() {
            if state.is_occupied(target) || board.richness(target) == 0 {
                continue;
            }
            // Adjacent planting is forbidden
            let distance = board.distance(tree.cell, target);
            if distance < 2 || distance > tree.size {
                continue;
            }
            actions.push(valued(
                state,
                player,
                ActionKind::Seed {
                    source: tree.cell,
                    target,
                },
                cost,
            ));
        }
    }
}

/// Size-3 trees a player must own before harvesting on `day`
pub fn complete_minimum(day: u32) -> u32 {
    if day < COMPLETE_MIN_DAY_START {
        COMPLETE_NB_TREE_MIN_START
    } else if day < MAX_DAY - COMPLETE_LAST_DAYS {
        COMPLETE_NB_TREE_MIN
    } else {
        0
    }
}

fn valued(state: &GameState, player: PlayerId, kind: ActionKind, cost: u32) -> Action {
    Action {
        value: evaluate(state, player, &kind),
        ..Action::new(kind, cost)
    }
}
