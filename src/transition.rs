//! State transition: applying actions and rolling rounds and days forward
//!
//! Actions come from the generator and are legal by construction. When one does not
//! match the state anyway, the generator and the transition disagree on the rules and
//! the error is returned before anything is mutated.

use log::trace;

use crate::{
    action::{Action, ActionKind},
    game_state::{GameResult, GameState, PlayerId, Tree, MAX_DAY, SIZE_MAX},
    GameError, Result,
};

/// Harvest score bonus indexed by cell richness
pub const COMPLETE_RICHNESS_BONUS: [u32; 4] = [0, 0, 2, 4];

/// Sun converted into one point at the end of the game
pub const SUN_PER_POINT: u32 = 3;

impl GameState {
    /// Applies one action for `player` and charges its cost
    pub fn apply_action(&mut self, player: PlayerId, action: &Action) -> Result<()> {
        let sun = self.player(player).sun;
        if sun < action.cost {
            return Err(GameError::InsufficientSun {
                player,
                sun,
                cost: action.cost,
            });
        }

        match action.kind {
            ActionKind::Wait => {
                self.player_mut(player).waiting = true;
                return Ok(());
            }
            ActionKind::Complete { cell } => {
                let size = self.active_tree(cell, player)?.size;
                if size < SIZE_MAX {
                    return Err(GameError::NotHarvestable(cell));
                }
                self.remove_tree(cell)?;

                let richness = self.board().richness(cell) as usize;
                let bonus = COMPLETE_RICHNESS_BONUS.get(richness).copied().unwrap_or(0);
                let nutrients = self.nutrients;
                self.player_mut(player).score += nutrients + bonus;
                self.nutrients = nutrients.saturating_sub(1);
            }
            ActionKind::Grow { cell } => {
                let size = self.active_tree(cell, player)?.size;
                if size >= SIZE_MAX {
                    return Err(GameError::MaxSize(cell));
                }
                if let Some(tree) = self.tree_at_mut(cell) {
                    tree.size = size + 1;
                    tree.dormant = true;
                }
                let counts = &mut self.player_mut(player).trees_by_size;
                counts[size as usize] = counts[size as usize].saturating_sub(1);
                counts[size as usize + 1] += 1;
            }
            ActionKind::Seed { source, target } => {
                self.active_tree(source, player)?;
                match self.tree_at(target).copied() {
                    // Planting onto an opposing seed destroys it
                    Some(tree) if tree.owner != player && tree.size == 0 => {
                        self.remove_tree(target)?;
                    }
                    Some(_) => return Err(GameError::Occupied(target)),
                    None => self.plant(Tree::new(target, player, 0).with_dormant(true))?,
                }
                if let Some(tree) = self.tree_at_mut(source) {
                    tree.dormant = true;
                }
            }
        }

        self.player_mut(player).sun -= action.cost;
        Ok(())
    }

    /// Closes a round; when both players wait, the day advances
    ///
    /// Reaching the last day scores the game. Any other new day recomputes shadows,
    /// wakes every tree and pays out sun for unshaded trees.
    pub fn end_round(&mut self) {
        if self.players.iter().all(|p| p.waiting) {
            self.day += 1;
            if self.day >= MAX_DAY {
                self.finish_game();
            } else {
                self.start_day();
            }
        }
        self.round += 1;
    }

    /// Starts the current day: shadows, wake-up and income
    pub fn start_day(&mut self) {
        self.update_shadows();

        for player in self.players.iter_mut() {
            player.waiting = false;
            player.income = 0;
        }

        for tree in self.trees.iter_mut() {
            tree.dormant = false;
            if tree.spooky {
                continue;
            }
            let owner = &mut self.players[tree.owner.index()];
            owner.sun += u32::from(tree.size);
            owner.income += i32::from(tree.size);
        }
    }

    fn finish_game(&mut self) {
        for player in self.players.iter_mut() {
            player.score += player.sun / SUN_PER_POINT;
        }

        let [me, opponent] = &mut self.players;
        if me.score == opponent.score {
            me.score += me.grown_tree_count();
            opponent.score += opponent.grown_tree_count();
        }

        self.result = if me.score > opponent.score {
            GameResult::Won
        } else if me.score < opponent.score {
            GameResult::Lost
        } else {
            GameResult::Draw
        };
        trace!(
            "game over on round {}: {} - {} ({:?})",
            self.round,
            me.score,
            opponent.score,
            self.result
        );
    }

    /// The tree on `cell`, owned by `player` and still able to act today
    fn active_tree(&self, cell: usize, player: PlayerId) -> Result<&Tree> {
        let tree = self.tree_at(cell).ok_or(GameError::MissingTree(cell))?;
        if tree.owner != player {
            return Err(GameError::WrongOwner { cell, player });
        }
        if tree.dormant {
            return Err(GameError::Dormant(cell));
        }
        Ok(tree)
    }
}
