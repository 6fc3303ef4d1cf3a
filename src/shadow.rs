//! Shadow model
//!
//! Every tree casts a shadow as long as its size in all six directions. Each cell
//! remembers, per direction and per owner, only the tallest tree shading it. A tree
//! is spooky when the shade recorded for today's sun direction, by either owner, is at
//! least its own size; spooky trees earn no sun for the day.

use crate::{
    board::{Direction, NB_DIRECTIONS},
    game_state::{GameState, PlayerId, NB_PLAYERS},
};

impl GameState {
    /// Recomputes the shade tables and every tree's spooky flag for the current day
    pub fn update_shadows(&mut self) {
        for table in self.shade.iter_mut() {
            *table = [[0; NB_PLAYERS]; NB_DIRECTIONS];
        }

        for tree in &self.trees {
            let owner = tree.owner.index();
            for dir in Direction::ALL {
                let mut cell = tree.cell;
                for _ in 0..tree.size {
                    let Some(next) = self.board().neighbor(cell, dir) else {
                        break;
                    };
                    cell = next;
                    let slot = &mut self.shade[cell][dir.index()][owner];
                    if *slot < tree.size {
                        *slot = tree.size;
                    }
                }
            }
        }

        let sun = self.sun_direction().index();
        for tree in self.trees.iter_mut() {
            let shade = &self.shade[tree.cell][sun];
            tree.spooky = shade[PlayerId::Me.index()] >= tree.size
                || shade[PlayerId::Opponent.index()] >= tree.size;
        }
    }

    /// Whether the tree on `cell` is spooky today
    pub fn is_spooky(&self, cell: usize) -> bool {
        self.tree_at(cell).map_or(false, |tree| tree.spooky)
    }
}
