//! Mutable game snapshot
//!
//! A [`GameState`] is rebuilt from the server input once per real decision and then
//! cloned for every search trial. Cloning is a plain structural copy: trees live in a
//! flat list and cells refer to them by index, so clones never share mutable data.
//! Only the immutable [`Board`] is shared.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    action::Action,
    board::{Board, Direction, NB_DIRECTIONS},
    GameError, Result,
};

/// Number of players
pub const NB_PLAYERS: usize = 2;

/// The game ends when this day is reached
pub const MAX_DAY: u32 = 24;

/// Largest tree size
pub const SIZE_MAX: u8 = 3;

/// Tallest tree shading a cell, per direction and per owner
pub type ShadeTable = [[u8; NB_PLAYERS]; NB_DIRECTIONS];

/// Players, seen from the searching player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    Me = 0,
    Opponent = 1,
}

impl PlayerId {
    pub const ALL: [PlayerId; NB_PLAYERS] = [PlayerId::Me, PlayerId::Opponent];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::Me => PlayerId::Opponent,
            PlayerId::Opponent => PlayerId::Me,
        }
    }
}

/// Outcome of a finished game for the searching player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Unknown,
    Won,
    Lost,
    Draw,
}

/// A tree standing on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    pub cell: usize,
    pub owner: PlayerId,
    pub size: u8,
    /// Already acted this day
    pub dormant: bool,
    /// Shaded by an equal or taller tree for the current sun direction
    pub spooky: bool,
}

impl Tree {
    pub fn new(cell: usize, owner: PlayerId, size: u8) -> Self {
        Tree {
            cell,
            owner,
            size,
            dormant: false,
            spooky: false,
        }
    }

    pub fn with_dormant(mut self, dormant: bool) -> Self {
        self.dormant = dormant;
        self
    }
}

/// Per-player resources and bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub sun: u32,
    pub score: u32,
    /// Sun gained since the previous day
    pub income: i32,
    pub waiting: bool,
    /// Owned tree count per size
    pub trees_by_size: [u32; SIZE_MAX as usize + 1],
    pub last_action: Action,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Player {
            id,
            sun: 0,
            score: 0,
            income: 0,
            waiting: false,
            trees_by_size: [0; SIZE_MAX as usize + 1],
            last_action: Action::wait(),
        }
    }

    pub fn tree_count(&self) -> u32 {
        self.trees_by_size.iter().sum()
    }

    /// Trees of size 1 and above
    pub fn grown_tree_count(&self) -> u32 {
        self.trees_by_size[1..].iter().sum()
    }
}

/// Full game snapshot
#[derive(Debug, Clone)]
pub struct GameState {
    board: Arc<Board>,
    pub day: u32,
    /// Rounds played, counting simulated ones
    pub round: u32,
    pub nutrients: u32,
    pub players: [Player; NB_PLAYERS],
    pub result: GameResult,
    pub(crate) trees: Vec<Tree>,
    /// Index into `trees` per cell
    pub(crate) occupancy: Vec<Option<usize>>,
    pub(crate) shade: Vec<ShadeTable>,
}

impl GameState {
    pub fn new(board: Arc<Board>) -> Self {
        let cells = board.len();
        GameState {
            board,
            day: 0,
            round: 0,
            nutrients: 0,
            players: [Player::new(PlayerId::Me), Player::new(PlayerId::Opponent)],
            result: GameResult::Unknown,
            trees: Vec::new(),
            occupancy: vec![None; cells],
            shade: vec![[[0; NB_PLAYERS]; NB_DIRECTIONS]; cells],
        }
    }

    /// The shared board geometry
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Sun direction for the current day
    pub fn sun_direction(&self) -> Direction {
        Direction::from_day(self.day)
    }

    /// Returns the player with the given id
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Returns a mutable reference to the player with the given id
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// All trees, in planting order
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// The tree on `cell`, if any
    pub fn tree_at(&self, cell: usize) -> Option<&Tree> {
        let index = (*self.occupancy.get(cell)?)?;
        self.trees.get(index)
    }

    /// Mutable access to the tree on `cell`, if any
    pub fn tree_at_mut(&mut self, cell: usize) -> Option<&mut Tree> {
        let index = (*self.occupancy.get(cell)?)?;
        self.trees.get_mut(index)
    }

    /// Whether a tree stands on `cell`
    pub fn is_occupied(&self, cell: usize) -> bool {
        self.tree_at(cell).is_some()
    }

    /// Shade cast on `cell` from direction `dir` by trees of `owner`
    pub fn shade(&self, cell: usize, dir: Direction, owner: PlayerId) -> u8 {
        self.shade[cell][dir.index()][owner.index()]
    }

    /// Places a tree and counts it in its owner's histogram
    pub fn plant(&mut self, tree: Tree) -> Result<()> {
        if tree.cell >= self.board.len() {
            return Err(GameError::CellOutOfRange(tree.cell));
        }
        if tree.size > SIZE_MAX {
            return Err(GameError::InvalidSize {
                cell: tree.cell,
                size: tree.size,
            });
        }
        if self.occupancy[tree.cell].is_some() {
            return Err(GameError::Occupied(tree.cell));
        }

        self.players[tree.owner.index()].trees_by_size[tree.size as usize] += 1;
        self.occupancy[tree.cell] = Some(self.trees.len());
        self.trees.push(tree);
        Ok(())
    }

    /// Removes the tree on `cell` and uncounts it from its owner's histogram
    pub fn remove_tree(&mut self, cell: usize) -> Result<Tree> {
        let index = self
            .occupancy
            .get(cell)
            .copied()
            .flatten()
            .ok_or(GameError::MissingTree(cell))?;

        let tree = self.trees.remove(index);
        self.occupancy[cell] = None;
        for (i, shifted) in self.trees.iter().enumerate().skip(index) {
            self.occupancy[shifted.cell] = Some(i);
        }

        let count = &mut self.players[tree.owner.index()].trees_by_size[tree.size as usize];
        *count = count.saturating_sub(1);
        Ok(tree)
    }

    /// Removes every tree and resets both histograms
    pub fn clear_trees(&mut self) {
        self.trees.clear();
        self.occupancy.iter_mut().for_each(|slot| *slot = None);
        for player in &mut self.players {
            player.trees_by_size = [0; SIZE_MAX as usize + 1];
        }
    }

    /// The same position seen from the opponent's side
    pub fn mirrored(&self) -> GameState {
        let mut mirrored = self.clone();
        mirrored.players.swap(0, 1);
        for player in mirrored.players.iter_mut() {
            player.id = player.id.other();
        }
        for tree in mirrored.trees.iter_mut() {
            tree.owner = tree.owner.other();
        }
        for table in mirrored.shade.iter_mut() {
            table.iter_mut().for_each(|owners| owners.swap(0, 1));
        }
        mirrored.result = match self.result {
            GameResult::Won => GameResult::Lost,
            GameResult::Lost => GameResult::Won,
            other => other,
        };
        mirrored
    }

    /// Whether the game is over
    pub fn is_terminal(&self) -> bool {
        self.day >= MAX_DAY || self.result != GameResult::Unknown
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let me = self.player(PlayerId::Me);
        let opponent = self.player(PlayerId::Opponent);
        let sun = self.sun_direction();

        writeln!(
            f,
            "-------------------- DAY {} ROUND {} --------------------",
            self.day + 1,
            self.round
        )?;
        writeln!(
            f,
            "ME ({} / {}) :: OPPONENT ({} / {}) :: NUTRIENTS {}",
            me.score, me.sun, opponent.score, opponent.sun, self.nutrients
        )?;

        // Rows run top to bottom along z, cells left to right along x
        let mut rows: BTreeMap<i32, Vec<(i32, usize)>> = BTreeMap::new();
        for cell in self.board.cells() {
            rows.entry(cell.coord.z)
                .or_default()
                .push((cell.coord.x, cell.index));
        }

        for (z, mut row) in rows {
            row.sort_unstable();
            write!(f, "{}", " ".repeat(2 + 3 * z.unsigned_abs() as usize))?;
            for (_, cell) in row {
                match self.tree_at(cell) {
                    Some(tree) => {
                        let owner = if tree.owner == PlayerId::Me { 'o' } else { 'x' };
                        write!(f, " {}{}", owner, tree.size)?;
                    }
                    None if self.board.richness(cell) == 0 => write!(f, " ##")?,
                    None => write!(f, " ..")?,
                }
                write!(
                    f,
                    "({}{})",
                    u8::from(self.shade(cell, sun, PlayerId::Me) > 0),
                    u8::from(self.shade(cell, sun, PlayerId::Opponent) > 0)
                )?;
            }
            writeln!(f)?;
        }

        for player in &self.players {
            writeln!(
                f,
                "{:?}: sun {} score {} income {} waiting {} trees {:?}",
                player.id, player.sun, player.score, player.income, player.waiting,
                player.trees_by_size
            )?;
        }
        Ok(())
    }
}
