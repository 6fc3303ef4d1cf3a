//! # canopy-mc
//!
//! A turn-based decision agent for the two-player hex-grid tree growth game.
//!
//! Players own trees of size 0 to 3 on a fixed 37-cell board, spend sun to grow, plant
//! and harvest them, and are scored by harvested tree value plus a sun remainder. A
//! shared nutrient pool shrinks with every harvest, and a sun direction rotating once
//! per day casts shadows that suppress income.
//!
//! The crate contains two engines:
//!
//! - A **rules engine**: board geometry, the shadow model, legal action enumeration,
//!   a heuristic action evaluator, and the state transition function.
//! - A **time-boxed Monte Carlo search** that ranks candidate actions by playing many
//!   cloned games to their end and picking the best win ratio.
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use canopy_mc::{
//!     ActionGenerator, Board, GameState, MonteCarloSearch, PlayerId, SearchConfig, Tree,
//! };
//!
//! fn main() -> Result<(), canopy_mc::GameError> {
//!     let board = Arc::new(Board::standard());
//!     let mut state = GameState::new(board);
//!     state.plant(Tree::new(0, PlayerId::Me, 1))?;
//!     state.plant(Tree::new(19, PlayerId::Opponent, 1))?;
//!     state.player_mut(PlayerId::Me).sun = 4;
//!     state.player_mut(PlayerId::Opponent).sun = 4;
//!     state.update_shadows();
//!
//!     // Keep the doctest fast: a handful of trials is plenty
//!     let config = SearchConfig::default().with_max_trials(8).with_seed(7);
//!     let candidates = ActionGenerator::new(config.rules).generate(&state, PlayerId::Me);
//!
//!     let mut search = MonteCarloSearch::new(config);
//!     let action = search.search(&state, &candidates)?;
//!
//!     println!("{}", search.get_statistics().summary());
//!     println!("{}", action);
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! 1. **Enumerate** the searching player's legal actions, each already scored by the
//!    heuristic evaluator. The best of them is kept as an unconditional fallback.
//! 2. **Play out**: round-robin over the candidates. Each trial clones the root
//!    state, forces the candidate as the first move, lets the opponent answer
//!    greedily, then drives both sides with rollout policies until day 24.
//! 3. **Tally** wins, losses and draws per candidate.
//! 4. **Select** the candidate with the highest win ratio once the wall-clock budget
//!    is spent.
//!
//! The boundary to the game server lives in [`protocol`]; see `demos/codingame_bot.rs`
//! for the full read-decide-print loop.

pub mod action;
pub mod board;
pub mod config;
pub mod evaluator;
pub mod game_state;
pub mod generator;
pub mod policy;
pub mod protocol;
pub mod search;
pub mod shadow;
pub mod stats;
pub mod transition;

pub use action::{Action, ActionKind};
pub use board::{Board, BoardCell, CellSpec, CubeCoord, Direction};
pub use config::{RulesConfig, SearchConfig};
pub use evaluator::evaluate;
pub use game_state::{GameResult, GameState, Player, PlayerId, Tree};
pub use generator::ActionGenerator;
pub use policy::{FixedPolicy, GreedyPolicy, RandomPolicy, RolloutPolicy};
pub use search::MonteCarloSearch;
pub use stats::{CandidateStats, SearchStatistics};

/// Error types for the rules engine and the search
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// The board description contains no cells
    #[error("Board description contains no cells")]
    EmptyBoard,

    /// A cell was listed at a position that does not match its index
    #[error("Cell listed at position {position} has index {index}")]
    CellIndexMismatch { position: usize, index: usize },

    /// A cell index points outside the board
    #[error("Cell {0} is outside the board")]
    CellOutOfRange(usize),

    /// A cell cannot be reached from the center cell
    #[error("Cell {0} is not connected to the center cell")]
    Disconnected(usize),

    /// An action references a cell without a tree
    #[error("No tree on cell {0}")]
    MissingTree(usize),

    /// An action references a tree owned by the other player
    #[error("Tree on cell {cell} is not owned by {player:?}")]
    WrongOwner { cell: usize, player: PlayerId },

    /// The acting tree already acted this day
    #[error("Tree on cell {0} is dormant")]
    Dormant(usize),

    /// A tree size outside 0..=3
    #[error("Tree on cell {cell} has invalid size {size}")]
    InvalidSize { cell: usize, size: u8 },

    /// A tree cannot be placed on an occupied cell
    #[error("Cell {0} is already occupied")]
    Occupied(usize),

    /// Only trees at maximum size can be harvested
    #[error("Tree on cell {0} is too small to harvest")]
    NotHarvestable(usize),

    /// A tree at maximum size cannot grow
    #[error("Tree on cell {0} is already at maximum size")]
    MaxSize(usize),

    /// The acting player cannot pay for the action
    #[error("{player:?} has {sun} sun but the action costs {cost}")]
    InsufficientSun { player: PlayerId, sun: u32, cost: u32 },

    /// The search was given nothing to choose from
    #[error("No candidate actions to search")]
    NoCandidates,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Game input could not be parsed
    #[error("Malformed input: {0}")]
    Parse(String),

    /// Reading game input failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for rules engine and search operations
pub type Result<T> = std::result::Result<T, GameError>;
