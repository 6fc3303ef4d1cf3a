//! Boundary with the game server
//!
//! The server sends the board once, then one block of turn input per decision. The
//! legal action list it sends is kept for diagnostics only; the generator produces its
//! own.

use std::io::{BufRead, Lines};
use std::iter::Peekable;
use std::str::FromStr;

use crate::{
    action::ActionKind,
    board::{Board, CellSpec, NB_DIRECTIONS},
    game_state::{GameResult, GameState, PlayerId, Tree, NB_PLAYERS, SIZE_MAX},
    GameError, Result,
};

/// Line-oriented reader over the server input
pub struct InputReader<R: BufRead> {
    lines: Peekable<Lines<R>>,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(reader: R) -> Self {
        InputReader {
            lines: reader.lines().peekable(),
        }
    }

    /// Whether the server closed the input
    pub fn is_exhausted(&mut self) -> bool {
        self.lines.peek().is_none()
    }

    /// Next input line, failing at end of input
    pub fn next_line(&mut self) -> Result<String> {
        match self.lines.next() {
            Some(line) => Ok(line?),
            None => Err(GameError::Parse("unexpected end of input".to_string())),
        }
    }

    fn next_value<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let line = self.next_line()?;
        parse_field(line.trim(), what)
    }
}

fn parse_field<T: FromStr>(field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| GameError::Parse(format!("bad {} '{}'", what, field)))
}

fn fields<'a>(line: &'a str, count: usize, what: &str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < count {
        return Err(GameError::Parse(format!(
            "{} line '{}' has {} fields, expected {}",
            what,
            line,
            fields.len(),
            count
        )));
    }
    Ok(fields)
}

/// Reads the board description: a cell count, then `index richness n0 .. n5` per cell
/// with `-1` marking the board edge
pub fn read_board<R: BufRead>(input: &mut InputReader<R>) -> Result<Board> {
    let count: usize = input.next_value("cell count")?;
    let mut specs = Vec::with_capacity(count);

    for _ in 0..count {
        let line = input.next_line()?;
        let parts = fields(&line, 2 + NB_DIRECTIONS, "cell")?;

        let mut neighbors = [None; NB_DIRECTIONS];
        for (dir, slot) in neighbors.iter_mut().enumerate() {
            let neighbor: i64 = parse_field(parts[2 + dir], "neighbor")?;
            *slot = usize::try_from(neighbor).ok();
        }

        specs.push(CellSpec {
            index: parse_field(parts[0], "cell index")?,
            richness: parse_field(parts[1], "richness")?,
            neighbors,
        });
    }

    Board::from_cells(specs)
}

/// Resources reported for one player at the start of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub sun: u32,
    pub score: u32,
    /// Only reported for the opponent
    pub waiting: Option<bool>,
}

/// One turn of server input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnUpdate {
    pub day: u32,
    pub nutrients: u32,
    pub players: [PlayerUpdate; NB_PLAYERS],
    pub trees: Vec<Tree>,
    /// The server's own legal action list, not relied upon
    pub server_actions: Vec<ActionKind>,
}

impl TurnUpdate {
    /// Reads one turn: day, nutrients, my `sun score`, the opponent's
    /// `sun score waiting`, the trees as `cell size isMine isDormant`, then the
    /// server's legal actions
    pub fn read<R: BufRead>(input: &mut InputReader<R>) -> Result<TurnUpdate> {
        let day: u32 = input.next_value("day")?;
        let nutrients: u32 = input.next_value("nutrients")?;

        let mut players = [PlayerUpdate {
            sun: 0,
            score: 0,
            waiting: None,
        }; NB_PLAYERS];
        for update in players.iter_mut() {
            let line = input.next_line()?;
            let parts = fields(&line, 2, "player")?;
            update.sun = parse_field(parts[0], "sun")?;
            update.score = parse_field(parts[1], "score")?;
            update.waiting = parts.get(2).map(|flag| *flag != "0");
        }

        let tree_count: usize = input.next_value("tree count")?;
        let mut trees = Vec::with_capacity(tree_count);
        for _ in 0..tree_count {
            let line = input.next_line()?;
            let parts = fields(&line, 4, "tree")?;
            let owner = if parts[2] != "0" {
                PlayerId::Me
            } else {
                PlayerId::Opponent
            };
            let size: u8 = parse_field(parts[1], "tree size")?;
            if size > SIZE_MAX {
                return Err(GameError::Parse(format!("tree size {} out of range", size)));
            }
            let tree = Tree::new(parse_field(parts[0], "tree cell")?, owner, size);
            trees.push(tree.with_dormant(parts[3] != "0"));
        }

        let action_count: usize = input.next_value("action count")?;
        let mut server_actions = Vec::with_capacity(action_count);
        for _ in 0..action_count {
            server_actions.push(input.next_line()?.parse::<ActionKind>()?);
        }

        Ok(TurnUpdate {
            day,
            nutrients,
            players,
            trees,
            server_actions,
        })
    }

    /// Refreshes the root state for a new decision taken at `round`
    ///
    /// Income is the sun delta since the previous turn. Trees and histograms are
    /// rebuilt from scratch and shadows recomputed for the new day.
    pub fn apply_to(&self, state: &mut GameState, round: u32) -> Result<()> {
        state.day = self.day;
        state.nutrients = self.nutrients;
        state.round = round;
        state.result = GameResult::Unknown;

        for (player, update) in state.players.iter_mut().zip(&self.players) {
            player.income = update.sun as i32 - player.sun as i32;
            player.sun = update.sun;
            player.score = update.score;
            if let Some(waiting) = update.waiting {
                player.waiting = waiting;
            }
        }

        state.clear_trees();
        for tree in &self.trees {
            state.plant(*tree)?;
        }
        state.update_shadows();
        Ok(())
    }
}
