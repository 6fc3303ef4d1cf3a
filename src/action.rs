//! Actions and their protocol syntax

use std::fmt;
use std::str::FromStr;

use crate::GameError;

/// What an action does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Wait,
    Grow { cell: usize },
    Seed { source: usize, target: usize },
    Complete { cell: usize },
}

impl ActionKind {
    /// The cell the action lands on, if any
    pub fn target_cell(&self) -> Option<usize> {
        match *self {
            ActionKind::Wait => None,
            ActionKind::Grow { cell } | ActionKind::Complete { cell } => Some(cell),
            ActionKind::Seed { target, .. } => Some(target),
        }
    }
}

/// A legal action with its sun cost and heuristic value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub cost: u32,
    pub value: i32,
}

impl Action {
    pub fn new(kind: ActionKind, cost: u32) -> Self {
        Action {
            kind,
            cost,
            value: 0,
        }
    }

    /// The always-legal, free action
    pub fn wait() -> Self {
        Self::new(ActionKind::Wait, 0)
    }

    pub fn is_wait(&self) -> bool {
        self.kind == ActionKind::Wait
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::wait()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Wait => write!(f, "WAIT"),
            ActionKind::Grow { cell } => write!(f, "GROW {}", cell),
            ActionKind::Seed { source, target } => write!(f, "SEED {} {}", source, target),
            ActionKind::Complete { cell } => write!(f, "COMPLETE {}", cell),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl FromStr for ActionKind {
    type Err = GameError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let cell = |i: usize| -> Result<usize, GameError> {
            parts
                .get(i)
                .ok_or_else(|| GameError::Parse(format!("missing cell in action '{}'", line)))?
                .parse()
                .map_err(|_| GameError::Parse(format!("bad cell in action '{}'", line)))
        };

        match parts.first().copied() {
            Some("WAIT") => Ok(ActionKind::Wait),
            Some("GROW") => Ok(ActionKind::Grow { cell: cell(1)? }),
            Some("COMPLETE") => Ok(ActionKind::Complete { cell: cell(1)? }),
            Some("SEED") => Ok(ActionKind::Seed {
                source: cell(1)?,
                target: cell(2)?,
            }),
            _ => Err(GameError::Parse(format!("unknown action '{}'", line))),
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Ok(Action::new(line.parse()?, 0))
    }
}
