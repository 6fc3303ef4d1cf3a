//! Static hex board geometry
//!
//! The board is built once per game from the cell list sent by the server and never
//! changes afterwards. Every [`crate::GameState`] shares it read-only.

use std::collections::{HashMap, VecDeque};
use std::ops::Add;

use crate::{GameError, Result};

/// Number of hex directions
pub const NB_DIRECTIONS: usize = 6;

/// Hex directions in the order the server lists neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right = 0,
    TopRight = 1,
    TopLeft = 2,
    Left = 3,
    BottomLeft = 4,
    BottomRight = 5,
}

impl Direction {
    /// All directions, indexed by their protocol number
    pub const ALL: [Direction; NB_DIRECTIONS] = [
        Direction::Right,
        Direction::TopRight,
        Direction::TopLeft,
        Direction::Left,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// The sun direction for the given day
    pub fn from_day(day: u32) -> Direction {
        Self::ALL[day as usize % NB_DIRECTIONS]
    }

    /// Unit cube offset of one step in this direction
    pub fn offset(self) -> CubeCoord {
        match self {
            Direction::Right => CubeCoord::new(1, -1, 0),
            Direction::TopRight => CubeCoord::new(1, 0, -1),
            Direction::TopLeft => CubeCoord::new(0, 1, -1),
            Direction::Left => CubeCoord::new(-1, 1, 0),
            Direction::BottomLeft => CubeCoord::new(-1, 0, 1),
            Direction::BottomRight => CubeCoord::new(0, -1, 1),
        }
    }

    /// Index of the direction in neighbor and shade tables
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Cube coordinate of a hex cell (`x + y + z == 0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        CubeCoord { x, y, z }
    }

    /// Hex distance: the largest absolute coordinate delta
    pub fn distance(&self, other: &CubeCoord) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }

    fn scaled(self, factor: i32) -> CubeCoord {
        CubeCoord::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Add for CubeCoord {
    type Output = CubeCoord;

    fn add(self, rhs: CubeCoord) -> CubeCoord {
        CubeCoord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Raw cell description as sent by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpec {
    pub index: usize,
    /// 0 if the cell is unusable, 1-3 for usable cells
    pub richness: u8,
    /// Neighbor per direction, `None` at the board edge
    pub neighbors: [Option<usize>; NB_DIRECTIONS],
}

/// A board cell with its resolved position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCell {
    pub index: usize,
    pub richness: u8,
    pub neighbors: [Option<usize>; NB_DIRECTIONS],
    pub coord: CubeCoord,
}

/// Immutable board geometry with a precomputed all-pairs distance table
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<BoardCell>,
    distances: Vec<u8>,
}

impl Board {
    /// Builds the board from the server's cell list
    ///
    /// Cube coordinates are propagated outward from the center cell (index 0)
    /// through the neighbor links, so every cell must be reachable from it.
    pub fn from_cells(specs: Vec<CellSpec>) -> Result<Board> {
        if specs.is_empty() {
            return Err(GameError::EmptyBoard);
        }

        let count = specs.len();
        for (position, spec) in specs.iter().enumerate() {
            if spec.index != position {
                return Err(GameError::CellIndexMismatch {
                    position,
                    index: spec.index,
                });
            }
            if let Some(&bad) = spec.neighbors.iter().flatten().find(|&&n| n >= count) {
                return Err(GameError::CellOutOfRange(bad));
            }
        }

        let mut coords: Vec<Option<CubeCoord>> = vec![None; count];
        coords[0] = Some(CubeCoord::default());
        let mut queue = VecDeque::from([0usize]);

        while let Some(current) = queue.pop_front() {
            let origin = coords[current].unwrap_or_default();
            for dir in Direction::ALL {
                let Some(next) = specs[current].neighbors[dir.index()] else {
                    continue;
                };
                if coords[next].is_none() {
                    coords[next] = Some(origin + dir.offset());
                    queue.push_back(next);
                }
            }
        }

        let mut resolved = Vec::with_capacity(count);
        for (index, coord) in coords.into_iter().enumerate() {
            resolved.push(coord.ok_or(GameError::Disconnected(index))?);
        }

        Ok(Self::assemble(specs, resolved))
    }

    /// The fixed 37-cell competition board
    pub fn standard() -> Board {
        let (specs, coords) = hexagon(3);
        Self::assemble(specs, coords)
    }

    fn assemble(specs: Vec<CellSpec>, coords: Vec<CubeCoord>) -> Board {
        let cells: Vec<BoardCell> = specs
            .into_iter()
            .zip(coords)
            .map(|(spec, coord)| BoardCell {
                index: spec.index,
                richness: spec.richness,
                neighbors: spec.neighbors,
                coord,
            })
            .collect();

        let count = cells.len();
        let mut distances = vec![0u8; count * count];
        for a in 0..count {
            for b in 0..count {
                let d = cells[a].coord.distance(&cells[b].coord);
                distances[a * count + b] = d.min(u8::MAX as u32) as u8;
            }
        }

        Board { cells, distances }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in index order
    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    /// The cell at `index`
    pub fn cell(&self, index: usize) -> &BoardCell {
        &self.cells[index]
    }

    /// Richness of the cell at `index`
    pub fn richness(&self, index: usize) -> u8 {
        self.cells[index].richness
    }

    /// Neighbor of `index` in `dir`, `None` at the board edge
    pub fn neighbor(&self, index: usize, dir: Direction) -> Option<usize> {
        self.cells[index].neighbors[dir.index()]
    }

    /// Precomputed hex distance between two cells
    pub fn distance(&self, a: usize, b: usize) -> u8 {
        self.distances[a * self.cells.len() + b]
    }
}

/// Cell specs of a hexagonal board of the given radius, indexed in a spiral from the
/// center the way the server numbers them
///
/// Richness is 3 for the center and first ring, 2 for the second ring and 1 beyond.
pub fn hexagon_layout(radius: usize) -> Vec<CellSpec> {
    hexagon(radius).0
}

fn hexagon(radius: usize) -> (Vec<CellSpec>, Vec<CubeCoord>) {
    let mut coords = vec![CubeCoord::default()];
    let mut rings = vec![0usize];

    for ring in 1..=radius {
        let mut pos = Direction::Right.offset().scaled(ring as i32);
        for side in 0..NB_DIRECTIONS {
            let step = Direction::ALL[(side + 2) % NB_DIRECTIONS].offset();
            for _ in 0..ring {
                coords.push(pos);
                rings.push(ring);
                pos = pos + step;
            }
        }
    }

    let lookup: HashMap<CubeCoord, usize> =
        coords.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    let specs = coords
        .iter()
        .zip(&rings)
        .enumerate()
        .map(|(index, (coord, ring))| {
            let mut neighbors = [None; NB_DIRECTIONS];
            for dir in Direction::ALL {
                neighbors[dir.index()] = lookup.get(&(*coord + dir.offset())).copied();
            }
            let richness = match ring {
                0 | 1 => 3,
                2 => 2,
                _ => 1,
            };
            CellSpec {
                index,
                richness,
                neighbors,
            }
        })
        .collect();

    (specs, coords)
}
