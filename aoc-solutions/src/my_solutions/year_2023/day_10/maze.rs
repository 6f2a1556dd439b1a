//! Pipe maze grid: parsing, start-shape inference, loop walking and
//! enclosure counting.

use thiserror::Error;

/// Reasons a maze can be rejected. Lines and columns are 1-based, grid
/// rows and columns in [`MazeError::BrokenLoop`] are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("unknown tile {symbol:?} at line {line}, column {column}")]
    InvalidTile {
        symbol: char,
        line: usize,
        column: usize,
    },
    #[error("line {line} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("the maze has no start tile")]
    MissingStart,
    #[error("the maze has more than one start tile")]
    MultipleStarts,
    #[error("{0} pipes connect to the start tile, expected exactly 2")]
    AmbiguousStart(usize),
    #[error("the loop breaks at row {row}, column {col}")]
    BrokenLoop { row: usize, col: usize },
}

/// Compass step between neighbouring tiles; north is one row up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// One grid cell, named after the two directions its pipe joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Vertical,
    Horizontal,
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
    Ground,
    Start,
}

impl Tile {
    /// Directions a pipe leads out of this tile. Empty for ground and for
    /// the start tile, whose shape is only known once the maze is read.
    pub fn exits(self) -> &'static [Direction] {
        use Direction::*;
        match self {
            Tile::Vertical => &[North, South],
            Tile::Horizontal => &[East, West],
            Tile::NorthEast => &[North, East],
            Tile::NorthWest => &[North, West],
            Tile::SouthWest => &[South, West],
            Tile::SouthEast => &[South, East],
            Tile::Ground | Tile::Start => &[],
        }
    }

    pub fn connects(self, direction: Direction) -> bool {
        self.exits().contains(&direction)
    }

    fn from_exits(exits: &[Direction]) -> Option<Tile> {
        [
            Tile::Vertical,
            Tile::Horizontal,
            Tile::NorthEast,
            Tile::NorthWest,
            Tile::SouthWest,
            Tile::SouthEast,
        ]
        .into_iter()
        .find(|tile| {
            tile.exits().len() == exits.len() && exits.iter().all(|&d| tile.connects(d))
        })
    }
}

impl TryFrom<char> for Tile {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            '|' => Tile::Vertical,
            '-' => Tile::Horizontal,
            'L' => Tile::NorthEast,
            'J' => Tile::NorthWest,
            '7' => Tile::SouthWest,
            'F' => Tile::SouthEast,
            '.' => Tile::Ground,
            'S' => Tile::Start,
            other => return Err(other),
        })
    }
}

pub type Position = (usize, usize);

/// A rectangular pipe grid with the start tile already replaced by the
/// pipe shape that fits its neighbours.
#[derive(Debug, Clone)]
pub struct PipeMaze {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    start: Position,
}

impl PipeMaze {
    /// Reads the grid and resolves the start tile.
    ///
    /// Blank lines are skipped. Fails on unknown symbols, rows of unequal
    /// width, a missing or repeated `S`, and a start that does not have
    /// exactly two connecting neighbours.
    pub fn parse(input: &str) -> Result<Self, MazeError> {
        let mut width = None;
        let mut tiles = Vec::new();
        let mut start = None;

        for (row, line) in input.lines().map(str::trim_end).filter(|l| !l.is_empty()).enumerate() {
            let row_start = tiles.len();
            for (col, symbol) in line.chars().enumerate() {
                let tile = Tile::try_from(symbol).map_err(|symbol| MazeError::InvalidTile {
                    symbol,
                    line: row + 1,
                    column: col + 1,
                })?;
                if tile == Tile::Start && start.replace((row, col)).is_some() {
                    return Err(MazeError::MultipleStarts);
                }
                tiles.push(tile);
            }

            let found = tiles.len() - row_start;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(MazeError::RaggedRow {
                        line: row + 1,
                        found,
                        expected,
                    });
                }
                Some(_) => {}
            }
        }

        let start = start.ok_or(MazeError::MissingStart)?;
        let width = width.unwrap_or_default();
        let mut maze = PipeMaze {
            width,
            height: tiles.len() / width.max(1),
            tiles,
            start,
        };

        let exits: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| {
                maze.neighbour(start, dir)
                    .is_some_and(|next| maze.tile(next).connects(dir.opposite()))
            })
            .collect();
        let shape = match exits.len() {
            2 => Tile::from_exits(&exits),
            _ => None,
        }
        .ok_or(MazeError::AmbiguousStart(exits.len()))?;
        let index = maze.index(start);
        maze.tiles[index] = shape;

        Ok(maze)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn tile(&self, (row, col): Position) -> Tile {
        self.tiles[row * self.width + col]
    }

    fn index(&self, (row, col): Position) -> usize {
        row * self.width + col
    }

    fn neighbour(&self, (row, col): Position, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::North => (row.checked_sub(1)?, col),
            Direction::South => (row + 1, col),
            Direction::East => (row, col + 1),
            Direction::West => (row, col.checked_sub(1)?),
        };
        (next.0 < self.height && next.1 < self.width).then_some(next)
    }

    /// Walks the loop through the start tile, returning its tiles in order.
    pub fn main_loop(&self) -> Result<Vec<Position>, MazeError> {
        let (row, col) = self.start;
        let mut heading = self
            .tile(self.start)
            .exits()
            .first()
            .copied()
            .ok_or(MazeError::BrokenLoop { row, col })?;
        let mut path = vec![self.start];
        let mut current = self.start;

        loop {
            let (row, col) = current;
            let next = self
                .neighbour(current, heading)
                .ok_or(MazeError::BrokenLoop { row, col })?;
            if next == self.start {
                return Ok(path);
            }

            let came_from = heading.opposite();
            let tile = self.tile(next);
            if !tile.connects(came_from) {
                return Err(MazeError::BrokenLoop {
                    row: next.0,
                    col: next.1,
                });
            }
            heading = tile
                .exits()
                .iter()
                .copied()
                .find(|&d| d != came_from)
                .ok_or(MazeError::BrokenLoop {
                    row: next.0,
                    col: next.1,
                })?;
            path.push(next);
            current = next;
        }
    }

    /// Counts tiles off the loop that the loop encloses.
    ///
    /// Scans each row west to east; a tile is inside when the loop tiles to
    /// its west include an odd number of pipes leading north.
    pub fn enclosed_count(&self, main_loop: &[Position]) -> usize {
        let mut on_loop = vec![false; self.tiles.len()];
        for &position in main_loop {
            on_loop[self.index(position)] = true;
        }

        let mut enclosed = 0;
        for row in 0..self.height {
            let mut inside = false;
            for col in 0..self.width {
                let index = self.index((row, col));
                if on_loop[index] {
                    inside ^= self.tiles[index].connects(Direction::North);
                } else if inside {
                    enclosed += 1;
                }
            }
        }
        enclosed
    }
}
