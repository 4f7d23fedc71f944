//! # Game Module
//!
//! Core cavern representation and the turn-based engine.
//!
//! This module contains the fundamental building blocks of the game:
//! - Torus grid coordinates and compass directions
//! - Caverns and the arena that links them
//! - Tunnel resolution through disguised passages
//! - Domain events, outcome messages and the engine state machine

pub mod cavern;
pub mod events;
pub mod messages;
pub mod network;
pub mod state;
pub mod tunnels;

pub use cavern::*;
pub use events::*;
pub use messages::*;
pub use network::*;
pub use state::*;
pub use tunnels::*;

use crate::config::{CAVERN_COUNT, MAP_HEIGHT, MAP_WIDTH};
use crate::{WumpusError, WumpusResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Compass directions for movement, firing and cavern links.
///
/// The discriminants are the canonical numeric values accepted from callers;
/// anything outside `0..=3` is rejected by [`Direction::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All four directions in link order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the direction pointing the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::Direction;
    ///
    /// assert_eq!(Direction::North.opposite(), Direction::South);
    /// assert_eq!(Direction::West.opposite(), Direction::East);
    /// ```
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 2) % 4]
    }

    /// The next direction clockwise, wrapping from West back to North.
    pub fn clockwise(self) -> Direction {
        Direction::ALL[(self.index() + 1) % 4]
    }

    /// Index of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for Direction {
    type Error = WumpusError;

    fn try_from(value: u32) -> WumpusResult<Self> {
        match value {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            other => Err(WumpusError::InvalidDirection(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// A cell coordinate on the wrap-around cavern grid.
///
/// Rows and columns are bounded by [`MAP_HEIGHT`] and [`MAP_WIDTH`]; stepping
/// off any edge re-enters from the opposite edge.
///
/// # Examples
///
/// ```
/// use wumpus::{Direction, Location};
///
/// let corner = Location::new(0, 0).unwrap();
/// assert_eq!(corner.step(Direction::North), Location::new(5, 0).unwrap());
/// assert_eq!(corner.step(Direction::West), Location::new(0, 7).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    row: usize,
    column: usize,
}

impl Location {
    /// Creates a location, rejecting coordinates outside the grid.
    pub fn new(row: usize, column: usize) -> WumpusResult<Self> {
        if row >= MAP_HEIGHT || column >= MAP_WIDTH {
            return Err(WumpusError::InvalidLocation { row, column });
        }

        Ok(Self { row, column })
    }

    /// Creates a location from its arena index (`row * width + column`).
    pub fn from_index(index: usize) -> WumpusResult<Self> {
        if index >= CAVERN_COUNT {
            return Err(WumpusError::InvalidLocation {
                row: index / MAP_WIDTH,
                column: index % MAP_WIDTH,
            });
        }

        Ok(Self {
            row: index / MAP_WIDTH,
            column: index % MAP_WIDTH,
        })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn column(self) -> usize {
        self.column
    }

    /// Arena index of this location.
    pub fn index(self) -> usize {
        self.row * MAP_WIDTH + self.column
    }

    /// Returns the neighbouring location one cell away, wrapping at the edges.
    pub fn step(self, direction: Direction) -> Location {
        match direction {
            Direction::North => Location {
                row: (self.row + MAP_HEIGHT - 1) % MAP_HEIGHT,
                column: self.column,
            },
            Direction::East => Location {
                row: self.row,
                column: (self.column + 1) % MAP_WIDTH,
            },
            Direction::South => Location {
                row: (self.row + 1) % MAP_HEIGHT,
                column: self.column,
            },
            Direction::West => Location {
                row: self.row,
                column: (self.column + MAP_WIDTH - 1) % MAP_WIDTH,
            },
        }
    }

    /// Iterates every location in row-major order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..CAVERN_COUNT).map(|index| Location {
            row: index / MAP_WIDTH,
            column: index % MAP_WIDTH,
        })
    }
}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
