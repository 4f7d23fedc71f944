//! # Wumpus
//!
//! A wrap-around cavern network generator and a turn-based Hunt the Wumpus engine.
//!
//! ## Architecture Overview
//!
//! The crate is organised leaf-first:
//!
//! - **Grid**: [`Location`] and [`Direction`] implement torus coordinate arithmetic
//! - **Cave Network**: an arena of [`Cavern`] cells linked in symmetric pairs
//! - **Tunnel Resolution**: walks through disguised tunnel cells to the next real cave
//! - **Generation**: [`CaveGenerator`] carves exits, places tunnels, pits, bats and the
//!   Wumpus, and retries whole maps until every cell is reachable
//! - **Path Finding**: lane-aware backtracking routes between two cells
//! - **Engine**: the turn state machine that consumes player commands and returns
//!   [`GameEvent`] values describing what changed
//!
//! Randomness is always injected through [`RandomSource`], so generation and play
//! are reproducible from a seed.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Wumpus engine.
#[derive(thiserror::Error, Debug)]
pub enum WumpusError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Difficulty options are outside their documented ranges
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A numeric direction outside North, East, South and West
    #[error("Invalid direction value {0}")]
    InvalidDirection(u32),

    /// Coordinates outside the cavern grid
    #[error("Location ({row}, {column}) is outside the {height}x{width} grid", height = config::MAP_HEIGHT, width = config::MAP_WIDTH)]
    InvalidLocation { row: usize, column: usize },

    /// A generated cave network broke one of its guarantees
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Engine state is invalid for the requested operation
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Wumpus codebase.
pub type WumpusResult<T> = Result<T, WumpusError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Number of columns in the cavern grid
    pub const MAP_WIDTH: usize = 8;

    /// Number of rows in the cavern grid
    pub const MAP_HEIGHT: usize = 6;

    /// Total number of caverns in a network
    pub const CAVERN_COUNT: usize = MAP_WIDTH * MAP_HEIGHT;

    /// Tunnel-resolved hops the blood scent spreads from the Wumpus
    pub const BLOOD_SCENT_DEPTH: u32 = 2;

    /// Upper bound of the percentage roll that decides whether a bat carries the player
    pub const CARRY_ROLL: u32 = 100;

    /// Highest number of bats a difficulty may place
    pub const MAX_BATS: u32 = 2;

    /// Highest number of tunnels a difficulty may place
    pub const MAX_TUNNELS: u32 = 24;

    /// Highest number of pits a difficulty may place
    pub const MAX_PITS: u32 = 3;

    /// Bat carries allowed in one turn before the chain is cut off
    pub const MAX_CARRY_HOPS: usize = CAVERN_COUNT * CAVERN_COUNT;
}
