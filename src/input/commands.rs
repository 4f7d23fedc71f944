//! # Command Definitions
//!
//! The commands the engine understands.

use crate::Direction;
use serde::{Deserialize, Serialize};

/// A player command consumed by [`Engine::handle_command`](crate::Engine::handle_command).
///
/// `Move` walks while the game is running and shoots while aiming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    ToggleFire,
    CancelFire,
}

impl Command {
    /// Parses a single command word such as `n`, `west` or `fire`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::{Command, Direction};
    ///
    /// assert_eq!(Command::parse("N"), Some(Command::Move(Direction::North)));
    /// assert_eq!(Command::parse("fire"), Some(Command::ToggleFire));
    /// assert_eq!(Command::parse("jump"), None);
    /// ```
    pub fn parse(word: &str) -> Option<Command> {
        let word = word.trim().to_ascii_lowercase();
        if let Some(direction) = parse_direction(&word) {
            return Some(Command::Move(direction));
        }

        match word.as_str() {
            "f" | "fire" | "aim" => Some(Command::ToggleFire),
            "c" | "cancel" => Some(Command::CancelFire),
            _ => None,
        }
    }
}

/// Parses a compass word or its one-letter abbreviation.
pub fn parse_direction(word: &str) -> Option<Direction> {
    match word.trim().to_ascii_lowercase().as_str() {
        "n" | "north" | "up" => Some(Direction::North),
        "e" | "east" | "right" => Some(Direction::East),
        "s" | "south" | "down" => Some(Direction::South),
        "w" | "west" | "left" => Some(Direction::West),
        _ => None,
    }
}
