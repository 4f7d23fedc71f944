//! # Input Module
//!
//! Turns lines typed at the terminal into player input.

pub mod commands;

pub use commands::*;

use crate::{Direction, GameDifficulty};

/// Line-based input handler.
///
/// Handles typed words and converts them to [`PlayerInput`] values that the
/// terminal driver routes to the engine.
pub struct InputHandler {
    /// Whether to accept Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::{Command, Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(
    ///     input_handler.parse_line("k"),
    ///     Some(PlayerInput::Command(Command::Move(Direction::North)))
    /// );
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of input. Returns `None` for anything unrecognised.
    pub fn parse_line(&self, line: &str) -> Option<PlayerInput> {
        let mut words = line.split_whitespace();
        let first = words.next()?.to_ascii_lowercase();
        let second = words.next();

        match first.as_str() {
            "q" | "quit" | "exit" => return Some(PlayerInput::Quit),
            "?" | "help" => return Some(PlayerInput::Help),
            "m" | "map" => return Some(PlayerInput::ShowMap),
            "r" | "restart" => return Some(PlayerInput::Restart),
            "new" => {
                return match second {
                    Some(word) => word.parse().ok().map(|d| PlayerInput::NewGame(Some(d))),
                    None => Some(PlayerInput::NewGame(None)),
                }
            }
            "shoot" => return second.and_then(parse_direction).map(PlayerInput::Shoot),
            _ => {}
        }

        // "fire north" shoots in one step; a bare "fire" toggles aiming.
        if let (Some(Command::ToggleFire), Some(word)) = (Command::parse(&first), second) {
            return parse_direction(word).map(PlayerInput::Shoot);
        }

        if self.vi_keys_enabled {
            if let Some(direction) = vi_direction(&first) {
                return Some(PlayerInput::Command(Command::Move(direction)));
            }
        }

        Command::parse(&first).map(PlayerInput::Command)
    }
}

fn vi_direction(word: &str) -> Option<Direction> {
    match word {
        "k" => Some(Direction::North),
        "l" => Some(Direction::East),
        "j" => Some(Direction::South),
        "h" => Some(Direction::West),
        _ => None,
    }
}

/// Player input types produced by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// A command for the engine
    Command(Command),
    /// Aim and fire in one step
    Shoot(Direction),
    /// Start a new game, optionally switching difficulty
    NewGame(Option<GameDifficulty>),
    /// Start a new game with the same difficulty
    Restart,
    /// Print the cave map
    ShowMap,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}
