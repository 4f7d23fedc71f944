//! # Generation Module
//!
//! Procedural cave network generation.
//!
//! This module holds the difficulty options that parameterise a map and the
//! [`Generator`] trait implemented by [`CaveGenerator`]. Generation draws every
//! random value from a [`RandomSource`], so a map is fully determined by the
//! options and the sequence of draws.

pub mod caverns;

pub use caverns::*;

use crate::config::{CARRY_ROLL, MAX_BATS, MAX_PITS, MAX_TUNNELS};
use crate::{RandomSource, WumpusError, WumpusResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Difficulty tiers, ordered from easiest to hardest.
///
/// Below [`GameDifficulty::Hard`] the exit carver avoids re-drawing
/// directions that already have a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameDifficulty {
    Easy,
    Normal,
    Hard,
}

impl FromStr for GameDifficulty {
    type Err = WumpusError;

    fn from_str(value: &str) -> WumpusResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(GameDifficulty::Easy),
            "normal" => Ok(GameDifficulty::Normal),
            "hard" => Ok(GameDifficulty::Hard),
            other => Err(WumpusError::InvalidConfiguration(format!(
                "unknown difficulty '{}', expected easy, normal or hard",
                other
            ))),
        }
    }
}

impl fmt::Display for GameDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameDifficulty::Easy => "easy",
            GameDifficulty::Normal => "normal",
            GameDifficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Numeric parameters for one game.
///
/// Options are checked by [`DifficultyOptions::validate`] before any map is
/// built; values outside their ranges are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyOptions {
    /// Tier controlling how exits are carved
    pub difficulty: GameDifficulty,
    /// Number of bats roosting in the network (0-2)
    pub bat_count: u32,
    /// Percent chance a bat carries the player off (0-100)
    pub bat_carry_pct: u32,
    /// Most caverns that may be turned into tunnels (0-24)
    pub max_tunnels: u32,
    /// Number of bottomless pits (0-3)
    pub num_pits: u32,
}

impl DifficultyOptions {
    /// Creates options, validating every range.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::{DifficultyOptions, GameDifficulty};
    ///
    /// let options = DifficultyOptions::new(GameDifficulty::Normal, 0, 0, 0, 0).unwrap();
    /// assert_eq!(options.max_tunnels, 0);
    ///
    /// assert!(DifficultyOptions::new(GameDifficulty::Easy, 3, 0, 0, 0).is_err());
    /// ```
    pub fn new(
        difficulty: GameDifficulty,
        bat_count: u32,
        bat_carry_pct: u32,
        max_tunnels: u32,
        num_pits: u32,
    ) -> WumpusResult<Self> {
        let options = Self {
            difficulty,
            bat_count,
            bat_carry_pct,
            max_tunnels,
            num_pits,
        };
        options.validate()?;
        Ok(options)
    }

    /// One bat that carries half the time, a few tunnels, a single pit.
    pub fn easy() -> Self {
        Self {
            difficulty: GameDifficulty::Easy,
            bat_count: 1,
            bat_carry_pct: 50,
            max_tunnels: 5,
            num_pits: 1,
        }
    }

    pub fn normal() -> Self {
        Self {
            difficulty: GameDifficulty::Normal,
            bat_count: 2,
            bat_carry_pct: 66,
            max_tunnels: 15,
            num_pits: 2,
        }
    }

    pub fn hard() -> Self {
        Self {
            difficulty: GameDifficulty::Hard,
            bat_count: 2,
            bat_carry_pct: 75,
            max_tunnels: MAX_TUNNELS,
            num_pits: MAX_PITS,
        }
    }

    /// The preset for a difficulty tier.
    pub fn from_difficulty(difficulty: GameDifficulty) -> Self {
        match difficulty {
            GameDifficulty::Easy => Self::easy(),
            GameDifficulty::Normal => Self::normal(),
            GameDifficulty::Hard => Self::hard(),
        }
    }

    /// Loads custom options from a JSON file and validates them.
    pub fn from_json_file(path: impl AsRef<Path>) -> WumpusResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks every option against its documented range.
    pub fn validate(&self) -> WumpusResult<()> {
        check_range("bat count", self.bat_count, MAX_BATS)?;
        check_range("bat carry percentage", self.bat_carry_pct, CARRY_ROLL)?;
        check_range("tunnel count", self.max_tunnels, MAX_TUNNELS)?;
        check_range("pit count", self.num_pits, MAX_PITS)?;
        Ok(())
    }
}

impl Default for DifficultyOptions {
    fn default() -> Self {
        Self::normal()
    }
}

fn check_range(name: &str, value: u32, max: u32) -> WumpusResult<()> {
    if value > max {
        return Err(WumpusError::InvalidConfiguration(format!(
            "{} must be between 0 and {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}

/// Trait for procedural generators.
///
/// Generators take their parameters from [`DifficultyOptions`] and every
/// random draw from the supplied source.
pub trait Generator<T> {
    /// Generates content for the given options.
    fn generate(&self, options: &DifficultyOptions, rng: &mut dyn RandomSource)
        -> WumpusResult<T>;

    /// Validates that generated content meets its requirements.
    fn validate(&self, content: &T, options: &DifficultyOptions) -> WumpusResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use crate::SeededRandom;

    /// Creates a seeded random source, drawing a seed from the OS when none is given.
    pub fn create_rng(seed: Option<u64>) -> SeededRandom {
        match seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomSource;

    #[test]
    fn test_presets_are_valid() {
        for difficulty in [
            GameDifficulty::Easy,
            GameDifficulty::Normal,
            GameDifficulty::Hard,
        ] {
            let options = DifficultyOptions::from_difficulty(difficulty);
            assert_eq!(options.difficulty, difficulty);
            assert!(options.validate().is_ok());
        }

        let hard = DifficultyOptions::hard();
        assert_eq!(hard.max_tunnels, 24);
        assert_eq!(hard.num_pits, 3);
        assert_eq!(DifficultyOptions::default(), DifficultyOptions::normal());
    }

    #[test]
    fn test_out_of_range_options_rejected() {
        let cases = [
            (3, 0, 0, 0),
            (0, 101, 0, 0),
            (0, 0, 25, 0),
            (0, 0, 0, 4),
        ];

        for (bats, carry, tunnels, pits) in cases {
            let result = DifficultyOptions::new(GameDifficulty::Normal, bats, carry, tunnels, pits);
            assert!(
                matches!(result, Err(WumpusError::InvalidConfiguration(_))),
                "({bats}, {carry}, {tunnels}, {pits}) should be rejected"
            );
        }
    }

    #[test]
    fn test_boundary_options_accepted() {
        assert!(DifficultyOptions::new(GameDifficulty::Hard, 2, 100, 24, 3).is_ok());
        assert!(DifficultyOptions::new(GameDifficulty::Easy, 0, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_difficulty_ordering_and_parsing() {
        assert!(GameDifficulty::Easy < GameDifficulty::Normal);
        assert!(GameDifficulty::Normal < GameDifficulty::Hard);

        assert_eq!("HARD".parse::<GameDifficulty>().unwrap(), GameDifficulty::Hard);
        assert_eq!(" easy ".parse::<GameDifficulty>().unwrap(), GameDifficulty::Easy);
        assert!("nightmare".parse::<GameDifficulty>().is_err());
        assert_eq!(GameDifficulty::Normal.to_string(), "normal");
    }

    #[test]
    fn test_options_json_shape() {
        let json = serde_json::to_string(&DifficultyOptions::easy()).unwrap();
        assert!(json.contains("\"bat_carry_pct\":50"));
        assert!(json.contains("\"difficulty\":\"easy\""));

        let parsed: DifficultyOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DifficultyOptions::easy());
    }

    #[test]
    fn test_utils_rng_creation() {
        let mut seeded = utils::create_rng(Some(12345));
        assert_eq!(seeded.seed(), 12345);
        assert!(seeded.next_int(10) < 10);

        let _random = utils::create_rng(None);
    }
}
