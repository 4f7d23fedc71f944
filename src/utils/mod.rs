//! # Utilities Module
//!
//! Random sources and lane-aware path finding over cave networks.

pub mod pathfinding;
pub mod random;

pub use pathfinding::*;
pub use random::*;
