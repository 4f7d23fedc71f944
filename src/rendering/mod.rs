//! # Rendering Module
//!
//! Plain-text output for the terminal driver: the cave map, the warnings a
//! player senses and short descriptions of game events.

pub mod display;

pub use display::*;
