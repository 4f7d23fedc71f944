//! # Caverns
//!
//! A single cell of the cave network: its links, hazards and warnings.

use crate::{Direction, Location};
use serde::{Deserialize, Serialize};

/// One grid cell of a cave network.
///
/// Links are arena indices into the owning [`CaveNetwork`](crate::CaveNetwork)
/// and can only be created through it, which keeps every link paired with
/// its reverse. Hazard and warning flags are public and mutate during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cavern {
    location: Location,
    links: [Option<usize>; 4],
    /// False when this cell is a disguised tunnel rather than a cave room
    pub is_cave: bool,
    /// Bottomless pit
    pub is_pit: bool,
    /// A pit is one tunnel-resolved step away
    pub is_adjacent_pit: bool,
    /// Within blood-scent range of the Wumpus
    pub has_blood: bool,
    /// A bat roosts here
    pub has_bat: bool,
    /// The Wumpus lives here
    pub has_wumpus: bool,
    is_revealed: bool,
    /// Facing used to enter this cavern, present only while the player is here
    pub player_direction: Option<Direction>,
}

impl Cavern {
    /// Creates an unlinked cave room.
    pub fn new(location: Location) -> Self {
        Self {
            location,
            links: [None; 4],
            is_cave: true,
            is_pit: false,
            is_adjacent_pit: false,
            has_blood: false,
            has_bat: false,
            has_wumpus: false,
            is_revealed: false,
            player_direction: None,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Arena index of the cavern linked in `direction`, if any.
    pub fn link(&self, direction: Direction) -> Option<usize> {
        self.links[direction.index()]
    }

    pub fn has_exit(&self, direction: Direction) -> bool {
        self.links[direction.index()].is_some()
    }

    /// Number of directions with a link (0-4).
    pub fn exit_count(&self) -> usize {
        self.links.iter().filter(|link| link.is_some()).count()
    }

    /// Directions that currently have a link, in N, E, S, W order.
    pub fn exits(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.has_exit(*direction))
    }

    /// True for a tunnel hosting two independent lanes.
    pub fn is_four_way_tunnel(&self) -> bool {
        !self.is_cave && self.exit_count() == 4
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// Marks the cavern as seen. Returns true if it was hidden before.
    pub fn reveal(&mut self) -> bool {
        let was_hidden = !self.is_revealed;
        self.is_revealed = true;
        was_hidden
    }

    /// True when landing here ends the game.
    pub fn is_fatal(&self) -> bool {
        self.has_wumpus || self.is_pit
    }

    pub(crate) fn set_link(&mut self, direction: Direction, target: Option<usize>) {
        self.links[direction.index()] = target;
    }
}
