//! # Cave Network
//!
//! Arena of caverns for one game instance.
//!
//! Caverns are stored flat in row-major order, so a cavern's arena index is
//! its [`Location::index`]. Links are stored as indices and are always
//! written in symmetric pairs by [`CaveNetwork::connect`].

use crate::config::{MAP_HEIGHT, MAP_WIDTH};
use crate::{Cavern, Direction, Location, RandomSource};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// All caverns of one game, indexed by location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveNetwork {
    caverns: Vec<Cavern>,
}

impl CaveNetwork {
    /// Allocates a full grid of unlinked cave rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::CaveNetwork;
    ///
    /// let network = CaveNetwork::new();
    /// assert_eq!(network.len(), 48);
    /// assert!(network.caverns().all(|c| c.is_cave && c.exit_count() == 0));
    /// ```
    pub fn new() -> Self {
        Self {
            caverns: Location::all().map(Cavern::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.caverns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caverns.is_empty()
    }

    /// Gets a cavern by arena index.
    pub fn get(&self, index: usize) -> Option<&Cavern> {
        self.caverns.get(index)
    }

    pub fn caverns(&self) -> impl Iterator<Item = &Cavern> {
        self.caverns.iter()
    }

    pub fn caverns_mut(&mut self) -> impl Iterator<Item = &mut Cavern> {
        self.caverns.iter_mut()
    }

    /// The raw grid neighbour, ignoring links and tunnels.
    pub fn adjacent_cell(&self, location: Location, direction: Direction) -> &Cavern {
        &self[location.step(direction)]
    }

    /// The cavern linked from `location` in `direction`, if an exit exists.
    pub fn linked(&self, location: Location, direction: Direction) -> Option<&Cavern> {
        self[location]
            .link(direction)
            .and_then(|index| self.caverns.get(index))
    }

    /// Links `location` to its grid neighbour in `direction`, and the neighbour back.
    pub fn connect(&mut self, location: Location, direction: Direction) {
        let neighbour = location.step(direction);
        self[location].set_link(direction, Some(neighbour.index()));
        self[neighbour].set_link(direction.opposite(), Some(location.index()));
    }

    /// Removes the link in `direction` together with its reverse half.
    pub fn disconnect(&mut self, location: Location, direction: Direction) {
        if let Some(target) = self[location].link(direction) {
            self[location].set_link(direction, None);

            let back = direction.opposite();
            if let Some(other) = self.caverns.get_mut(target) {
                if other.link(back) == Some(location.index()) {
                    other.set_link(back, None);
                }
            }
        }
    }

    /// Draws a uniformly random location, row first then column.
    pub fn random_location(rng: &mut dyn RandomSource) -> Location {
        let row = rng.next_int(MAP_HEIGHT as u32) as usize;
        let column = rng.next_int(MAP_WIDTH as u32) as usize;
        Location {
            row: row % MAP_HEIGHT,
            column: column % MAP_WIDTH,
        }
    }

    /// Roosts a bat on a random real cave that has no bat yet.
    ///
    /// Keeps drawing until a suitable cavern comes up and returns its location.
    pub fn place_random_bat(&mut self, rng: &mut dyn RandomSource) -> Location {
        loop {
            let location = Self::random_location(rng);
            let cavern = &mut self[location];

            if cavern.is_cave && !cavern.has_bat {
                cavern.has_bat = true;
                return location;
            }
        }
    }

    pub fn wumpus_location(&self) -> Option<Location> {
        self.caverns
            .iter()
            .find(|cavern| cavern.has_wumpus)
            .map(Cavern::location)
    }

    pub fn pit_locations(&self) -> Vec<Location> {
        self.locations_where(|cavern| cavern.is_pit)
    }

    pub fn bat_locations(&self) -> Vec<Location> {
        self.locations_where(|cavern| cavern.has_bat)
    }

    pub fn tunnel_locations(&self) -> Vec<Location> {
        self.locations_where(|cavern| !cavern.is_cave)
    }

    /// Locations of every cavern matching `predicate`, in row-major order.
    pub fn locations_where(&self, predicate: impl Fn(&Cavern) -> bool) -> Vec<Location> {
        self.caverns
            .iter()
            .filter(|cavern| predicate(cavern))
            .map(Cavern::location)
            .collect()
    }

    /// Reveals every cavern and returns the ones that were hidden.
    pub fn reveal_all(&mut self) -> Vec<Location> {
        self.caverns
            .iter_mut()
            .filter_map(|cavern| {
                if cavern.reveal() {
                    Some(cavern.location())
                } else {
                    None
                }
            })
            .collect()
    }

    /// True if `b` is one grid step from `a`, counting wrap-around.
    pub fn is_adjacent(a: Location, b: Location) -> bool {
        Direction::ALL.into_iter().any(|direction| a.step(direction) == b)
    }

    /// Direction of a linked single step from `start` to `end`.
    ///
    /// Returns `None` when the locations are not adjacent or no link joins them.
    pub fn direction_between(&self, start: Location, end: Location) -> Option<Direction> {
        Direction::ALL.into_iter().find(|direction| {
            start.step(*direction) == end && self[start].link(*direction) == Some(end.index())
        })
    }
}

impl Default for CaveNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Location> for CaveNetwork {
    type Output = Cavern;

    fn index(&self, location: Location) -> &Cavern {
        &self.caverns[location.index()]
    }
}

impl IndexMut<Location> for CaveNetwork {
    fn index_mut(&mut self, location: Location) -> &mut Cavern {
        &mut self.caverns[location.index()]
    }
}
