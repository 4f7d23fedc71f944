//! # Path Finding
//!
//! Routes between caverns that respect tunnel lanes.
//!
//! Plain caves branch into every link. A two-exit tunnel never turns back
//! through its entrance. A four-exit tunnel only lets a traveller continue
//! along the lane they entered on, and each of its lanes is tracked
//! separately so one lane being used never blocks the other.

use crate::{lane_exit, CaveNetwork, Cavern, Direction, Lane, Location};

const NORTH_WEST_MARK: u8 = 0b01;
const EAST_SOUTH_MARK: u8 = 0b10;

/// A search state: where the traveller is and which side they came in from.
type Step = (Location, Option<Direction>);

/// Lane-aware route search over one cave network.
///
/// # Examples
///
/// ```
/// use wumpus::{CaveNetwork, Direction, Location, PathFinder};
///
/// let mut network = CaveNetwork::new();
/// let start = Location::new(0, 0).unwrap();
/// network.connect(start, Direction::East);
///
/// let route = PathFinder::new(&network)
///     .route(start, start.step(Direction::East))
///     .unwrap();
/// assert_eq!(route, vec![Location::new(0, 1).unwrap()]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    network: &'a CaveNetwork,
    only_revealed: bool,
}

impl<'a> PathFinder<'a> {
    pub fn new(network: &'a CaveNetwork) -> Self {
        Self {
            network,
            only_revealed: false,
        }
    }

    /// Treats never-revealed caverns (other than the destination) as impassable.
    pub fn only_revealed(mut self, only_revealed: bool) -> Self {
        self.only_revealed = only_revealed;
        self
    }

    /// Depth-first backtracking route from `start` to `end`.
    ///
    /// The route excludes `start`, ends with `end` and is in travel order; it
    /// is empty when `start == end` and `None` when `end` cannot be reached.
    pub fn route(&self, start: Location, end: Location) -> Option<Vec<Location>> {
        let mut marks = vec![0u8; self.network.len()];
        let mut route = Vec::new();

        if self.traverse(&mut marks, start, end, None, &mut route) {
            route.reverse();
            Some(route)
        } else {
            None
        }
    }

    /// Breadth-first shortest route with the same lane rules as [`PathFinder::route`].
    pub fn shortest_route(&self, start: Location, end: Location) -> Option<Vec<Location>> {
        let path = ::pathfinding::prelude::bfs(
            &(start, None),
            |step: &Step| self.successors(*step),
            |step: &Step| step.0 == end,
        )?;

        Some(path.into_iter().skip(1).map(|(location, _)| location).collect())
    }

    fn traverse(
        &self,
        marks: &mut [u8],
        location: Location,
        end: Location,
        entrance: Option<Direction>,
        route: &mut Vec<Location>,
    ) -> bool {
        if location == end {
            return true;
        }

        let cavern = &self.network[location];
        if self.only_revealed && !cavern.is_revealed() {
            return false;
        }

        let index = location.index();

        if cavern.is_four_way_tunnel() {
            let exit = lane_exit(entrance.unwrap_or(Direction::West));
            let mark = match Lane::of(exit) {
                Lane::NorthWest => NORTH_WEST_MARK,
                Lane::EastSouth => EAST_SOUTH_MARK,
            };

            if marks[index] & mark != 0 {
                return false;
            }
            marks[index] |= mark;

            let next = location.step(exit);
            return self.enter(marks, next, end, exit.opposite(), route);
        }

        if marks[index] & NORTH_WEST_MARK != 0 {
            return false;
        }
        marks[index] |= NORTH_WEST_MARK;

        for direction in Direction::ALL {
            if !cavern.is_cave && entrance == Some(direction) {
                continue;
            }

            let Some(next) = self.linked_location(cavern, direction) else {
                continue;
            };

            if self.enter(marks, next, end, direction.opposite(), route) {
                return true;
            }
        }

        false
    }

    fn enter(
        &self,
        marks: &mut [u8],
        next: Location,
        end: Location,
        entrance: Direction,
        route: &mut Vec<Location>,
    ) -> bool {
        if self.traverse(marks, next, end, Some(entrance), route) {
            route.push(next);
            true
        } else {
            false
        }
    }

    fn successors(&self, (location, entrance): Step) -> Vec<Step> {
        let cavern = &self.network[location];

        if self.only_revealed && !cavern.is_revealed() {
            return Vec::new();
        }

        let directions: Vec<Direction> = if cavern.is_four_way_tunnel() {
            vec![lane_exit(entrance.unwrap_or(Direction::West))]
        } else if cavern.is_cave {
            cavern.exits().collect()
        } else {
            cavern
                .exits()
                .filter(|direction| entrance != Some(*direction))
                .collect()
        };

        directions
            .into_iter()
            .filter_map(|direction| {
                let next = self.linked_location(cavern, direction)?;
                let entry = if self.network[next].is_cave {
                    None
                } else {
                    Some(direction.opposite())
                };
                Some((next, entry))
            })
            .collect()
    }

    fn linked_location(&self, cavern: &Cavern, direction: Direction) -> Option<Location> {
        cavern
            .link(direction)
            .and_then(|index| self.network.get(index))
            .map(Cavern::location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(row: usize, column: usize) -> Location {
        Location::new(row, column).unwrap()
    }

    /// A straight east-west corridor along row 1 from column 0 to column 4.
    fn corridor() -> CaveNetwork {
        let mut network = CaveNetwork::new();
        for column in 0..4 {
            network.connect(loc(1, column), Direction::East);
        }
        network
    }

    #[test]
    fn test_route_along_corridor() {
        let network = corridor();
        let route = PathFinder::new(&network).route(loc(1, 0), loc(1, 4)).unwrap();

        assert_eq!(route, vec![loc(1, 1), loc(1, 2), loc(1, 3), loc(1, 4)]);
    }

    #[test]
    fn test_route_to_self_is_empty() {
        let network = corridor();
        assert_eq!(
            PathFinder::new(&network).route(loc(1, 2), loc(1, 2)),
            Some(Vec::new())
        );
    }

    #[test]
    fn test_route_missing_when_disconnected() {
        let network = corridor();
        assert!(PathFinder::new(&network).route(loc(1, 0), loc(4, 4)).is_none());
        assert!(PathFinder::new(&network)
            .shortest_route(loc(1, 0), loc(4, 4))
            .is_none());
    }

    #[test]
    fn test_only_revealed_blocks_hidden_caverns() {
        let mut network = corridor();
        network[loc(1, 0)].reveal();
        network[loc(1, 1)].reveal();

        let finder = PathFinder::new(&network).only_revealed(true);
        assert!(finder.route(loc(1, 0), loc(1, 4)).is_none());
        // The destination itself may still be hidden.
        assert_eq!(finder.route(loc(1, 0), loc(1, 2)), Some(vec![loc(1, 1), loc(1, 2)]));

        network[loc(1, 2)].reveal();
        network[loc(1, 3)].reveal();
        let finder = PathFinder::new(&network).only_revealed(true);
        assert!(finder.route(loc(1, 0), loc(1, 4)).is_some());
    }

    /// A four-exit tunnel at (3,3) with caves on all four sides.
    fn crossroads() -> CaveNetwork {
        let mut network = CaveNetwork::new();
        for direction in Direction::ALL {
            network.connect(loc(3, 3), direction);
        }
        network[loc(3, 3)].is_cave = false;
        network
    }

    #[test]
    fn test_four_exit_tunnel_follows_lane() {
        let network = crossroads();
        let finder = PathFinder::new(&network);

        // North side pairs with west side.
        assert_eq!(
            finder.route(loc(2, 3), loc(3, 2)),
            Some(vec![loc(3, 3), loc(3, 2)])
        );
        // East side pairs with south side.
        assert_eq!(
            finder.route(loc(3, 4), loc(4, 3)),
            Some(vec![loc(3, 3), loc(4, 3)])
        );
        // Crossing lanes is impossible.
        assert!(finder.route(loc(2, 3), loc(4, 3)).is_none());
        assert!(finder.route(loc(2, 3), loc(3, 4)).is_none());
    }

    #[test]
    fn test_lanes_do_not_block_each_other() {
        let mut network = crossroads();
        // Loop the west cave round to the east cave through row 2 and row 4 so
        // the search crosses the tunnel once per lane.
        network.connect(loc(3, 2), Direction::South);
        network.connect(loc(4, 2), Direction::East);

        let finder = PathFinder::new(&network);
        // (2,3) -> tunnel(NW lane) -> (3,2) -> (4,2) -> (4,3) -> tunnel(ES lane) -> (3,4)
        let route = finder.route(loc(2, 3), loc(3, 4)).unwrap();
        assert_eq!(route.last(), Some(&loc(3, 4)));
        assert_eq!(route.iter().filter(|step| **step == loc(3, 3)).count(), 2);
    }

    #[test]
    fn test_two_exit_tunnel_does_not_reverse() {
        let mut network = CaveNetwork::new();
        network.connect(loc(0, 0), Direction::East);
        network.connect(loc(0, 1), Direction::South);
        network[loc(0, 1)].is_cave = false;

        let finder = PathFinder::new(&network);
        assert_eq!(
            finder.route(loc(0, 0), loc(1, 1)),
            Some(vec![loc(0, 1), loc(1, 1)])
        );
    }

    #[test]
    fn test_shortest_route_prefers_fewer_steps() {
        let mut network = corridor();
        // A long detour through row 2 from column 0 to column 4.
        network.connect(loc(1, 0), Direction::South);
        for column in 0..4 {
            network.connect(loc(2, column), Direction::East);
        }
        network.connect(loc(2, 4), Direction::North);

        let shortest = PathFinder::new(&network)
            .shortest_route(loc(1, 0), loc(1, 4))
            .unwrap();
        assert_eq!(shortest, vec![loc(1, 1), loc(1, 2), loc(1, 3), loc(1, 4)]);

        let any = PathFinder::new(&network).route(loc(1, 0), loc(1, 4)).unwrap();
        assert_eq!(any.last(), Some(&loc(1, 4)));
    }
}
