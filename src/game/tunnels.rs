//! # Tunnel Resolution
//!
//! Tunnels are caverns with `is_cave == false`. They never count as rooms:
//! anything looking "next door" walks through them until it reaches a real
//! cave. A two-exit tunnel passes straight through to its other link. A
//! four-exit tunnel hosts two independent lanes, North/West and East/South,
//! and the entrance side decides which one is taken.

use crate::{CaveNetwork, Direction, Location};
use log::warn;
use serde::{Deserialize, Serialize};

/// One of the two through-paths of a four-exit tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    NorthWest,
    EastSouth,
}

impl Lane {
    /// The lane a tunnel side belongs to.
    pub fn of(side: Direction) -> Lane {
        match side {
            Direction::North | Direction::West => Lane::NorthWest,
            Direction::East | Direction::South => Lane::EastSouth,
        }
    }
}

/// Exit side of a four-exit tunnel entered through `entrance`.
///
/// # Examples
///
/// ```
/// use wumpus::{lane_exit, Direction};
///
/// assert_eq!(lane_exit(Direction::North), Direction::West);
/// assert_eq!(lane_exit(Direction::South), Direction::East);
/// ```
pub fn lane_exit(entrance: Direction) -> Direction {
    match entrance {
        Direction::North => Direction::West,
        Direction::East => Direction::South,
        Direction::South => Direction::East,
        Direction::West => Direction::North,
    }
}

/// The other side sharing a lane with `side`.
pub fn lane_partner(side: Direction) -> Direction {
    lane_exit(side)
}

/// Whether a player whose previous move was `last` may leave a four-exit
/// tunnel toward `direction`.
///
/// A move is blocked when it repeats `last` or heads to the lane partner of
/// the requested side, so exactly two of the four moves are open.
pub fn lane_allows(last: Direction, direction: Direction) -> bool {
    last != direction && last != lane_partner(direction)
}

/// Resolves the next real cave from `location` in `direction`.
///
/// A four-exit tunnel is crossed along its lane. Any other tunnel is left by
/// its first exit in North, East, South, West order that is not the one just
/// entered through; generated tunnels have two exits, so only hand-built
/// three-exit tunnels depend on that order.
///
/// Returns `None` when there is no exit that way or the tunnel chain dead-ends.
pub fn adjacent_cavern(
    network: &CaveNetwork,
    location: Location,
    direction: Direction,
) -> Option<Location> {
    let mut current = location;
    let mut heading = direction;

    // Every hop consumes one (tunnel, lane) pair.
    for _ in 0..=2 * network.len() {
        let next = network.get(network[current].link(heading)?)?;

        if next.is_cave {
            return Some(next.location());
        }

        let entrance = heading.opposite();
        heading = if next.exit_count() == 4 {
            lane_exit(entrance)
        } else {
            next.exits().find(|side| *side != entrance)?
        };
        current = next.location();
    }

    warn!(
        "Tunnel chain from {} heading {} never reached a cave",
        location, direction
    );
    None
}

/// Real caves reachable in one tunnel-resolved step from `location`.
pub fn resolved_neighbours(network: &CaveNetwork, location: Location) -> Vec<Location> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| adjacent_cavern(network, location, direction))
        .collect()
}
