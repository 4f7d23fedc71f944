//! # Cave Network Generation
//!
//! Builds a complete, fully reachable cave network for one game.
//!
//! A map is carved in one pass and then checked with a lane-aware walk. If any
//! cavern is unreachable the whole map is thrown away and carved again; there
//! is no partial repair and no retry limit.

use crate::config::BLOOD_SCENT_DEPTH;
use crate::{
    adjacent_cavern, lane_exit, resolved_neighbours, CaveNetwork, Cavern, DifficultyOptions,
    Direction, GameDifficulty, Generator, Location, RandomSource, WumpusError, WumpusResult,
};
use log::{debug, info};

/// Map generator for Hunt the Wumpus cave networks.
///
/// Generation runs in this order:
/// 1. Carve random exits for every cavern, linked symmetrically
/// 2. Demote some two- and four-exit caverns to tunnels
/// 3. Dig pits and flag the caves next to them
/// 4. Check connectivity and start over if it fails
/// 5. Roost bats, place the Wumpus and spread its blood scent
#[derive(Debug, Clone)]
pub struct CaveGenerator {
    /// Tunnel-resolved hops the Wumpus's blood scent spreads
    pub blood_scent_depth: u32,
}

impl CaveGenerator {
    /// Creates a generator with the standard scent range.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::{CaveGenerator, DifficultyOptions, Generator, SeededRandom};
    ///
    /// let generator = CaveGenerator::new();
    /// let mut rng = SeededRandom::new(7);
    /// let network = generator.generate(&DifficultyOptions::easy(), &mut rng).unwrap();
    /// assert!(network.wumpus_location().is_some());
    /// ```
    pub fn new() -> Self {
        Self {
            blood_scent_depth: BLOOD_SCENT_DEPTH,
        }
    }

    /// Carves exits, tunnels and pits. The result may not be fully connected.
    fn carve(&self, options: &DifficultyOptions, rng: &mut dyn RandomSource) -> CaveNetwork {
        let mut network = CaveNetwork::new();

        self.carve_exits(&mut network, options, rng);
        self.place_tunnels(&mut network, options, rng);
        self.place_pits(&mut network, options, rng);

        network
    }

    fn carve_exits(
        &self,
        network: &mut CaveNetwork,
        options: &DifficultyOptions,
        rng: &mut dyn RandomSource,
    ) {
        for location in Location::all() {
            // Caverns already reached from above or from the left may take an extra exit.
            let mut cap = 2;
            if network
                .adjacent_cell(location, Direction::North)
                .has_exit(Direction::South)
            {
                cap += 1;
            }
            if network
                .adjacent_cell(location, Direction::West)
                .has_exit(Direction::East)
            {
                cap += 1;
            }

            let target = rng.next_int(cap) as usize + 1;

            while network[location].exit_count() < target {
                let mut direction = Direction::ALL[rng.next_int(4) as usize % 4];

                if options.difficulty < GameDifficulty::Hard {
                    for _ in 0..Direction::ALL.len() {
                        if !network[location].has_exit(direction) {
                            break;
                        }
                        direction = direction.clockwise();
                    }
                }

                network.connect(location, direction);
            }
        }
    }

    fn place_tunnels(
        &self,
        network: &mut CaveNetwork,
        options: &DifficultyOptions,
        rng: &mut dyn RandomSource,
    ) {
        let mut candidates = network.locations_where(|cavern| matches!(cavern.exit_count(), 2 | 4));

        for _ in 0..options.max_tunnels {
            if candidates.is_empty() {
                break;
            }

            let pick = rng.next_int(candidates.len() as u32) as usize;
            let location = candidates.remove(pick);
            network[location].is_cave = false;
        }
    }

    fn place_pits(
        &self,
        network: &mut CaveNetwork,
        options: &DifficultyOptions,
        rng: &mut dyn RandomSource,
    ) {
        let mut pits = Vec::new();

        while pits.len() < options.num_pits as usize {
            let location = CaveNetwork::random_location(rng);
            let cavern = &mut network[location];

            if cavern.is_cave && !cavern.is_pit {
                cavern.is_pit = true;
                pits.push(location);
            }
        }

        for pit in pits {
            for neighbour in resolved_neighbours(network, pit) {
                let cavern = &mut network[neighbour];
                if !cavern.is_pit {
                    cavern.is_adjacent_pit = true;
                }
            }
        }
    }

    fn place_wumpus(&self, network: &mut CaveNetwork, rng: &mut dyn RandomSource) -> Location {
        loop {
            let location = CaveNetwork::random_location(rng);
            let cavern = &mut network[location];

            if cavern.is_cave {
                cavern.has_wumpus = true;
                return location;
            }
        }
    }

    fn spread_blood(&self, network: &mut CaveNetwork, wumpus: Location) {
        mark_blood(network, wumpus, self.blood_scent_depth);
        network[wumpus].has_blood = false;
    }
}

impl Default for CaveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<CaveNetwork> for CaveGenerator {
    fn generate(
        &self,
        options: &DifficultyOptions,
        rng: &mut dyn RandomSource,
    ) -> WumpusResult<CaveNetwork> {
        options.validate()?;

        let mut attempts: u64 = 1;
        let mut network = loop {
            let network = self.carve(options, rng);
            if validate_connectivity(&network) {
                break network;
            }

            debug!(
                "Cave network attempt {} left unreachable caverns, carving again",
                attempts
            );
            attempts += 1;
        };

        for _ in 0..options.bat_count {
            network.place_random_bat(rng);
        }

        let wumpus = self.place_wumpus(&mut network, rng);
        self.spread_blood(&mut network, wumpus);

        info!(
            "Generated {} cave network after {} attempt(s): {} tunnels, Wumpus at {}",
            options.difficulty,
            attempts,
            network.tunnel_locations().len(),
            wumpus
        );

        Ok(network)
    }

    fn validate(&self, network: &CaveNetwork, options: &DifficultyOptions) -> WumpusResult<()> {
        let wumpus_count = network.caverns().filter(|cavern| cavern.has_wumpus).count();
        if wumpus_count != 1 {
            return Err(WumpusError::GenerationFailed(format!(
                "expected exactly one Wumpus, found {}",
                wumpus_count
            )));
        }

        let pit_count = network.pit_locations().len();
        if pit_count != options.num_pits as usize {
            return Err(WumpusError::GenerationFailed(format!(
                "expected {} pits, found {}",
                options.num_pits, pit_count
            )));
        }

        let bat_count = network.bat_locations().len();
        if bat_count != options.bat_count as usize {
            return Err(WumpusError::GenerationFailed(format!(
                "expected {} bats, found {}",
                options.bat_count, bat_count
            )));
        }

        if let Some(tunnel) = network
            .caverns()
            .find(|cavern| !cavern.is_cave && !matches!(cavern.exit_count(), 2..=4))
        {
            return Err(WumpusError::GenerationFailed(format!(
                "tunnel at {} has {} exits",
                tunnel.location(),
                tunnel.exit_count()
            )));
        }

        if !validate_connectivity(network) {
            return Err(WumpusError::GenerationFailed(
                "not every cavern is reachable".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "CaveGenerator"
    }
}

/// Marks blood on `location` and on every cave within `depth` tunnel-resolved hops.
fn mark_blood(network: &mut CaveNetwork, location: Location, depth: u32) {
    network[location].has_blood = true;

    if depth == 0 {
        return;
    }

    for direction in Direction::ALL {
        if let Some(next) = adjacent_cavern(network, location, direction) {
            mark_blood(network, next, depth - 1);
        }
    }
}

/// Checks that a walk from the first real cave reaches every cavern.
///
/// Ordinary caverns continue into all of their links. A four-exit tunnel only
/// continues along the lane it was entered on. Each cavern is visited once, so
/// a four-exit tunnel contributes only the first lane the walk reaches it by.
pub fn validate_connectivity(network: &CaveNetwork) -> bool {
    let Some(start) = network
        .caverns()
        .find(|cavern| cavern.is_cave)
        .map(Cavern::location)
    else {
        return false;
    };

    let mut visited = vec![false; network.len()];
    let mut visited_count = 0;
    let mut stack: Vec<(Location, Option<Direction>)> = vec![(start, None)];

    while let Some((location, entrance)) = stack.pop() {
        let index = location.index();
        if visited[index] {
            continue;
        }
        visited[index] = true;
        visited_count += 1;

        let cavern = &network[location];

        if cavern.is_four_way_tunnel() {
            let exit = lane_exit(entrance.unwrap_or(Direction::West));
            stack.push((location.step(exit), Some(exit.opposite())));
            continue;
        }

        // Reversed so links are explored in N, E, S, W order.
        for direction in Direction::ALL.into_iter().rev() {
            if let Some(next) = network.linked(location, direction) {
                stack.push((next.location(), Some(direction.opposite())));
            }
        }
    }

    visited_count == network.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CAVERN_COUNT;
    use crate::{SeededRandom, ScriptedRandom};

    fn loc(row: usize, column: usize) -> Location {
        Location::new(row, column).unwrap()
    }

    /// Every cavern linked east, and the first column linked south: a comb
    /// that reaches everything.
    fn comb() -> CaveNetwork {
        let mut network = CaveNetwork::new();
        for location in Location::all() {
            network.connect(location, Direction::East);
            if location.column() == 0 {
                network.connect(location, Direction::South);
            }
        }
        network
    }

    #[test]
    fn test_generation_without_tunnels() {
        let options = DifficultyOptions::new(GameDifficulty::Normal, 0, 0, 0, 0).unwrap();
        let mut rng = SeededRandom::new(1);
        let network = CaveGenerator::new().generate(&options, &mut rng).unwrap();

        assert_eq!(network.len(), CAVERN_COUNT);
        assert!(network.caverns().all(|cavern| cavern.is_cave));
        assert!(network.bat_locations().is_empty());
        assert!(network.pit_locations().is_empty());
        assert!(network.wumpus_location().is_some());
    }

    #[test]
    fn test_generated_network_passes_validation() {
        let generator = CaveGenerator::new();

        for seed in 0..20 {
            for options in [
                DifficultyOptions::easy(),
                DifficultyOptions::normal(),
                DifficultyOptions::hard(),
            ] {
                let mut rng = SeededRandom::new(seed);
                let network = generator.generate(&options, &mut rng).unwrap();
                assert!(
                    generator.validate(&network, &options).is_ok(),
                    "seed {seed} {:?}",
                    options.difficulty
                );
            }
        }
    }

    #[test]
    fn test_generation_rejects_invalid_options() {
        let options = DifficultyOptions {
            num_pits: 9,
            ..DifficultyOptions::normal()
        };
        let mut rng = SeededRandom::new(3);

        assert!(matches!(
            CaveGenerator::new().generate(&options, &mut rng),
            Err(WumpusError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_wumpus_cell_has_no_blood() {
        let generator = CaveGenerator::new();
        for seed in 0..10 {
            let mut rng = SeededRandom::new(seed);
            let network = generator
                .generate(&DifficultyOptions::hard(), &mut rng)
                .unwrap();
            let wumpus = network.wumpus_location().unwrap();

            assert!(!network[wumpus].has_blood);
            for neighbour in resolved_neighbours(&network, wumpus) {
                if neighbour != wumpus {
                    assert!(network[neighbour].has_blood, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_pit_warnings_surround_pits() {
        let generator = CaveGenerator::new();
        for seed in 0..10 {
            let mut rng = SeededRandom::new(seed);
            let network = generator
                .generate(&DifficultyOptions::hard(), &mut rng)
                .unwrap();

            for pit in network.pit_locations() {
                assert!(network[pit].is_cave);
                for neighbour in resolved_neighbours(&network, pit) {
                    let cavern = &network[neighbour];
                    assert!(cavern.is_pit || cavern.is_adjacent_pit);
                }
            }
        }
    }

    #[test]
    fn test_blood_spreads_two_hops() {
        let mut network = comb();
        mark_blood(&mut network, loc(2, 2), 2);

        assert!(network[loc(2, 2)].has_blood);
        assert!(network[loc(2, 3)].has_blood);
        assert!(network[loc(2, 4)].has_blood);
        assert!(!network[loc(2, 5)].has_blood);
        // Only column 0 has north/south links.
        assert!(!network[loc(1, 2)].has_blood);
    }

    #[test]
    fn test_connectivity_accepts_comb() {
        assert!(validate_connectivity(&comb()));
    }

    #[test]
    fn test_connectivity_rejects_island() {
        let mut network = comb();
        // Cut row 3 off from the spine: its only way in is the column 0 link.
        network.disconnect(loc(3, 0), Direction::North);
        network.disconnect(loc(3, 0), Direction::South);

        assert!(!validate_connectivity(&network));
    }

    #[test]
    fn test_connectivity_follows_four_exit_lane() {
        // A closed four-exit tunnel whose lanes lead to two separate caves:
        // only the lane the walk enters by is explored.
        let mut network = CaveNetwork::new();
        let tunnel = loc(2, 2);
        for direction in Direction::ALL {
            network.connect(tunnel, direction);
        }
        network[tunnel].is_cave = false;

        // Row rings plus a column 0 spine reach every other cavern. The south
        // cave (3,2) is only reachable through the tunnel's east/south lane.
        for location in Location::all() {
            if location == tunnel || location == loc(3, 2) {
                continue;
            }
            let east = location.step(Direction::East);
            if east != tunnel && east != loc(3, 2) {
                network.connect(location, Direction::East);
            }
            if location.column() == 0 {
                network.connect(location, Direction::South);
            }
        }

        // The walk first enters the tunnel from the north side, along row 1,
        // so it leaves west and the south cave is never reached.
        assert!(!validate_connectivity(&network));
    }

    #[test]
    fn test_connectivity_requires_a_cave() {
        let mut network = comb();
        for cavern in network.caverns_mut() {
            cavern.is_cave = false;
        }
        assert!(!validate_connectivity(&network));
    }

    #[test]
    fn test_tunnels_only_from_two_or_four_exits() {
        let generator = CaveGenerator::new();
        for seed in 0..10 {
            let mut rng = SeededRandom::new(seed);
            let network = generator.carve(&DifficultyOptions::hard(), &mut rng);

            for location in network.tunnel_locations() {
                assert!(matches!(network[location].exit_count(), 2 | 4));
            }
        }
    }

    #[test]
    fn test_easy_carving_rotates_past_taken_exits() {
        // Target two exits for (0,0), then draw North twice. Below Hard the
        // second draw rotates clockwise to East.
        let mut rng = ScriptedRandom::new([1, 0, 0]);
        let options = DifficultyOptions::new(GameDifficulty::Easy, 0, 0, 0, 0).unwrap();
        let mut network = CaveNetwork::new();
        CaveGenerator::new().carve_exits(&mut network, &options, &mut rng);

        let corner = &network[loc(0, 0)];
        assert!(corner.has_exit(Direction::North));
        assert!(corner.has_exit(Direction::East));
        assert!(network.caverns().all(|cavern| cavern.exit_count() >= 1));
    }
}
