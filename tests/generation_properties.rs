//! Property tests over generated cave networks.

use proptest::prelude::*;
use wumpus::{
    lane_allows, lane_exit, resolved_neighbours, validate_connectivity, CaveGenerator,
    CaveNetwork, DifficultyOptions, Direction, GameDifficulty, Generator, Location, PathFinder,
    SeededRandom,
};

fn preset(selector: u8) -> DifficultyOptions {
    match selector {
        0 => DifficultyOptions::easy(),
        1 => DifficultyOptions::normal(),
        _ => DifficultyOptions::hard(),
    }
}

fn generate(options: &DifficultyOptions, seed: u64) -> CaveNetwork {
    let mut rng = SeededRandom::new(seed);
    CaveGenerator::new()
        .generate(options, &mut rng)
        .expect("presets are valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_networks_pass_validation(seed in any::<u64>(), selector in 0_u8..=2) {
        let options = preset(selector);
        let network = generate(&options, seed);

        prop_assert!(CaveGenerator::new().validate(&network, &options).is_ok());
        prop_assert!(validate_connectivity(&network));
        prop_assert_eq!(network.pit_locations().len(), options.num_pits as usize);
        prop_assert_eq!(network.bat_locations().len(), options.bat_count as usize);
    }

    #[test]
    fn generated_links_are_symmetric(seed in any::<u64>(), selector in 0_u8..=2) {
        let network = generate(&preset(selector), seed);

        for cavern in network.caverns() {
            for direction in cavern.exits() {
                let neighbour = cavern.location().step(direction);
                prop_assert_eq!(cavern.link(direction), Some(neighbour.index()));
                prop_assert_eq!(
                    network[neighbour].link(direction.opposite()),
                    Some(cavern.location().index())
                );
            }
        }
    }

    #[test]
    fn hazards_sit_on_real_caves(seed in any::<u64>(), selector in 0_u8..=2) {
        let network = generate(&preset(selector), seed);

        for tunnel in network.tunnel_locations() {
            let cavern = &network[tunnel];
            prop_assert!(matches!(cavern.exit_count(), 2 | 4));
            prop_assert!(!cavern.is_pit && !cavern.has_bat && !cavern.has_wumpus);
        }

        let wumpus = network.wumpus_location().expect("one Wumpus");
        prop_assert!(!network[wumpus].has_blood);
    }

    #[test]
    fn pits_warn_their_neighbours(seed in any::<u64>(), selector in 0_u8..=2) {
        let network = generate(&preset(selector), seed);

        for pit in network.pit_locations() {
            for neighbour in resolved_neighbours(&network, pit) {
                let cavern = &network[neighbour];
                prop_assert!(cavern.is_pit || cavern.is_adjacent_pit);
            }
        }
    }

    #[test]
    fn shortest_route_is_never_longer(seed in any::<u64>(), row in 0_usize..6, column in 0_usize..8) {
        let network = generate(&DifficultyOptions::normal(), seed);
        let finder = PathFinder::new(&network);
        let start = network.locations_where(|cavern| cavern.is_cave)[0];
        let end = Location::new(row, column).unwrap();

        if let (Some(route), Some(shortest)) =
            (finder.route(start, end), finder.shortest_route(start, end))
        {
            prop_assert!(shortest.len() <= route.len());
            prop_assert_eq!(shortest.last().copied().unwrap_or(start), end);
        }
    }

    #[test]
    fn stepping_there_and_back_returns_home(row in 0_usize..6, column in 0_usize..8, side in 0_usize..4) {
        let location = Location::new(row, column).unwrap();
        let direction = Direction::ALL[side];

        prop_assert_eq!(location.step(direction).step(direction.opposite()), location);
        prop_assert!(CaveNetwork::is_adjacent(location, location.step(direction)));
    }
}

#[test]
fn test_lanes_pair_sides() {
    for side in Direction::ALL {
        let exit = lane_exit(side);
        assert_ne!(exit, side);
        assert_ne!(exit, side.opposite());
        assert_eq!(lane_exit(exit), side);

        // Never straight back out the way the last move went, nor into its lane partner.
        assert!(!lane_allows(side, side));
        assert!(!lane_allows(side, exit));
    }
}

#[test]
fn test_network_without_tunnels_or_hazards() {
    let options = DifficultyOptions::new(GameDifficulty::Easy, 0, 0, 0, 0).unwrap();

    for seed in 0..10 {
        let network = generate(&options, seed);

        assert_eq!(network.len(), 48);
        assert!(network.caverns().all(|cavern| cavern.is_cave));
        assert!(network.pit_locations().is_empty());
        assert!(network.bat_locations().is_empty());
        assert!(network
            .caverns()
            .all(|cavern| !cavern.is_adjacent_pit && cavern.exit_count() > 0));
        assert!(validate_connectivity(&network));
    }
}
