//! # Outcome Messages
//!
//! Text shown when a game ends. The engine only needs a [`MessageTable`];
//! [`FlavorText`] is the stock table.

use crate::{Cavern, Direction, RandomSource};

/// How a game ended, with the context a message may depend on.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// The player met the Wumpus
    Eaten { carried: bool },
    /// The player fell into a pit
    Pit { carried: bool },
    /// The arrow hit the Wumpus
    Won,
    /// The arrow missed; `cavern` is the one it was fired from
    Missed {
        cavern: &'a Cavern,
        direction: Direction,
    },
}

/// Maps an outcome to display text.
pub trait MessageTable {
    fn describe(&self, outcome: &Outcome<'_>, rng: &mut dyn RandomSource) -> String;
}

const MEALS: [&str; 7] = [
    "a midnight snack",
    "breakfast",
    "brunch",
    "lunch",
    "afternoon tea",
    "dinner",
    "supper",
];

const EATEN: [&str; 4] = [
    "The fearsome Wumpus is waiting for you, and you are eaten before your bow leaves your shoulder. It makes",
    "Staring at the blood on the walls, you never hear the fearsome Wumpus creep up behind you. You make",
    "You wander straight into the lair of the fearsome Wumpus. You make",
    "You trip over the fearsome Wumpus. It is not amused, and you make",
];

const PIT: [&str; 3] = [
    "The floor gives way and you tumble into a bottomless pit. The fearsome Wumpus is no longer your problem.",
    "You step into a bottomless pit. There is never a bat around when you need one.",
    "You fall into a bottomless pit. Some hours into the fall, being eaten starts to look like the better deal.",
];

const VICTORY: [&str; 4] = [
    "Your arrow finds the fearsome Wumpus. It does not look so fearsome any more.",
    "The fearsome Wumpus falls. Let's hope you remembered your hunting licence.",
    "The fearsome Wumpus lies still. Now, which way was the exit?",
    "One arrow, one Wumpus. The bards will sing of this for years.",
];

const WOUNDS: [&str; 6] = [
    "black heart",
    "lumpy head",
    "thick neck",
    "barrel chest",
    "bloated belly",
    "knee",
];

/// The stock message table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlavorText;

impl FlavorText {
    fn pick<'t>(options: &[&'t str], rng: &mut dyn RandomSource) -> &'t str {
        options[rng.next_int(options.len() as u32) as usize % options.len()]
    }

    fn meal(rng: &mut dyn RandomSource) -> &'static str {
        Self::pick(&MEALS, rng)
    }

    fn noise(rng: &mut dyn RandomSource) -> String {
        format!(
            "the clatter brings the fearsome Wumpus running, and you make {}.",
            Self::meal(rng)
        )
    }

    fn victory(rng: &mut dyn RandomSource) -> String {
        let roll = rng.next_int(VICTORY.len() as u32 + 1) as usize;
        if let Some(text) = VICTORY.get(roll) {
            return (*text).to_string();
        }

        let wound = Self::pick(&WOUNDS, rng);
        let mut text = format!(
            "Your arrow sings across the cavern and buries itself in the fearsome Wumpus's {}. \
             It roars, staggers and slumps to the ground, and after a last shuddering breath the \
             cave falls silent.",
            wound
        );
        if wound == "knee" {
            text.push_str(" The knee? Who knew that was its weak spot?");
        }
        text
    }
}

impl MessageTable for FlavorText {
    fn describe(&self, outcome: &Outcome<'_>, rng: &mut dyn RandomSource) -> String {
        match outcome {
            Outcome::Eaten { carried: true } => format!(
                "A bat snatches you up and drops you right in front of the fearsome Wumpus. You make {}.",
                Self::meal(rng)
            ),
            Outcome::Eaten { carried: false } => {
                let opening = Self::pick(&EATEN, rng);
                format!("{} {}.", opening, Self::meal(rng))
            }
            Outcome::Pit { carried: true } => {
                "A bat snatches you up and lets go directly over a bottomless pit.".to_string()
            }
            Outcome::Pit { carried: false } => Self::pick(&PIT, rng).to_string(),
            Outcome::Won => Self::victory(rng),
            Outcome::Missed { cavern, direction } => {
                if !cavern.has_exit(*direction) {
                    format!(
                        "You aim carefully and shoot your arrow into solid rock. Then {} What were you thinking?",
                        Self::noise(rng)
                    )
                } else if !cavern.has_blood {
                    format!(
                        "No Wumpus there, and no sign of one anywhere nearby. Still, {}",
                        Self::noise(rng)
                    )
                } else if rng.next_int(2) == 0 {
                    format!(
                        "So close. There won't be a next time though, because {}",
                        Self::noise(rng)
                    )
                } else {
                    format!("Wrong cavern. Worse, {}", Self::noise(rng))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CaveNetwork, Location, ScriptedRandom};

    #[test]
    fn test_eaten_mentions_meal() {
        let mut rng = ScriptedRandom::new([0, 1]);
        let text = FlavorText.describe(&Outcome::Eaten { carried: false }, &mut rng);
        assert!(text.starts_with("The fearsome Wumpus is waiting"));
        assert!(text.ends_with("breakfast."));
    }

    #[test]
    fn test_carried_messages_mention_bat() {
        let mut rng = ScriptedRandom::default();
        for outcome in [Outcome::Eaten { carried: true }, Outcome::Pit { carried: true }] {
            assert!(FlavorText.describe(&outcome, &mut rng).contains("bat"));
        }
    }

    #[test]
    fn test_missed_into_wall() {
        let network = CaveNetwork::new();
        let cavern = &network[Location::new(1, 1).unwrap()];
        let outcome = Outcome::Missed {
            cavern,
            direction: Direction::North,
        };

        let text = FlavorText.describe(&outcome, &mut ScriptedRandom::default());
        assert!(text.contains("solid rock"));
    }

    #[test]
    fn test_missed_near_blood() {
        let mut network = CaveNetwork::new();
        let location = Location::new(1, 1).unwrap();
        network.connect(location, Direction::East);
        network[location].has_blood = true;

        let outcome = Outcome::Missed {
            cavern: &network[location],
            direction: Direction::East,
        };
        let text = FlavorText.describe(&outcome, &mut ScriptedRandom::new([1]));
        assert!(text.starts_with("Wrong cavern"));
    }

    #[test]
    fn test_victory_knee() {
        // Roll past the fixed lines, then pick the last wound.
        let mut rng = ScriptedRandom::new([4, 5]);
        let text = FlavorText.describe(&Outcome::Won, &mut rng);
        assert!(text.contains("knee"));
        assert!(text.ends_with("weak spot?"));
    }
}
