//! # Display Management
//!
//! Text rendering of cave networks and game status.
//!
//! Each cavern is drawn three characters wide. Horizontal links appear as `-`
//! on either side of the cavern symbol and vertical links as `|` on the line
//! above it. Caverns the player has not seen are left blank unless the
//! display is told to reveal everything.

use crate::{resolved_neighbours, CaveNetwork, Cavern, Direction, GameEvent, GameState, Location};

/// Text display for the terminal driver.
///
/// Keeps a short history of messages alongside the map renderer.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Draw hidden caverns as if they were revealed
    pub reveal_hidden: bool,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    /// Creates a display that respects hidden caverns.
    ///
    /// # Examples
    ///
    /// ```
    /// use wumpus::{CaveNetwork, Location, TextDisplay};
    ///
    /// let display = TextDisplay::new();
    /// let map = display.render_map(&CaveNetwork::new(), Location::new(0, 0).unwrap());
    /// assert_eq!(map.lines().count(), 12);
    /// ```
    pub fn new() -> Self {
        Self {
            reveal_hidden: false,
            messages: Vec::new(),
            max_messages: 20,
        }
    }

    /// Renders the whole network as two text lines per grid row.
    pub fn render_map(&self, network: &CaveNetwork, player: Location) -> String {
        let mut rows: Vec<Vec<&Cavern>> = Vec::new();
        for cavern in network.caverns() {
            let row = cavern.location().row();
            if rows.len() <= row {
                rows.resize_with(row + 1, Vec::new);
            }
            rows[row].push(cavern);
        }

        let mut output = String::new();
        for row in rows {
            for cavern in &row {
                let visible = self.is_visible(cavern);
                output.push(' ');
                output.push(if visible && cavern.has_exit(Direction::North) {
                    '|'
                } else {
                    ' '
                });
                output.push(' ');
            }
            output.push('\n');

            for cavern in &row {
                let visible = self.is_visible(cavern);
                output.push(if visible && cavern.has_exit(Direction::West) {
                    '-'
                } else {
                    ' '
                });
                output.push(self.symbol(cavern, player));
                output.push(if visible && cavern.has_exit(Direction::East) {
                    '-'
                } else {
                    ' '
                });
            }
            output.push('\n');
        }

        output
    }

    fn is_visible(&self, cavern: &Cavern) -> bool {
        self.reveal_hidden || cavern.is_revealed()
    }

    fn symbol(&self, cavern: &Cavern, player: Location) -> char {
        if cavern.location() == player {
            '@'
        } else if !self.is_visible(cavern) {
            ' '
        } else if cavern.has_wumpus {
            'W'
        } else if cavern.is_pit {
            'O'
        } else if cavern.has_bat {
            'B'
        } else if !cavern.is_cave {
            '+'
        } else {
            '.'
        }
    }

    /// What the player notices in their current cavern.
    pub fn status_lines(&self, network: &CaveNetwork, player: Location) -> Vec<String> {
        let cavern = &network[player];
        let mut lines = Vec::new();

        if !cavern.is_cave {
            lines.push("You are crawling through a narrow tunnel.".to_string());
        }
        if cavern.has_blood {
            lines.push("You smell blood.".to_string());
        }
        if cavern.is_adjacent_pit {
            lines.push("You feel a cold draft.".to_string());
        }
        if resolved_neighbours(network, player)
            .into_iter()
            .any(|location| network[location].has_bat)
        {
            lines.push("You hear the flapping of wings.".to_string());
        }

        let exits: Vec<String> = cavern.exits().map(|direction| direction.to_string()).collect();
        if exits.is_empty() {
            lines.push("There is no way out.".to_string());
        } else {
            lines.push(format!("Exits: {}", exits.join(", ")));
        }

        lines
    }

    /// A one-line description of an event worth telling the player about.
    pub fn describe_event(&self, event: &GameEvent) -> Option<String> {
        match event {
            GameEvent::CreatureRelocated { player, .. } => Some(format!(
                "A giant bat snatches you up and drops you at {}!",
                player
            )),
            GameEvent::GameStateChanged {
                to: GameState::Firing,
                ..
            } => Some("You draw your bow. Which way?".to_string()),
            GameEvent::GameStateChanged {
                from: GameState::Firing,
                to: GameState::Running,
            } => Some("You lower your bow.".to_string()),
            GameEvent::NewGameStarted => Some("You enter the caves...".to_string()),
            _ => None,
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}
