//! # Game State Module
//!
//! The turn state machine that drives one game.
//!
//! [`Engine`] owns the cave network, the player's position and the random
//! source. Every operation that changes the game returns the
//! [`GameEvent`]s it produced, in order, for the caller to dispatch.

use crate::config::{CARRY_ROLL, MAX_CARRY_HOPS};
use crate::{
    lane_allows, CaveGenerator, CaveNetwork, Command, DifficultyOptions, Direction, FlavorText,
    GameEvent, Generator, Location, MessageTable, Outcome, PathFinder, RandomSource, WumpusError,
    WumpusResult,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine states.
///
/// `Running` and `Firing` accept player input; `Won`, `Missed`, `Eaten` and
/// `Pit` are final and, like `Idle`, ignore everything but a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Idle,
    Running,
    Firing,
    Won,
    Missed,
    Eaten,
    Pit,
}

impl GameState {
    /// True for states that accept moves or shots.
    pub fn is_interactive(self) -> bool {
        matches!(self, GameState::Running | GameState::Firing)
    }

    /// True once the game has ended.
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            GameState::Won | GameState::Missed | GameState::Eaten | GameState::Pit
        )
    }
}

/// How a game is about to end.
#[derive(Debug, Clone, Copy)]
enum Ending {
    Eaten,
    Pit,
    Won,
    Missed(Direction),
}

impl Ending {
    fn state(self) -> GameState {
        match self {
            Ending::Eaten => GameState::Eaten,
            Ending::Pit => GameState::Pit,
            Ending::Won => GameState::Won,
            Ending::Missed(_) => GameState::Missed,
        }
    }
}

/// Turn-based Hunt the Wumpus engine.
///
/// # Examples
///
/// ```
/// use wumpus::{DifficultyOptions, Engine, GameEvent, GameState, SeededRandom};
///
/// let mut engine = Engine::new(DifficultyOptions::easy(), Box::new(SeededRandom::new(1))).unwrap();
/// assert_eq!(engine.state(), GameState::Running);
/// assert_eq!(engine.take_events().first(), Some(&GameEvent::NewGameStarted));
///
/// engine.toggle_fire_mode();
/// assert_eq!(engine.state(), GameState::Firing);
/// ```
pub struct Engine {
    network: CaveNetwork,
    options: DifficultyOptions,
    state: GameState,
    player: Location,
    /// Direction of the most recent move attempt, successful or not
    last_direction: Direction,
    last_move_carried: bool,
    message: Option<String>,
    generator: CaveGenerator,
    rng: Box<dyn RandomSource>,
    messages: Box<dyn MessageTable>,
    pending_events: Vec<GameEvent>,
}

impl Engine {
    /// Creates an engine and starts a game with `options`.
    ///
    /// Events produced by the first game start are kept until
    /// [`Engine::take_events`] is called.
    pub fn new(options: DifficultyOptions, rng: Box<dyn RandomSource>) -> WumpusResult<Self> {
        let mut engine = Self::idle(CaveNetwork::new(), options.clone(), rng);
        let events = engine.start_new_game(options)?;
        engine.pending_events = events;
        Ok(engine)
    }

    /// Starts a game on a prepared network with the player at `player`.
    ///
    /// The player's cavern must be a real cave free of the Wumpus, pits and bats.
    pub fn from_network(
        network: CaveNetwork,
        options: DifficultyOptions,
        player: Location,
        rng: Box<dyn RandomSource>,
    ) -> WumpusResult<Self> {
        options.validate()?;

        let cavern = &network[player];
        if !cavern.is_cave || cavern.is_fatal() || cavern.has_bat {
            return Err(WumpusError::InvalidState(format!(
                "player cannot start at {}",
                player
            )));
        }

        let mut engine = Self::idle(network, options, rng);
        let mut events = vec![GameEvent::NewGameStarted];
        engine.place_player(player, &mut events);
        engine.pending_events = events;
        Ok(engine)
    }

    fn idle(network: CaveNetwork, options: DifficultyOptions, rng: Box<dyn RandomSource>) -> Self {
        Self {
            network,
            options,
            state: GameState::Idle,
            player: Location { row: 0, column: 0 },
            last_direction: Direction::West,
            last_move_carried: false,
            message: None,
            generator: CaveGenerator::new(),
            rng,
            messages: Box::new(FlavorText),
            pending_events: Vec::new(),
        }
    }

    /// Replaces the table used for end-of-game messages.
    pub fn with_message_table(mut self, messages: Box<dyn MessageTable>) -> Self {
        self.messages = messages;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn network(&self) -> &CaveNetwork {
        &self.network
    }

    pub fn options(&self) -> &DifficultyOptions {
        &self.options
    }

    pub fn player_location(&self) -> Location {
        self.player
    }

    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Overrides the remembered previous move.
    pub fn set_last_direction(&mut self, direction: Direction) {
        self.last_direction = direction;
    }

    /// The end-of-game message, once the game has ended.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Drains events buffered by construction.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Discards the current network and starts a new game with `options`.
    pub fn start_new_game(&mut self, options: DifficultyOptions) -> WumpusResult<Vec<GameEvent>> {
        options.validate()?;

        self.network = self.generator.generate(&options, &mut *self.rng)?;
        self.options = options;

        let start = loop {
            let location = CaveNetwork::random_location(&mut *self.rng);
            let cavern = &self.network[location];
            if cavern.is_cave && !cavern.is_fatal() && !cavern.has_bat {
                break location;
            }
        };

        let mut events = vec![GameEvent::NewGameStarted];
        self.place_player(start, &mut events);

        info!(
            "New {} game started, player at {}",
            self.options.difficulty, start
        );

        Ok(events)
    }

    /// Starts a new game with the current difficulty options.
    pub fn restart(&mut self) -> WumpusResult<Vec<GameEvent>> {
        self.start_new_game(self.options.clone())
    }

    fn place_player(&mut self, start: Location, events: &mut Vec<GameEvent>) {
        self.message = None;
        self.last_move_carried = false;
        self.last_direction = Direction::West;
        self.player = start;
        self.enter(start, Direction::West, events);
        self.change_state(GameState::Running, events);
    }

    /// Applies a player command for the current state.
    pub fn handle_command(&mut self, command: Command) -> Vec<GameEvent> {
        match (self.state, command) {
            (GameState::Running, Command::Move(direction)) => self.move_player(direction),
            (GameState::Running, Command::ToggleFire) => self.toggle_fire_mode(),
            (GameState::Firing, Command::Move(direction)) => self.fire_arrow(direction),
            (GameState::Firing, Command::ToggleFire | Command::CancelFire) => {
                self.cancel_fire_mode()
            }
            _ => Vec::new(),
        }
    }

    /// Switches between moving and aiming.
    pub fn toggle_fire_mode(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.state {
            GameState::Running => self.change_state(GameState::Firing, &mut events),
            GameState::Firing => self.change_state(GameState::Running, &mut events),
            _ => {}
        }
        events
    }

    /// Lowers the bow without firing.
    pub fn cancel_fire_mode(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state == GameState::Firing {
            self.change_state(GameState::Running, &mut events);
        }
        events
    }

    /// Tries to move the player one cavern in `direction`.
    ///
    /// Ignored unless the game is `Running`. Inside a four-exit tunnel the move
    /// is checked against the lane rule for the previous move; anywhere else a
    /// link must exist. A rejected move only turns the player to face
    /// `direction`.
    pub fn move_player(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Running {
            return events;
        }

        let cavern = &self.network[self.player];
        let allowed = if cavern.is_four_way_tunnel() {
            lane_allows(self.last_direction, direction)
        } else {
            cavern.has_exit(direction)
        };

        self.last_direction = direction;

        if allowed {
            self.relocate_player(self.player.step(direction), direction, &mut events);
        } else {
            debug!("Move {} from {} blocked", direction, self.player);
            self.network[self.player].player_direction = Some(direction);
            events.push(GameEvent::CavernChanged {
                location: self.player,
            });
        }

        events
    }

    /// Fires the single arrow into the cavern linked in `direction`.
    ///
    /// Ends the game either way. Has no effect once the game is over.
    pub fn fire_arrow(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.state.is_interactive() {
            return events;
        }

        let hit = self
            .network
            .linked(self.player, direction)
            .is_some_and(|cavern| cavern.has_wumpus);

        let ending = if hit {
            Ending::Won
        } else {
            Ending::Missed(direction)
        };
        self.end_game(ending, &mut events);

        events
    }

    /// Route from the player to `end`, optionally only through revealed caverns.
    pub fn route_to(&self, end: Location, only_revealed: bool) -> Option<Vec<Location>> {
        PathFinder::new(&self.network)
            .only_revealed(only_revealed)
            .route(self.player, end)
    }

    /// Moves the player into `destination` and resolves whatever lives there.
    ///
    /// A bat carries the player off when the cavern also holds the Wumpus or a
    /// pit, or when the carry roll succeeds. Carries repeat until the player
    /// lands somewhere without a bat or the roll fails. A chain longer than
    /// [`MAX_CARRY_HOPS`] is cut off and the cavern's hazards apply.
    fn relocate_player(
        &mut self,
        destination: Location,
        direction: Direction,
        events: &mut Vec<GameEvent>,
    ) {
        self.last_move_carried = false;
        self.leave(events);

        let mut destination = destination;
        let mut hops = 0;

        loop {
            self.player = destination;
            self.enter(destination, direction, events);

            let cavern = &self.network[destination];
            let (has_bat, has_wumpus, is_pit) = (cavern.has_bat, cavern.has_wumpus, cavern.is_pit);

            if has_bat && hops >= MAX_CARRY_HOPS {
                warn!(
                    "Bat carry chain stopped at {} after {} hops",
                    destination, hops
                );
            }

            let carried = has_bat
                && hops < MAX_CARRY_HOPS
                && (has_wumpus
                    || is_pit
                    || self.rng.next_int(CARRY_ROLL) < self.options.bat_carry_pct);

            if carried {
                hops += 1;
                destination = self.carry_player(destination, events);
                continue;
            }

            if has_wumpus {
                self.end_game(Ending::Eaten, events);
            } else if is_pit {
                self.end_game(Ending::Pit, events);
            }
            return;
        }
    }

    /// Moves the bat from `origin` to a new roost and picks the drop zone.
    fn carry_player(&mut self, origin: Location, events: &mut Vec<GameEvent>) -> Location {
        let mut drop = origin;
        while drop == origin {
            drop = CaveNetwork::random_location(&mut *self.rng);
        }

        // Roost first so the bat cannot land back on the origin.
        let creature = self.network.place_random_bat(&mut *self.rng);
        self.network[origin].has_bat = false;
        self.leave(events);

        let drop_is_fatal = self.network[drop].is_fatal();
        events.push(GameEvent::CavernChanged { location: creature });
        events.push(GameEvent::CreatureRelocated {
            origin,
            player: drop,
            creature,
            drop_is_fatal,
        });

        debug!(
            "Bat carried player from {} to {}, now roosting at {}",
            origin, drop, creature
        );

        self.last_move_carried = true;
        drop
    }

    fn leave(&mut self, events: &mut Vec<GameEvent>) {
        self.network[self.player].player_direction = None;
        events.push(GameEvent::CavernChanged {
            location: self.player,
        });
    }

    fn enter(&mut self, location: Location, direction: Direction, events: &mut Vec<GameEvent>) {
        let cavern = &mut self.network[location];
        cavern.player_direction = Some(direction);
        cavern.reveal();
        events.push(GameEvent::CavernChanged { location });
    }

    fn end_game(&mut self, ending: Ending, events: &mut Vec<GameEvent>) {
        let carried = self.last_move_carried;
        let outcome = match ending {
            Ending::Eaten => Outcome::Eaten { carried },
            Ending::Pit => Outcome::Pit { carried },
            Ending::Won => Outcome::Won,
            Ending::Missed(direction) => Outcome::Missed {
                cavern: &self.network[self.player],
                direction,
            },
        };
        let message = self.messages.describe(&outcome, &mut *self.rng);

        self.change_state(ending.state(), events);
        info!("Game over at {}: {:?}", self.player, self.state);

        self.message = Some(message);
        events.extend(
            self.network
                .reveal_all()
                .into_iter()
                .map(|location| GameEvent::CavernChanged { location }),
        );
    }

    fn change_state(&mut self, to: GameState, events: &mut Vec<GameEvent>) {
        if self.state != to {
            events.push(GameEvent::GameStateChanged {
                from: self.state,
                to,
            });
            self.state = to;
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("player", &self.player)
            .field("last_direction", &self.last_direction)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
