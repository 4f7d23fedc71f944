//! # Game Events
//!
//! Every engine operation that changes something returns the list of events
//! it produced, in the order they happened. Callers decide how to deliver
//! them; [`GameEvent::dispatch`] forwards one to a [`GameObserver`].

use crate::{GameState, Location};
use serde::{Deserialize, Serialize};

/// Something observable that changed during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cavern's visible state (facing, reveal, bat) changed
    CavernChanged { location: Location },
    /// The engine moved between states
    GameStateChanged { from: GameState, to: GameState },
    /// A bat carried the player off and roosted somewhere new
    CreatureRelocated {
        /// Where the player was picked up
        origin: Location,
        /// Where the player was dropped
        player: Location,
        /// Where the bat settled
        creature: Location,
        /// The drop zone holds the Wumpus or a pit
        drop_is_fatal: bool,
    },
    /// A fresh cave network replaced the previous one
    NewGameStarted,
}

/// Receiver for game events.
///
/// All methods default to doing nothing, so observers only implement what
/// they care about.
pub trait GameObserver {
    fn notify_cavern_changed(&mut self, location: Location) {
        let _ = location;
    }

    fn notify_game_state_changed(&mut self, from: GameState, to: GameState) {
        let _ = (from, to);
    }

    fn notify_creature_relocated(
        &mut self,
        origin: Location,
        player: Location,
        creature: Location,
        drop_is_fatal: bool,
    ) {
        let _ = (origin, player, creature, drop_is_fatal);
    }

    fn notify_new_game_started(&mut self) {}
}

impl GameEvent {
    /// Forwards this event to the matching observer callback.
    pub fn dispatch(&self, observer: &mut dyn GameObserver) {
        match *self {
            GameEvent::CavernChanged { location } => observer.notify_cavern_changed(location),
            GameEvent::GameStateChanged { from, to } => {
                observer.notify_game_state_changed(from, to)
            }
            GameEvent::CreatureRelocated {
                origin,
                player,
                creature,
                drop_is_fatal,
            } => observer.notify_creature_relocated(origin, player, creature, drop_is_fatal),
            GameEvent::NewGameStarted => observer.notify_new_game_started(),
        }
    }

    /// Dispatches a batch of events in order.
    pub fn dispatch_all<'a>(
        events: impl IntoIterator<Item = &'a GameEvent>,
        observer: &mut dyn GameObserver,
    ) {
        for event in events {
            event.dispatch(observer);
        }
    }
}
