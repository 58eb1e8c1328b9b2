// In-memory game machine used by the demo runtime and integration tests.
// Holds a minimal transition table; win/lose rules live elsewhere.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::domain::ports::{GameMachine, StateStream};
use crate::domain::{GameEvent, GameState};
use crate::interface_adapters::utils::rng::DirectionPicker;

struct Table {
    current: GameState,
    round: u32,
    picker: DirectionPicker,
    events: Vec<GameEvent>,
}

impl Table {
    fn next_state(&mut self, event: GameEvent) -> Option<GameState> {
        use GameEvent as E;
        use GameState as S;

        let next = match (self.current, event) {
            (S::Idle, E::FocusLost) => return None,
            (_, E::FocusLost) => S::Idle,
            (S::Idle, E::FocusGained) => {
                self.round = 0;
                S::Intro
            }
            (S::Intro, E::IntroFinished) | (S::Matching { .. }, E::MatchingFinished) => {
                self.round += 1;
                S::Instructions {
                    expected: self.picker.pick(),
                }
            }
            (S::Instructions { expected }, E::InstructionsFinished)
            | (S::NotMatching { expected, .. }, E::NotMatchingFinished) => S::Playing {
                expected,
                round: self.round,
            },
            (S::Playing { expected, .. }, E::Match) => S::Matching { expected },
            (S::Playing { expected, .. }, E::NotMatch(looked)) => {
                S::NotMatching { expected, looked }
            }
            _ => return None,
        };
        Some(next)
    }
}

#[derive(Clone)]
pub struct InMemoryGameMachine {
    states: broadcast::Sender<GameState>,
    table: Arc<Mutex<Table>>,
}

impl InMemoryGameMachine {
    pub fn new(capacity: usize) -> Self {
        Self::with_picker(capacity, DirectionPicker::random())
    }

    pub fn with_picker(capacity: usize, picker: DirectionPicker) -> Self {
        let (states, _) = broadcast::channel(capacity);
        Self {
            states,
            table: Arc::new(Mutex::new(Table {
                current: GameState::Idle,
                round: 0,
                picker,
                events: Vec::new(),
            })),
        }
    }

    pub fn current(&self) -> GameState {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
    }

    // Every event posted so far, applied or not.
    pub fn events(&self) -> Vec<GameEvent> {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .clone()
    }
}

impl GameMachine for InMemoryGameMachine {
    fn game_state(&self) -> StateStream {
        self.states.subscribe()
    }

    fn post_event(&self, event: GameEvent) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.events.push(event);

        let Some(next) = table.next_state(event) else {
            debug!(?event, current = ?table.current, "event ignored in current state");
            return;
        };
        info!(?event, from = ?table.current, to = ?next, "game state changed");
        table.current = next;
        // Sent under the lock so subscribers see states in transition order.
        let _ = self.states.send(next);
    }
}
