// Game states produced by the game machine and events posted back to it.

use super::Direction;

/// State emitted by the game machine. Read-only to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    // No session; the machine waits for focus.
    Idle,
    Intro,
    Instructions {
        expected: Direction,
    },
    // The only variant during which directions are observed.
    Playing {
        expected: Direction,
        round: u32,
    },
    NotMatching {
        expected: Direction,
        looked: Direction,
    },
    Matching {
        expected: Direction,
    },
}

impl GameState {
    /// Direction to await while in this state, if any.
    pub fn awaited_direction(&self) -> Option<Direction> {
        match self {
            GameState::Playing { expected, .. } => Some(*expected),
            GameState::Idle
            | GameState::Intro
            | GameState::Instructions { .. }
            | GameState::NotMatching { .. }
            | GameState::Matching { .. } => None,
        }
    }
}

/// Signals the coordinator posts to the game machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FocusGained,
    FocusLost,
    IntroFinished,
    InstructionsFinished,
    NotMatchingFinished,
    MatchingFinished,
    Match,
    NotMatch(Direction),
}
