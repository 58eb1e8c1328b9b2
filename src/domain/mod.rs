// Domain layer: game vocabulary, ports and the direction matching rule.

pub mod direction;
pub mod entities;
pub mod errors;
pub mod matcher;
pub mod ports;
pub mod state;

pub use direction::Direction;
pub use entities::FocusHandle;
pub use errors::{CoordinatorError, PortError};
pub use matcher::{DirectionMatcher, MatchPolicy};
pub use state::{GameEvent, GameState};
