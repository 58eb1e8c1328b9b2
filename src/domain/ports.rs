use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};

use crate::domain::entities::FocusHandle;
use crate::domain::errors::PortError;
use crate::domain::{Direction, GameEvent, GameState};

// Channel types are a dependency leak into the domain, but every adapter and
// the coordinator already run on tokio.
pub type StateStream = broadcast::Receiver<GameState>;
pub type DirectionStream = mpsc::Receiver<Direction>;

// Port for the external game state machine.
pub trait GameMachine: Send + Sync {
    // Hot stream of states; emissions before subscribing are not replayed.
    fn game_state(&self) -> StateStream;
    // Fire-and-forget.
    fn post_event(&self, event: GameEvent);
}

// Port for the direction sensing service.
pub trait DirectionSource: Send + Sync {
    // Stream is only fed while `handle` stays live.
    fn observe(&self, handle: &FocusHandle) -> Result<DirectionStream, PortError>;
}

// Port for text-to-speech.
#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn say(&self, handle: &FocusHandle, text: &str) -> Result<(), PortError>;
}

// Lifecycle callbacks driven by the focus authority. This is the whole
// inbound surface of the coordinator.
#[async_trait]
pub trait FocusListener: Send + Sync {
    async fn on_focus_gained(&self, handle: FocusHandle);
    async fn on_focus_lost(&self);
    fn on_focus_refused(&self, reason: &str);
}
