use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::SpeechService;
use crate::domain::{FocusHandle, PortError};
use crate::interface_adapters::session::SessionRegistry;

// Speech adapter that logs the utterance and takes roughly as long as saying
// it out loud would.
#[derive(Clone)]
pub struct ConsoleSpeech {
    registry: SessionRegistry,
    word_duration: Duration,
}

impl ConsoleSpeech {
    pub fn new(registry: SessionRegistry, word_duration: Duration) -> Self {
        Self {
            registry,
            word_duration,
        }
    }

    fn duration_of(&self, text: &str) -> Duration {
        let words = text.split_whitespace().count().max(1) as u32;
        self.word_duration * words
    }
}

#[async_trait]
impl SpeechService for ConsoleSpeech {
    async fn say(&self, handle: &FocusHandle, text: &str) -> Result<(), PortError> {
        if !self.registry.is_live(handle) {
            return Err(PortError::HandleExpired);
        }

        info!(focus_id = handle.id(), text, "say");
        tokio::time::sleep(self.duration_of(text)).await;
        Ok(())
    }
}
