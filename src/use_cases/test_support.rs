use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Semaphore, broadcast, mpsc};

use crate::domain::ports::{
    DirectionSource, DirectionStream, GameMachine, SpeechService, StateStream,
};
use crate::domain::{Direction, FocusHandle, GameEvent, GameState, PortError};

// Game machine double: states are pushed by the test, events are recorded.
#[derive(Clone)]
pub(crate) struct RecordingMachine {
    states: broadcast::Sender<GameState>,
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingMachine {
    pub(crate) fn new() -> Self {
        let (states, _) = broadcast::channel(16);
        Self {
            states,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn emit(&self, state: GameState) {
        // No receivers simply means nobody is subscribed.
        let _ = self.states.send(state);
    }

    pub(crate) fn events(&self) -> Vec<GameEvent> {
        self.events.lock().expect("events mutex poisoned").clone()
    }

    pub(crate) fn count(&self, event: GameEvent) -> usize {
        self.events().into_iter().filter(|e| *e == event).count()
    }

    // Subscription-count probe.
    pub(crate) fn active_subscriptions(&self) -> usize {
        self.states.receiver_count()
    }
}

impl GameMachine for RecordingMachine {
    fn game_state(&self) -> StateStream {
        self.states.subscribe()
    }

    fn post_event(&self, event: GameEvent) {
        self.events.lock().expect("events mutex poisoned").push(event);
    }
}

// Direction source double with a subscription-count probe.
#[derive(Clone, Default)]
pub(crate) struct FakeDirectionSource {
    senders: Arc<Mutex<Vec<mpsc::Sender<Direction>>>>,
    subscribe_calls: Arc<AtomicUsize>,
    expired: Arc<AtomicBool>,
}

impl FakeDirectionSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // Pushes to every open stream; returns how many accepted it.
    pub(crate) fn emit(&self, direction: Direction) -> usize {
        let senders = self.senders.lock().expect("senders mutex poisoned");
        senders
            .iter()
            .filter(|tx| tx.try_send(direction).is_ok())
            .count()
    }

    pub(crate) fn active_subscriptions(&self) -> usize {
        let senders = self.senders.lock().expect("senders mutex poisoned");
        senders.iter().filter(|tx| !tx.is_closed()).count()
    }

    pub(crate) fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    // Every later observe() fails as if focus had been revoked.
    pub(crate) fn expire_handles(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }
}

impl DirectionSource for FakeDirectionSource {
    fn observe(&self, _handle: &FocusHandle) -> Result<DirectionStream, PortError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if self.expired.load(Ordering::SeqCst) {
            return Err(PortError::HandleExpired);
        }

        let (tx, rx) = mpsc::channel(16);
        self.senders
            .lock()
            .expect("senders mutex poisoned")
            .push(tx);
        Ok(rx)
    }
}

// Speech double that records utterances. Optionally fails, or holds each
// completion until the test releases it.
#[derive(Clone, Default)]
pub(crate) struct FakeSpeech {
    spoken: Arc<Mutex<Vec<String>>>,
    fail: bool,
    gate: Option<Arc<Semaphore>>,
}

impl FakeSpeech {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    // Lets the next `count` gated utterances complete, oldest first.
    pub(crate) fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    pub(crate) fn spoken(&self) -> Vec<String> {
        self.spoken.lock().expect("spoken mutex poisoned").clone()
    }
}

#[async_trait]
impl SpeechService for FakeSpeech {
    async fn say(&self, _handle: &FocusHandle, text: &str) -> Result<(), PortError> {
        self.spoken
            .lock()
            .expect("spoken mutex poisoned")
            .push(text.to_string());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("speech gate closed")
                .forget();
        }

        if self.fail {
            return Err(PortError::Unavailable("speaker offline".to_string()));
        }
        Ok(())
    }
}

// Polls `condition` until it holds or about a second has passed.
pub(crate) async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
