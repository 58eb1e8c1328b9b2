// Game coordinator: keeps the direction subscription in lockstep with game
// states and focus, speaks per state and feeds completions back as events.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    DirectionSource, DirectionStream, FocusListener, GameMachine, SpeechService, StateStream,
};
use crate::domain::{
    CoordinatorError, Direction, DirectionMatcher, FocusHandle, GameEvent, GameState, PortError,
};
use crate::use_cases::phrases::Phrases;
use crate::use_cases::subscription::Subscription;

/// Point-in-time view of the coordinator's own state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorSnapshot {
    pub has_focus: bool,
    pub game_state_active: bool,
    pub direction_active: bool,
    pub expected: Option<Direction>,
}

// All state shared between callbacks; only ever touched under `Inner::session`.
#[derive(Default)]
struct Session {
    focus: Option<FocusHandle>,
    game_state: Option<Subscription>,
    // Set exactly when `directions` is created, cleared when it is torn down.
    expected: Option<Direction>,
    directions: Option<Subscription>,
}

impl Session {
    fn is_current(slot: &Option<Subscription>, id: u64) -> bool {
        slot.as_ref().is_some_and(|s| s.id() == id)
    }

    // Both teardowns return only once the underlying stream is released.
    async fn stop_directions(&mut self) {
        self.expected = None;
        if let Some(mut subscription) = self.directions.take() {
            subscription.cancel().await;
            debug!(subscription_id = subscription.id(), "direction subscription cancelled");
        }
    }

    async fn stop_game_state(&mut self) {
        if let Some(mut subscription) = self.game_state.take() {
            subscription.cancel().await;
            debug!(subscription_id = subscription.id(), "game state subscription cancelled");
        }
    }

    fn snapshot(&self) -> CoordinatorSnapshot {
        CoordinatorSnapshot {
            has_focus: self.focus.is_some(),
            game_state_active: self.game_state.as_ref().is_some_and(Subscription::is_active),
            direction_active: self.directions.as_ref().is_some_and(Subscription::is_active),
            expected: self.expected,
        }
    }
}

struct Inner<M, D, S> {
    machine: M,
    directions: D,
    speech: S,
    matcher: DirectionMatcher,
    phrases: Phrases,
    session: Mutex<Session>,
}

/// Bridges the game machine, the direction source and speech for the
/// duration of each focus session.
pub struct GameCoordinator<M, D, S> {
    inner: Arc<Inner<M, D, S>>,
}

impl<M, D, S> Clone for GameCoordinator<M, D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M, D, S> GameCoordinator<M, D, S>
where
    M: GameMachine + 'static,
    D: DirectionSource + 'static,
    S: SpeechService + 'static,
{
    pub fn new(machine: M, directions: D, speech: S) -> Self {
        Self::with_settings(
            machine,
            directions,
            speech,
            DirectionMatcher::default(),
            Phrases::default(),
        )
    }

    pub fn with_settings(
        machine: M,
        directions: D,
        speech: S,
        matcher: DirectionMatcher,
        phrases: Phrases,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                machine,
                directions,
                speech,
                matcher,
                phrases,
                session: Mutex::new(Session::default()),
            }),
        }
    }

    pub async fn snapshot(&self) -> CoordinatorSnapshot {
        self.inner.session.lock().await.snapshot()
    }
}

impl<M, D, S> Inner<M, D, S>
where
    M: GameMachine + 'static,
    D: DirectionSource + 'static,
    S: SpeechService + 'static,
{
    async fn consume_game_state(self: Arc<Self>, subscription_id: u64, mut states: StateStream) {
        loop {
            match states.recv().await {
                Ok(state) => self.handle_game_state(subscription_id, state).await,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(
                        missed,
                        "game state subscription lagged; resuming from oldest retained state"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!(subscription_id, "game state stream closed");
                    break;
                }
            }
        }
    }

    async fn handle_game_state(self: &Arc<Self>, subscription_id: u64, state: GameState) {
        // Subscription changes land before speech is dispatched, so a direction
        // arriving right after this state is judged against the new expectation.
        let handle = {
            let mut session = self.session.lock().await;
            if !Session::is_current(&session.game_state, subscription_id) {
                debug!(subscription_id, ?state, "dropping state from a stale subscription");
                return;
            }

            match state.awaited_direction() {
                Some(expected) => self.start_directions(&mut session, expected),
                None => session.stop_directions().await,
            }
            session.focus.clone()
        };
        debug!(?state, "game state");

        if let Some((text, follow_up)) = speech_for(&self.phrases, &state) {
            self.dispatch_speech(handle, text, follow_up);
        }
    }

    fn start_directions(self: &Arc<Self>, session: &mut Session, expected: Direction) {
        if session.directions.as_ref().is_some_and(Subscription::is_active) {
            debug!(
                error = %CoordinatorError::DuplicateSubscription,
                %expected,
                "already observing directions"
            );
            return;
        }
        let Some(handle) = session.focus.as_ref() else {
            debug!(%expected, "no focus; not observing directions");
            return;
        };

        let stream = match self.directions.observe(handle) {
            Ok(stream) => stream,
            Err(PortError::HandleExpired) => {
                debug!(
                    error = %CoordinatorError::HandleExpired,
                    focus_id = handle.id(),
                    "direction subscribe skipped"
                );
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to observe directions");
                return;
            }
        };

        let inner = Arc::clone(self);
        let subscription = Subscription::spawn(move |id| inner.consume_directions(id, stream));
        debug!(subscription_id = subscription.id(), %expected, "observing directions");
        session.expected = Some(expected);
        session.directions = Some(subscription);
    }

    async fn consume_directions(self: Arc<Self>, subscription_id: u64, mut stream: DirectionStream) {
        while let Some(observed) = stream.recv().await {
            self.handle_direction(subscription_id, observed).await;
        }
        debug!(subscription_id, "direction stream ended");
    }

    async fn handle_direction(&self, subscription_id: u64, observed: Direction) {
        let session = self.session.lock().await;
        if !Session::is_current(&session.directions, subscription_id) {
            debug!(subscription_id, %observed, "dropping direction from a cancelled subscription");
            return;
        }
        let Some(expected) = session.expected else {
            report_inconsistency(observed);
            return;
        };

        let event = if self.matcher.matches(expected, observed) {
            GameEvent::Match
        } else {
            GameEvent::NotMatch(observed)
        };
        debug!(%expected, %observed, ?event, "direction evaluated");
        // Posted under the lock: once teardown returns, nothing else is posted.
        self.machine.post_event(event);
    }

    fn dispatch_speech(self: &Arc<Self>, handle: Option<FocusHandle>, text: String, follow_up: GameEvent) {
        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = match &handle {
                Some(handle) => inner.speech.say(handle, &text).await,
                None => Err(PortError::HandleExpired),
            };
            if let Err(e) = outcome {
                let error = CoordinatorError::SpeechFailure(e.to_string());
                warn!(%error, %text, ?follow_up, "speech not delivered; continuing");
            }
            inner.machine.post_event(follow_up);
        });
    }
}

// Text to speak for a state and the event to post once it has been spoken.
fn speech_for(phrases: &Phrases, state: &GameState) -> Option<(String, GameEvent)> {
    match *state {
        GameState::Idle | GameState::Playing { .. } => None,
        GameState::Intro => Some((phrases.intro(), GameEvent::IntroFinished)),
        GameState::Instructions { expected } => Some((
            phrases.instructions(expected),
            GameEvent::InstructionsFinished,
        )),
        GameState::NotMatching { expected, looked } => Some((
            phrases.not_matching(expected, looked),
            GameEvent::NotMatchingFinished,
        )),
        GameState::Matching { expected } => {
            Some((phrases.matching(expected), GameEvent::MatchingFinished))
        }
    }
}

fn report_inconsistency(observed: Direction) {
    let error = CoordinatorError::InternalConsistency;
    error!(%error, %observed, "dropping direction observation");
    if cfg!(debug_assertions) {
        panic!("{error}: observed {observed}");
    }
}

#[async_trait]
impl<M, D, S> FocusListener for GameCoordinator<M, D, S>
where
    M: GameMachine + 'static,
    D: DirectionSource + 'static,
    S: SpeechService + 'static,
{
    async fn on_focus_gained(&self, handle: FocusHandle) {
        info!(focus_id = handle.id(), "focus gained");
        {
            let mut session = self.inner.session.lock().await;
            session.focus = Some(handle);

            if session.game_state.as_ref().is_some_and(Subscription::is_active) {
                warn!(
                    error = %CoordinatorError::DuplicateSubscription,
                    "focus gained twice; keeping game state subscription"
                );
            } else {
                // Subscribe before posting so the machine's reply is not missed.
                let states = self.inner.machine.game_state();
                let inner = Arc::clone(&self.inner);
                session.game_state =
                    Some(Subscription::spawn(move |id| inner.consume_game_state(id, states)));
            }
        }

        self.inner.machine.post_event(GameEvent::FocusGained);
    }

    async fn on_focus_lost(&self) {
        {
            let mut session = self.inner.session.lock().await;
            session.stop_directions().await;
            session.stop_game_state().await;
            session.focus = None;
        }
        info!("focus lost");

        self.inner.machine.post_event(GameEvent::FocusLost);
    }

    fn on_focus_refused(&self, reason: &str) {
        // The focus authority owns retries.
        warn!(reason, "focus refused");
    }
}
