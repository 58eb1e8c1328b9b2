// Framework bootstrap: logging, adapter wiring and the focus authority loop.

use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::domain::DirectionMatcher;
use crate::domain::ports::FocusListener;
use crate::frameworks::config::{self, ConfigError};
use crate::interface_adapters::utils::rng::DirectionPicker;
use crate::interface_adapters::{
    ConsoleSpeech, InMemoryGameMachine, SessionRegistry, SimulatedDirectionSource,
};
use crate::use_cases::GameCoordinator;

const DEFAULT_LOG_FILTER: &str = "attention_checker=info";

fn init_runtime() {
    let _ = dotenvy::dotenv();

    // RUST_LOG wins; otherwise only this crate logs at info.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => subscriber.json().with_current_span(true).init(),
        _ => subscriber.compact().init(),
    }

    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string);
        error!(%info, ?location, "coordinator panicked");
    }));
}

/// Plays the focus authority: grants focus for `session` on each of `cycles`
/// cycles, then takes it away and revokes the handle. Ctrl-C ends early.
pub async fn run<L: FocusListener>(
    listener: &L,
    registry: &SessionRegistry,
    cycles: u32,
    session: Duration,
) {
    for cycle in 1..=cycles {
        let handle = registry.open();
        info!(cycle, focus_id = handle.id(), "granting focus");
        listener.on_focus_gained(handle.clone()).await;

        let interrupted = tokio::select! {
            _ = tokio::time::sleep(session) => false,
            _ = tokio::signal::ctrl_c() => true,
        };

        // Focus is withdrawn before the handle becomes invalid.
        listener.on_focus_lost().await;
        registry.revoke(&handle);

        if interrupted {
            info!(cycle, "interrupted");
            return;
        }
    }
}

pub async fn run_with_config() -> Result<(), ConfigError> {
    init_runtime();

    let phrases = config::load_phrases().inspect_err(|e| {
        error!(error = %e, "failed to load phrases");
    })?;

    let registry = SessionRegistry::new();
    let machine = InMemoryGameMachine::new(config::STATE_CHANNEL_CAPACITY);
    let directions = SimulatedDirectionSource::new(
        registry.clone(),
        config::direction_interval(),
        config::DIRECTION_CHANNEL_CAPACITY,
        DirectionPicker::random(),
    );
    let speech = ConsoleSpeech::new(registry.clone(), config::speech_word_duration());
    tracing::debug!(
        direction_interval_ms = config::direction_interval().as_millis(),
        speech_word_ms = config::speech_word_duration().as_millis(),
        "adapters configured"
    );

    let coordinator = GameCoordinator::with_settings(
        machine.clone(),
        directions,
        speech,
        DirectionMatcher::default(),
        phrases,
    );

    run(
        &coordinator,
        &registry,
        config::focus_cycles(),
        config::session_duration(),
    )
    .await;

    info!(
        events = machine.events().len(),
        final_state = ?machine.current(),
        "attention check finished"
    );
    Ok(())
}
