// Shared wiring for integration tests: the full in-memory stack with short
// timings so a game round completes in milliseconds.
use std::time::Duration;

use attention_checker::domain::{Direction, GameEvent};
use attention_checker::interface_adapters::utils::rng::DirectionPicker;
use attention_checker::interface_adapters::{
    ConsoleSpeech, InMemoryGameMachine, SessionRegistry, SimulatedDirectionSource,
};
use attention_checker::use_cases::GameCoordinator;

pub type Coordinator =
    GameCoordinator<InMemoryGameMachine, SimulatedDirectionSource, ConsoleSpeech>;

pub struct Stack {
    pub coordinator: Coordinator,
    pub machine: InMemoryGameMachine,
    pub registry: SessionRegistry,
}

// `instructions` drives the machine's expected directions, `looks` the
// simulated subject.
pub fn stack(instructions: Vec<Direction>, looks: Vec<Direction>) -> Stack {
    let registry = SessionRegistry::new();
    let machine = InMemoryGameMachine::with_picker(64, DirectionPicker::scripted(instructions));
    let directions = SimulatedDirectionSource::new(
        registry.clone(),
        Duration::from_millis(5),
        8,
        DirectionPicker::scripted(looks),
    );
    let speech = ConsoleSpeech::new(registry.clone(), Duration::from_millis(1));
    let coordinator = GameCoordinator::new(machine.clone(), directions, speech);

    Stack {
        coordinator,
        machine,
        registry,
    }
}

// Polls the machine's event log for up to two seconds.
pub async fn wait_for_events(
    machine: &InMemoryGameMachine,
    condition: impl Fn(&[GameEvent]) -> bool,
) -> bool {
    for _ in 0..400 {
        if condition(&machine.events()) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition(&machine.events())
}

// True when `expected` appears in `events` in order, gaps allowed.
pub fn contains_in_order(events: &[GameEvent], expected: &[GameEvent]) -> bool {
    let mut remaining = expected.iter().peekable();
    for event in events {
        if remaining.peek() == Some(&event) {
            remaining.next();
        }
    }
    remaining.peek().is_none()
}
