use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use rand::Rng;

use crate::domain::Direction;

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Returns a process-unique, monotonically increasing identifier.
///
/// Seeded from the clock so ids differ between runs.
pub fn rand_id() -> u64 {
    static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| AtomicU64::new(now_nanos()));
    counter.fetch_add(1, Ordering::Relaxed)
}

/// Picks directions for the simulated adapters, either by cycling through a
/// fixed script or at random.
#[derive(Debug, Clone, Default)]
pub struct DirectionPicker {
    script: Vec<Direction>,
    cursor: usize,
}

impl DirectionPicker {
    pub fn random() -> Self {
        Self::default()
    }

    /// An empty script falls back to random picks.
    pub fn scripted(script: Vec<Direction>) -> Self {
        Self { script, cursor: 0 }
    }

    pub fn pick(&mut self) -> Direction {
        if self.script.is_empty() {
            let mut rng = rand::rng();
            return Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        }

        let direction = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        direction
    }
}
