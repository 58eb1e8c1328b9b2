// Simulated direction sensing: emits a direction at a fixed interval for as
// long as the focus handle is live and someone is listening.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ports::{DirectionSource, DirectionStream};
use crate::domain::{FocusHandle, PortError};
use crate::interface_adapters::session::SessionRegistry;
use crate::interface_adapters::utils::rng::DirectionPicker;

#[derive(Clone)]
pub struct SimulatedDirectionSource {
    registry: SessionRegistry,
    interval: Duration,
    capacity: usize,
    // Shared so consecutive subscriptions continue the same script.
    picker: Arc<Mutex<DirectionPicker>>,
}

impl SimulatedDirectionSource {
    pub fn new(
        registry: SessionRegistry,
        interval: Duration,
        capacity: usize,
        picker: DirectionPicker,
    ) -> Self {
        Self {
            registry,
            interval,
            capacity,
            picker: Arc::new(Mutex::new(picker)),
        }
    }
}

impl DirectionSource for SimulatedDirectionSource {
    fn observe(&self, handle: &FocusHandle) -> Result<DirectionStream, PortError> {
        if !self.registry.is_live(handle) {
            return Err(PortError::HandleExpired);
        }

        let (tx, rx) = mpsc::channel(self.capacity);
        let registry = self.registry.clone();
        let picker = Arc::clone(&self.picker);
        let interval = self.interval;
        let handle = handle.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if !registry.is_live(&handle) {
                    debug!(focus_id = handle.id(), "focus revoked; direction feed stopped");
                    break;
                }
                let direction = picker.lock().unwrap_or_else(PoisonError::into_inner).pick();
                if tx.send(direction).await.is_err() {
                    debug!(focus_id = handle.id(), "direction feed unsubscribed");
                    break;
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    fn source(registry: &SessionRegistry) -> SimulatedDirectionSource {
        SimulatedDirectionSource::new(
            registry.clone(),
            Duration::from_millis(1),
            8,
            DirectionPicker::scripted(vec![Direction::Down, Direction::Right]),
        )
    }

    #[tokio::test]
    async fn emits_scripted_directions_while_the_handle_is_live() {
        let registry = SessionRegistry::new();
        let handle = registry.open();

        let mut stream = source(&registry).observe(&handle).expect("live handle");

        assert_eq!(stream.recv().await, Some(Direction::Down));
        assert_eq!(stream.recv().await, Some(Direction::Right));
    }

    #[tokio::test]
    async fn rejects_revoked_handles() {
        let registry = SessionRegistry::new();
        let handle = registry.open();
        registry.revoke(&handle);

        let result = source(&registry).observe(&handle);

        assert!(matches!(result, Err(PortError::HandleExpired)));
    }

    #[tokio::test]
    async fn feed_ends_once_the_handle_is_revoked() {
        let registry = SessionRegistry::new();
        let handle = registry.open();
        let mut stream = source(&registry).observe(&handle).expect("live handle");
        assert!(stream.recv().await.is_some());

        registry.revoke(&handle);

        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while stream.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok(), "stream should close after revocation");
    }
}
