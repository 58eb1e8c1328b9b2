// Handle for a spawned task consuming a stream.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tracing::warn;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// A live link to a stream. Dropping the handle cancels the consumer task.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    cancelled: bool,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Spawns the consumer built by `consumer`, which receives the
    /// subscription's process-unique id so it can recognize itself later.
    pub fn spawn<F, Fut>(consumer: F) -> Self
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            cancelled: false,
            task: tokio::spawn(consumer(id)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled && !self.task.is_finished()
    }

    /// Idempotent. Returns once the consumer task, and the stream it owns,
    /// has been dropped.
    pub async fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        self.task.abort();
        match (&mut self.task).await {
            Err(e) if e.is_panic() => {
                warn!(subscription_id = self.id, error = %e, "stream consumer panicked");
            }
            _ => {}
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
