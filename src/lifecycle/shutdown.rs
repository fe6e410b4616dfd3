//! Shutdown coordination for the monitor and its embedder.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a background task to finish, up to `timeout`.
///
/// Returns `false` when the deadline expires with the task still running;
/// the task itself is not cancelled in that case.
pub async fn drain<T>(handle: JoinHandle<T>, timeout: Duration) -> bool {
    tokio::time::timeout(timeout, handle).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_waits_for_completion() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        let handle = tokio::spawn(async move {
            let _ = rx.recv().await;
        });

        shutdown.trigger();
        assert!(drain(handle, Duration::from_secs(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_times_out_on_stuck_task() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        assert!(!drain(handle, Duration::from_millis(100)).await);
    }
}
