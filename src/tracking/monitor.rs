//! Background monitor loop for long-running requests.

use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::tracking::registry::TrackingManager;

/// Periodic task that drives the long-running scan.
///
/// Spawned once by the embedder; exits on the shutdown signal. The scan
/// interval and threshold are re-read from the manager on every tick, so
/// runtime reconfiguration takes effect on the next tick without a restart.
pub struct LongRunningMonitor {
    manager: Arc<TrackingManager>,
}

impl LongRunningMonitor {
    pub fn new(manager: Arc<TrackingManager>) -> Self {
        Self { manager }
    }

    /// Run the monitor loop until shutdown is signalled.
    ///
    /// No new tick starts once the signal is received; a tick already in
    /// progress completes before the task returns, so awaiting the join
    /// handle drains the loop cleanly.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let settings = self.manager.settings();
        if !settings.long_running.enabled {
            tracing::info!("Long-running request monitor disabled");
            return;
        }

        tracing::info!(
            scan_interval_ms = settings.long_running.scan_interval_ms,
            threshold_ms = settings.long_running.threshold_ms,
            "Request monitor starting"
        );

        loop {
            let interval = self.manager.settings().long_running.scan_interval();
            tokio::select! {
                _ = sleep(interval) => {
                    self.manager.check_long_running();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Request monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
