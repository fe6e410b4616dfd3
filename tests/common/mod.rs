//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use request_monitor::{LongRunningListener, ParallelListener, TrackedRequest, TrackingConfig};

/// Listener recording every notification it receives.
#[derive(Default)]
pub struct RecordingListener {
    /// (request id, elapsed ms) per long-running notification.
    pub long_running: Mutex<Vec<(String, u64)>>,
    /// Registry size per above-limit notification.
    pub above: Mutex<Vec<usize>>,
    /// Below-limit notifications received.
    pub below: AtomicUsize,
}

impl RecordingListener {
    #[allow(dead_code)]
    pub fn below_count(&self) -> usize {
        self.below.load(Ordering::SeqCst)
    }
}

impl LongRunningListener for RecordingListener {
    fn on_long_running(&self, request: &TrackedRequest, elapsed: Duration) {
        self.long_running
            .lock()
            .push((request.request_id().to_string(), elapsed.as_millis() as u64));
    }
}

impl ParallelListener for RecordingListener {
    fn on_above_limit(&self, count: usize, _open: &[TrackedRequest]) {
        self.above.lock().push(count);
    }

    fn on_below_limit(&self) {
        self.below.fetch_add(1, Ordering::SeqCst);
    }
}

/// Tracking settings with the given barrier and thresholds.
#[allow(dead_code)]
pub fn settings(barrier: usize, threshold_ms: u64, scan_interval_ms: u64) -> TrackingConfig {
    let mut config = TrackingConfig::default();
    config.parallel.barrier = barrier;
    config.long_running.threshold_ms = threshold_ms;
    config.long_running.scan_interval_ms = scan_interval_ms;
    config
}
