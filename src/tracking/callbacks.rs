//! Listener interfaces and dispatch for tracking events.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crate::tracking::request::TrackedRequest;

/// Listener for requests that exceed the long-running threshold.
///
/// Invoked once per offending request per scan tick. A request that stays
/// long-running across several ticks is reported on every tick.
pub trait LongRunningListener: Send + Sync {
    fn on_long_running(&self, request: &TrackedRequest, elapsed: Duration);
}

/// Listener for parallel-running barrier crossings.
pub trait ParallelListener: Send + Sync {
    /// Fired on every add that lands while the registry size is at or above
    /// the barrier. Not edge-triggered: remaining above the barrier re-fires
    /// this on each add. `open` is an insertion-ordered snapshot.
    fn on_above_limit(&self, count: usize, open: &[TrackedRequest]);

    /// Fired exactly once per transition from above the barrier back below it.
    fn on_below_limit(&self);
}

/// Invoke every long-running listener, containing panics per listener.
pub(crate) fn notify_long_running(
    listeners: &[Arc<dyn LongRunningListener>],
    request: &TrackedRequest,
    elapsed: Duration,
) {
    for listener in listeners {
        let result = catch_unwind(AssertUnwindSafe(|| listener.on_long_running(request, elapsed)));
        if result.is_err() {
            tracing::error!(
                request_id = %request.request_id(),
                "Long-running listener panicked, continuing with remaining listeners"
            );
        }
    }
}

/// Invoke every parallel listener's above-limit hook, containing panics.
pub(crate) fn notify_above_limit(
    listeners: &[Arc<dyn ParallelListener>],
    count: usize,
    open: &[TrackedRequest],
) {
    for listener in listeners {
        let result = catch_unwind(AssertUnwindSafe(|| listener.on_above_limit(count, open)));
        if result.is_err() {
            tracing::error!(
                count,
                "Parallel listener panicked in above-limit, continuing with remaining listeners"
            );
        }
    }
}

/// Invoke every parallel listener's below-limit hook, containing panics.
pub(crate) fn notify_below_limit(listeners: &[Arc<dyn ParallelListener>]) {
    for listener in listeners {
        let result = catch_unwind(AssertUnwindSafe(|| listener.on_below_limit()));
        if result.is_err() {
            tracing::error!(
                "Parallel listener panicked in below-limit, continuing with remaining listeners"
            );
        }
    }
}

/// Built-in listener that reports every tracking event as a structured log
/// line. Registered by default so the subsystem is useful before any
/// application-specific listener is installed.
#[derive(Debug, Default)]
pub struct LogListener;

impl LongRunningListener for LogListener {
    fn on_long_running(&self, request: &TrackedRequest, elapsed: Duration) {
        let ctx = request.context();
        tracing::warn!(
            request_id = %request.request_id(),
            elapsed_ms = elapsed.as_millis() as u64,
            remote_addr = ?ctx.remote_addr,
            uri = ctx.uri.as_deref().unwrap_or("-"),
            "Long-running request detected"
        );
    }
}

impl ParallelListener for LogListener {
    fn on_above_limit(&self, count: usize, open: &[TrackedRequest]) {
        let oldest = open.first().map(|r| r.request_id().to_string());
        tracing::warn!(
            count,
            oldest_request_id = oldest.as_deref().unwrap_or("-"),
            "Parallel running requests at or above the barrier"
        );
    }

    fn on_below_limit(&self) {
        tracing::info!("Parallel running requests back below the barrier");
    }
}
