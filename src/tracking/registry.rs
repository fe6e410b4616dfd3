//! Concurrent registry of in-flight requests.
//!
//! # Responsibilities
//! - Track every open request under a unique id, in insertion order
//! - Detect parallel-running barrier crossings on add/remove
//! - Scan for long-running requests on behalf of the monitor loop
//!
//! # Design Decisions
//! - Single reader-writer lock: mutations take the write lock, the scan
//!   takes the read lock
//! - Listener dispatch runs after the lock is released, on values captured
//!   inside the critical section, so listener code can never hold up other
//!   request threads or deadlock the registry
//! - The scan walks oldest-first and stops at the first entry at or below
//!   the threshold: every later insertion is younger

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use parking_lot::RwLock;
use tokio::time::Instant;

use crate::config::loader::ConfigError;
use crate::config::schema::TrackingConfig;
use crate::config::validation::validate_tracking;
use crate::observability::metrics;
use crate::tracking::callbacks::{
    notify_above_limit, notify_below_limit, notify_long_running, LogListener, LongRunningListener,
    ParallelListener,
};
use crate::tracking::request::{RequestContext, TrackedRequest};

/// Registry state guarded by the reader-writer lock.
#[derive(Default)]
struct Registry {
    /// Open requests keyed by insertion sequence. `BTreeMap` iteration yields
    /// them oldest-first, and removals never reorder the survivors.
    entries: BTreeMap<u64, TrackedRequest>,

    /// Lookup index: request id → insertion sequence.
    index: HashMap<String, u64>,

    /// Next insertion sequence.
    next_seq: u64,

    /// Whether the parallel-running count is currently at or above the
    /// barrier. Gates the below-limit notification to one per recovery.
    above_limit: bool,
}

/// Thread-safe manager for tracked requests.
///
/// Explicitly constructed and owned by the embedder; thread it through the
/// serving pipeline rather than stashing it in a global.
pub struct TrackingManager {
    registry: RwLock<Registry>,
    settings: ArcSwap<TrackingConfig>,
    long_running_listeners: RwLock<Vec<Arc<dyn LongRunningListener>>>,
    parallel_listeners: RwLock<Vec<Arc<dyn ParallelListener>>>,
}

impl TrackingManager {
    /// Create a manager with the given settings and no listeners.
    ///
    /// Settings are validated eagerly; invalid values never reach a running
    /// manager.
    pub fn new(settings: TrackingConfig) -> Result<Self, ConfigError> {
        let violations = validate_tracking(&settings);
        if !violations.is_empty() {
            return Err(ConfigError::Validation(violations));
        }

        Ok(Self {
            registry: RwLock::new(Registry::default()),
            settings: ArcSwap::from_pointee(settings),
            long_running_listeners: RwLock::new(Vec::new()),
            parallel_listeners: RwLock::new(Vec::new()),
        })
    }

    /// Create a manager with the built-in log listeners registered for both
    /// event families.
    pub fn with_default_listeners(settings: TrackingConfig) -> Result<Self, ConfigError> {
        let manager = Self::new(settings)?;
        let listener = Arc::new(LogListener);
        manager.register_long_running_listener(listener.clone());
        manager.register_parallel_listener(listener);
        Ok(manager)
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Arc<TrackingConfig> {
        self.settings.load_full()
    }

    /// Replace the settings. Takes effect on the next add/remove/scan.
    ///
    /// Invalid settings are rejected and the running settings keep applying.
    pub fn update_settings(&self, settings: TrackingConfig) -> Result<(), ConfigError> {
        let violations = validate_tracking(&settings);
        if !violations.is_empty() {
            return Err(ConfigError::Validation(violations));
        }

        tracing::info!(
            long_running_enabled = settings.long_running.enabled,
            threshold_ms = settings.long_running.threshold_ms,
            scan_interval_ms = settings.long_running.scan_interval_ms,
            parallel_enabled = settings.parallel.enabled,
            barrier = settings.parallel.barrier,
            "Tracking settings updated"
        );
        self.settings.store(Arc::new(settings));
        Ok(())
    }

    /// Register a listener for long-running notifications.
    pub fn register_long_running_listener(&self, listener: Arc<dyn LongRunningListener>) {
        self.long_running_listeners.write().push(listener);
    }

    /// Register a listener for parallel barrier notifications.
    pub fn register_parallel_listener(&self, listener: Arc<dyn ParallelListener>) {
        self.parallel_listeners.write().push(listener);
    }

    /// Number of currently open requests.
    pub fn open_count(&self) -> usize {
        self.registry.read().entries.len()
    }

    /// Snapshot of the open requests in insertion order, oldest first.
    pub fn open_requests(&self) -> Vec<TrackedRequest> {
        self.registry.read().entries.values().cloned().collect()
    }

    /// Register a request as open.
    ///
    /// A duplicate id with a different context handle indicates a bug in the
    /// calling serving layer; it is logged and the entry is overwritten, the
    /// request itself is never failed over it.
    pub fn add_request(&self, request_id: impl Into<String>, context: Arc<RequestContext>) {
        let request_id = request_id.into();
        let settings = self.settings.load();

        let above = {
            let mut reg = self.registry.write();

            if let Some(seq) = reg.index.remove(&request_id) {
                if let Some(existing) = reg.entries.remove(&seq) {
                    if !Arc::ptr_eq(existing.context(), &context) {
                        tracing::error!(
                            request_id = %request_id,
                            "Request id already tracked with a different context, overwriting"
                        );
                        metrics::record_mismatched_lifecycle("duplicate_add");
                    }
                }
            }

            let seq = reg.next_seq;
            reg.next_seq += 1;
            reg.index.insert(request_id.clone(), seq);
            reg.entries
                .insert(seq, TrackedRequest::new(request_id, context));

            let count = reg.entries.len();
            metrics::record_open_requests(count);

            // Fires on every add at/above the barrier, not only on the
            // crossing edge. Asymmetric with the below-limit side, but kept
            // for compatibility with existing consumers; see DESIGN.md.
            if settings.parallel.enabled && count >= settings.parallel.barrier {
                reg.above_limit = true;
                Some((count, reg.entries.values().cloned().collect::<Vec<_>>()))
            } else {
                None
            }
        };

        if let Some((count, open)) = above {
            metrics::record_parallel_limit(count);
            let listeners = self.parallel_listeners.read().clone();
            notify_above_limit(&listeners, count, &open);
        }
    }

    /// Mark a request as finished and drop it from the registry.
    ///
    /// Removing an id that was never added is logged and ignored; begin/end
    /// pairing is advisory bookkeeping, not a correctness gate.
    pub fn remove_request(&self, request_id: &str) {
        let settings = self.settings.load();

        let dropped_below = {
            let mut reg = self.registry.write();

            match reg.index.remove(request_id) {
                Some(seq) => {
                    reg.entries.remove(&seq);
                }
                None => {
                    tracing::error!(
                        request_id = %request_id,
                        "Removing a request that was never tracked"
                    );
                    metrics::record_mismatched_lifecycle("remove_without_add");
                }
            }

            let count = reg.entries.len();
            metrics::record_open_requests(count);

            if reg.above_limit && count < settings.parallel.barrier {
                reg.above_limit = false;
                true
            } else {
                false
            }
        };

        if dropped_below {
            let listeners = self.parallel_listeners.read().clone();
            notify_below_limit(&listeners);
        }
    }

    /// Scan for requests open longer than the configured threshold.
    ///
    /// Called by the monitor loop on every tick. No-op when the check is
    /// disabled or no listener is registered. Offenders are collected under
    /// the read lock and notified after it is released, one notification per
    /// offender per tick.
    pub fn check_long_running(&self) {
        let listeners = self.long_running_listeners.read().clone();
        if listeners.is_empty() {
            return;
        }

        let settings = self.settings.load();
        if !settings.long_running.enabled {
            return;
        }

        let threshold = settings.long_running.threshold();
        let now = Instant::now();

        let offenders: Vec<(TrackedRequest, Duration)> = {
            let reg = self.registry.read();
            let mut hits = Vec::new();
            for request in reg.entries.values() {
                let elapsed = now.saturating_duration_since(request.started_at());
                if elapsed > threshold {
                    hits.push((request.clone(), elapsed));
                } else {
                    // Every later insertion is younger; nothing past this
                    // point can be over the threshold.
                    break;
                }
            }
            hits
        };

        for (request, elapsed) in &offenders {
            metrics::record_long_running();
            notify_long_running(&listeners, request, *elapsed);
        }
    }
}
