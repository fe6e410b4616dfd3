//! End-to-end behavior of the tracking manager and monitor loop.

use std::sync::Arc;
use std::time::Duration;

use request_monitor::{
    LongRunningListener, LongRunningMonitor, ParallelListener, RequestContext, Shutdown,
    TrackedRequest, TrackingManager,
};

mod common;
use common::{settings, RecordingListener};

fn ctx() -> Arc<RequestContext> {
    Arc::new(RequestContext::default())
}

/// Barrier 2, threshold 1000 ms: two adds cross the barrier, a scan after
/// 1500 ms reports both requests, one removal recovers below the barrier.
#[tokio::test(start_paused = true)]
async fn test_barrier_and_long_running_scenario() {
    let manager = TrackingManager::new(settings(2, 1000, 2000)).unwrap();
    let listener = Arc::new(RecordingListener::default());
    manager.register_long_running_listener(listener.clone());
    manager.register_parallel_listener(listener.clone());

    manager.add_request("r1", ctx());
    manager.add_request("r2", ctx());
    assert_eq!(*listener.above.lock(), vec![2]);

    tokio::time::advance(Duration::from_millis(1500)).await;
    manager.check_long_running();

    let hits = listener.long_running.lock().clone();
    assert_eq!(
        hits,
        vec![("r1".to_string(), 1500), ("r2".to_string(), 1500)]
    );

    manager.remove_request("r1");
    assert_eq!(manager.open_count(), 1);
    assert_eq!(listener.below_count(), 1);

    manager.remove_request("r2");
    assert_eq!(listener.below_count(), 1);
}

/// Listeners run in registration order, for both event families.
#[test]
fn test_listeners_invoked_in_registration_order() {
    use parking_lot::Mutex;

    struct Tagged {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl LongRunningListener for Tagged {
        fn on_long_running(&self, _request: &TrackedRequest, _elapsed: Duration) {
            self.log.lock().push(self.tag);
        }
    }

    impl ParallelListener for Tagged {
        fn on_above_limit(&self, _count: usize, _open: &[TrackedRequest]) {
            self.log.lock().push(self.tag);
        }

        fn on_below_limit(&self) {}
    }

    let manager = TrackingManager::new(settings(1, 1000, 2000)).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        manager.register_parallel_listener(Arc::new(Tagged {
            tag,
            log: log.clone(),
        }));
    }

    manager.add_request("r1", ctx());
    assert_eq!(*log.lock(), vec!["first", "second", "third"]);
}

/// The scan is a no-op without listeners, whatever the registry holds.
#[tokio::test(start_paused = true)]
async fn test_scan_without_listeners_is_a_no_op() {
    let manager = TrackingManager::new(settings(100, 10, 2000)).unwrap();
    manager.add_request("r1", ctx());
    tokio::time::advance(Duration::from_secs(60)).await;

    manager.check_long_running();
    assert_eq!(manager.open_count(), 1);
}

/// Monitor loop wired through the shutdown coordinator: scans happen while
/// running, the drain completes promptly after trigger.
#[tokio::test(start_paused = true)]
async fn test_monitor_with_shutdown_coordinator() {
    let manager = Arc::new(TrackingManager::new(settings(100, 50, 100)).unwrap());
    let listener = Arc::new(RecordingListener::default());
    manager.register_long_running_listener(listener.clone());
    manager.add_request("r1", ctx());

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(LongRunningMonitor::new(manager.clone()).run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(!listener.long_running.lock().is_empty());

    shutdown.trigger();
    assert!(request_monitor::lifecycle::drain(handle, Duration::from_secs(1)).await);
}

/// Settings swapped at runtime apply to the next scan.
#[tokio::test(start_paused = true)]
async fn test_runtime_reconfiguration_applies_to_next_scan() {
    let manager = TrackingManager::new(settings(100, 60_000, 2000)).unwrap();
    let listener = Arc::new(RecordingListener::default());
    manager.register_long_running_listener(listener.clone());

    manager.add_request("r1", ctx());
    tokio::time::advance(Duration::from_millis(500)).await;

    manager.check_long_running();
    assert!(listener.long_running.lock().is_empty());

    manager
        .update_settings(settings(100, 100, 2000))
        .unwrap();
    manager.check_long_running();
    assert_eq!(listener.long_running.lock().len(), 1);
}
