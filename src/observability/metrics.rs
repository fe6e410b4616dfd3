//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tracking_open_requests` (gauge): currently open tracked requests
//! - `tracking_long_running_total` (counter): long-running notifications
//! - `tracking_parallel_limit_total` (counter): adds observed at/above the
//!   barrier
//! - `tracking_mismatched_lifecycle_total` (counter): duplicate adds and
//!   removes without a matching add, labelled by kind

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and register metric descriptions.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_gauge!("tracking_open_requests", "Currently open tracked requests");
            describe_counter!(
                "tracking_long_running_total",
                "Long-running request notifications emitted"
            );
            describe_counter!(
                "tracking_parallel_limit_total",
                "Adds observed at or above the parallel barrier"
            );
            describe_counter!(
                "tracking_mismatched_lifecycle_total",
                "Mismatched add/remove pairs observed"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter");
        }
    }
}

pub fn record_open_requests(count: usize) {
    gauge!("tracking_open_requests").set(count as f64);
}

pub fn record_long_running() {
    counter!("tracking_long_running_total").increment(1);
}

pub fn record_parallel_limit(_count: usize) {
    counter!("tracking_parallel_limit_total").increment(1);
}

pub fn record_mismatched_lifecycle(kind: &'static str) {
    counter!("tracking_mismatched_lifecycle_total", "kind" => kind).increment(1);
}
