//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the request monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the monitor demo application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorAppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Request tracking settings.
    pub tracking: TrackingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Request tracking settings.
///
/// Owned by the `TrackingManager` as a single swappable value; there is no
/// global mutable settings object.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrackingConfig {
    /// Long-running request detection.
    pub long_running: LongRunningConfig,

    /// Parallel-running request detection.
    pub parallel: ParallelConfig,
}

/// Settings for the long-running request check.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LongRunningConfig {
    /// Enable the periodic long-running scan.
    pub enabled: bool,

    /// Interval between scan ticks in milliseconds.
    pub scan_interval_ms: u64,

    /// Duration after which an open request counts as long-running, in
    /// milliseconds.
    pub threshold_ms: u64,
}

impl Default for LongRunningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scan_interval_ms: 2_000,
            threshold_ms: 30_000,
        }
    }
}

impl LongRunningConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn threshold(&self) -> Duration {
        Duration::from_millis(self.threshold_ms)
    }
}

/// Settings for the parallel-running request check.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Enable barrier-crossing detection on add/remove.
    pub enabled: bool,

    /// Number of simultaneously open requests that triggers a warning.
    pub barrier: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            barrier: 60,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackingConfig::default();
        assert!(config.long_running.enabled);
        assert_eq!(config.long_running.scan_interval(), Duration::from_secs(2));
        assert_eq!(config.long_running.threshold(), Duration::from_secs(30));
        assert!(config.parallel.enabled);
        assert_eq!(config.parallel.barrier, 60);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: MonitorAppConfig = toml::from_str(
            r#"
            [tracking.long_running]
            threshold_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.tracking.long_running.threshold_ms, 5000);
        assert_eq!(config.tracking.long_running.scan_interval_ms, 2000);
        assert_eq!(config.tracking.parallel.barrier, 60);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
