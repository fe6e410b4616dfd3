//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals, thresholds and barriers > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the config value
//! - Runs before settings are accepted into the running manager

use crate::config::schema::{MonitorAppConfig, TrackingConfig};

/// A single semantic violation in a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("long_running.scan_interval_ms must be positive")]
    ZeroScanInterval,

    #[error("long_running.threshold_ms must be positive")]
    ZeroThreshold,

    #[error("parallel.barrier must be positive")]
    ZeroBarrier,

    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,
}

/// Validate tracking settings. Returns every violation found.
pub fn validate_tracking(config: &TrackingConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.long_running.scan_interval_ms == 0 {
        errors.push(ValidationError::ZeroScanInterval);
    }
    if config.long_running.threshold_ms == 0 {
        errors.push(ValidationError::ZeroThreshold);
    }
    if config.parallel.barrier == 0 {
        errors.push(ValidationError::ZeroBarrier);
    }

    errors
}

/// Validate the full application config.
pub fn validate_config(config: &MonitorAppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_tracking(&config.tracking);

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
