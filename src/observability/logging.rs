//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the process.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this crate.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "request_monitor={default_level},tower_http=warn"
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
