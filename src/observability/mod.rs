//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! tracking subsystem produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (open-request gauge, detection counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging with request id and elapsed time on every event
//! - Metrics are cheap (atomic increments); no labels with unbounded
//!   cardinality (request ids never become label values)

pub mod logging;
pub mod metrics;
