//! In-flight HTTP request tracking library.
//!
//! Tracks every open request in an insertion-ordered registry, scans it
//! periodically for long-running requests, and detects parallel-running
//! barrier crossings on add/remove. Purely advisory: it observes and
//! reports, it never cancels or fails a request.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod tracking;

pub use config::schema::{MonitorAppConfig, TrackingConfig};
pub use http::middleware::{track_requests, RequestGuard};
pub use lifecycle::Shutdown;
pub use tracking::callbacks::{LogListener, LongRunningListener, ParallelListener};
pub use tracking::monitor::LongRunningMonitor;
pub use tracking::registry::TrackingManager;
pub use tracking::request::{RequestContext, TrackedRequest};
