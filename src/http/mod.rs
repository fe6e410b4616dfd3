//! HTTP integration for the tracking subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware.rs (assign request id, build context, add_request)
//!     → application handlers
//!     → guard drop (remove_request, even on panic or cancellation)
//! ```

pub mod middleware;

pub use middleware::{track_requests, RequestGuard};
