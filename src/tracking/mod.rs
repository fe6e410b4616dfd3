//! Request tracking subsystem.
//!
//! # Data Flow
//! ```text
//! serving layer (middleware)
//!     → add_request (write lock, insertion-ordered registry)
//!         → size >= barrier? → parallel listeners (above limit)
//!     → remove_request (write lock)
//!         → dropped below barrier? → parallel listeners (below limit)
//!
//! monitor loop (background task)
//!     → scan tick (read lock, oldest first, early exit)
//!         → long-running listeners (one notification per offender per tick)
//! ```
//!
//! # Design Decisions
//! - Listener dispatch always happens after the registry lock is released,
//!   using values captured inside the critical section
//! - Insertion order is preserved across removals; the scan stops at the
//!   first entry below the threshold because all later entries are younger
//! - A panicking listener is logged and skipped; the remaining listeners
//!   still run
//! - Mismatched add/remove pairs are logged, never propagated: this
//!   subsystem observes requests, it does not gate them

pub mod callbacks;
pub mod monitor;
pub mod registry;
pub mod request;

pub use callbacks::{LogListener, LongRunningListener, ParallelListener};
pub use monitor::LongRunningMonitor;
pub use registry::TrackingManager;
pub use request::{RequestContext, TrackedRequest};
