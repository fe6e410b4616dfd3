//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Construct manager → Spawn monitor → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop serving → Trigger broadcast →
//!     Drain monitor (bounded wait; in-flight scan completes) → Exit
//! ```
//!
//! # Design Decisions
//! - The monitor never blocks shutdown: the drain wait is bounded
//! - No new scan tick starts once the shutdown signal is sent

pub mod shutdown;

pub use shutdown::{drain, Shutdown};
