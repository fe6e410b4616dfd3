//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorAppConfig (validated)
//!     → tracking section swapped into the TrackingManager
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → TrackingManager::update_settings (atomic swap)
//!     → monitor loop observes new settings on its next tick
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Invalid settings never reach the running manager

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::MonitorAppConfig;
pub use schema::TrackingConfig;
pub use schema::{ListenerConfig, LongRunningConfig, ObservabilityConfig, ParallelConfig};
