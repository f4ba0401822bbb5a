//! # Worksnap Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The interpreter-backed control plane (`osascript` by default)
//! - JSON file storage for workspace snapshots
//! - Filesystem document lookup
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `worksnap-core`
//! - Contains all "impure" code (process spawning, filesystem I/O)

pub mod bootstrap;
pub mod config;
pub mod observability;
pub mod platform;
pub mod storage;

// Re-export commonly used items
pub use bootstrap::build_engine;
pub use platform::*;
pub use storage::*;
