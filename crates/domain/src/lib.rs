//! # Worksnap Domain
//!
//! Business domain types and models for Worksnap.
//!
//! This crate contains:
//! - Snapshot data types (WorkspaceSnapshot, AppSnapshot, WindowRect)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Worksnap crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
