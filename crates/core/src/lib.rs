//! # Worksnap Core
//!
//! Capture/restore engine logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits)
//! - Tolerant text codec and script builders for the automation interpreter
//! - Window geometry probe, app capturers, restore orchestration
//! - The engine facade used by presentation shells
//!
//! ## Architecture Principles
//! - Only depends on `worksnap-domain`
//! - No process spawning, filesystem or platform code
//! - All external effects via traits

pub mod capture;
pub mod codec;
pub mod engine;
pub mod ports;
pub mod probe;
pub mod restore;
pub mod scripts;

// Re-export specific items to avoid ambiguity
pub use capture::{AppCapturer, CaptureService, RunningProcesses};
pub use engine::WorkspaceEngine;
pub use ports::{ControlPlane, DocumentLocator, SnapshotRepository};
pub use probe::WindowProbe;
pub use restore::{DocumentOutcome, RestoreOrchestrator};
