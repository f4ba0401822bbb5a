//! Workspace restore

pub mod orchestrator;

pub use orchestrator::{DocumentOutcome, RestoreOrchestrator};
