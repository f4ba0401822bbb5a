//! Port interfaces for the capture/restore engine
//!
//! These traits define the boundaries between the engine logic and the
//! infrastructure that talks to the desktop and the filesystem.

use std::path::Path;

use async_trait::async_trait;
use tracing::warn;
use worksnap_domain::{Result, WorkspaceSnapshot, WorkspaceSummary};

/// Textual command channel to the desktop automation interpreter.
///
/// Calls are blocking from the caller's point of view: the engine awaits
/// each one before issuing the next, so only one command is ever in flight.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Run a script and return its trimmed standard output.
    ///
    /// Fails with `InterpreterTimeout` or `InterpreterError`.
    async fn run(&self, script: &str) -> Result<String>;

    /// Run a script, treating any failure as "no data".
    ///
    /// The interpreter diagnostic is logged and an empty string is returned,
    /// which callers cannot tell apart from an empty successful result.
    async fn execute(&self, script: &str) -> String {
        match self.run(script).await {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, kind = err.label(), "control_plane.call_failed");
                String::new()
            }
        }
    }
}

/// Trait for persisting workspace snapshots
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Store a snapshot, replacing any existing one with the same name
    async fn save(&self, snapshot: &WorkspaceSnapshot) -> Result<()>;

    /// Load a snapshot by name (`NotFound` when absent, `CorruptDocument`
    /// when unreadable)
    async fn load(&self, name: &str) -> Result<WorkspaceSnapshot>;

    /// Summaries of all readable snapshots, newest first
    async fn list(&self) -> Result<Vec<WorkspaceSummary>>;

    /// Remove a snapshot (`NotFound` when absent)
    async fn delete(&self, name: &str) -> Result<()>;
}

/// Checks whether a document still exists before reopening it.
pub trait DocumentLocator: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}
