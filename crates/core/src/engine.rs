//! Engine facade consumed by presentation shells
//!
//! Exposes `capture`, `restore`, `list` and `delete`. Operations that touch
//! the automation surface are serialized through one async lock, so shells
//! may call from background tasks without racing each other.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};
use worksnap_domain::{
    validate_snapshot_name, AppCatalog, RestoreReport, RestoreTimings, Result, WorkspaceSnapshot,
    WorkspaceSummary,
};

use crate::capture::CaptureService;
use crate::ports::{ControlPlane, DocumentLocator, SnapshotRepository};
use crate::restore::RestoreOrchestrator;

/// Capture/restore engine
pub struct WorkspaceEngine {
    capture: CaptureService,
    restore: RestoreOrchestrator,
    repository: Arc<dyn SnapshotRepository>,
    automation: Mutex<()>,
}

impl WorkspaceEngine {
    /// Create a new engine
    pub fn new(
        control: Arc<dyn ControlPlane>,
        repository: Arc<dyn SnapshotRepository>,
        locator: Arc<dyn DocumentLocator>,
        catalog: AppCatalog,
        timings: RestoreTimings,
    ) -> Self {
        Self {
            capture: CaptureService::new(control.clone(), catalog),
            restore: RestoreOrchestrator::new(control, locator, timings),
            repository,
            automation: Mutex::new(()),
        }
    }

    /// Capture the live desktop and store it under `name`.
    ///
    /// An existing snapshot with the same name is replaced.
    pub async fn capture(&self, name: &str) -> Result<WorkspaceSnapshot> {
        validate_snapshot_name(name)?;
        let _guard = self.automation.lock().await;

        let snapshot = self.capture.capture(name).await?;
        if let Err(err) = self.repository.save(&snapshot).await {
            error!(workspace = name, error = %err, kind = err.label(), "engine.save_failed");
            return Err(err);
        }
        info!(workspace = name, apps = snapshot.apps.len(), "engine.captured");
        Ok(snapshot)
    }

    /// Replay the snapshot stored under `name`.
    ///
    /// Fails with `NotFound` or `CorruptDocument` before touching the desktop.
    pub async fn restore(&self, name: &str) -> Result<RestoreReport> {
        validate_snapshot_name(name)?;
        let snapshot = self.repository.load(name).await?;

        let _guard = self.automation.lock().await;
        Ok(self.restore.restore(&snapshot).await)
    }

    /// Summaries of stored snapshots, newest first.
    pub async fn list(&self) -> Result<Vec<WorkspaceSummary>> {
        self.repository.list().await
    }

    /// Permanently remove the snapshot stored under `name`.
    pub async fn delete(&self, name: &str) -> Result<()> {
        validate_snapshot_name(name)?;
        self.repository.delete(name).await?;
        info!(workspace = name, "engine.deleted");
        Ok(())
    }
}
