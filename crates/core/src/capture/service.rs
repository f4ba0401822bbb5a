//! Capture driver - builds a whole workspace snapshot

use std::sync::Arc;

use tracing::{debug, info};
use worksnap_domain::{validate_snapshot_name, AppCatalog, AppKind, Result, WorkspaceSnapshot};

use super::capturers::AppCapturer;
use super::RunningProcesses;
use crate::codec::decode_list;
use crate::ports::ControlPlane;
use crate::scripts;

/// Captures the live desktop into a [`WorkspaceSnapshot`].
pub struct CaptureService {
    control: Arc<dyn ControlPlane>,
    capturer: AppCapturer,
    catalog: AppCatalog,
}

impl CaptureService {
    pub fn new(control: Arc<dyn ControlPlane>, catalog: AppCatalog) -> Self {
        let capturer = AppCapturer::new(control.clone());
        Self { control, capturer, catalog }
    }

    /// Query the visible running processes once.
    pub async fn running_processes(&self) -> RunningProcesses {
        let raw = self.control.execute(&scripts::visible_processes()).await;
        RunningProcesses::new(decode_list(&raw))
    }

    /// Capture every running app into a snapshot named `name`.
    ///
    /// Dedicated capturers run first in catalog order, then every other
    /// visible process that is not excluded is captured generically.
    /// Nothing is persisted here.
    pub async fn capture(&self, name: &str) -> Result<WorkspaceSnapshot> {
        validate_snapshot_name(name)?;

        let running = self.running_processes().await;
        info!(workspace = name, running = running.len(), "capture.started");

        let mut apps = Vec::new();
        for (kind, app) in self.catalog.dedicated() {
            if let Some(snapshot) = self.capturer.capture(kind, app, &running).await {
                debug!(app, %kind, "capture.app_captured");
                apps.push(snapshot);
            }
        }

        for app in running.iter() {
            if self.catalog.is_dedicated(app) || self.catalog.is_excluded(app) {
                continue;
            }
            match self.capturer.capture(AppKind::Generic, app, &running).await {
                Some(snapshot) => apps.push(snapshot),
                None => debug!(app, "capture.app_skipped"),
            }
        }

        info!(workspace = name, apps = apps.len(), "capture.completed");
        Ok(WorkspaceSnapshot::new(name, apps))
    }
}
