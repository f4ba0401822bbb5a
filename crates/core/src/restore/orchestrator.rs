//! Two-phase restore orchestration
//!
//! Phase 1 relaunches apps and recreates their content in snapshot order.
//! Phase 2 waits for windows to settle, then reapplies recorded geometry to
//! at most as many windows as each app has live. Failures are contained to
//! the app, document or window they occur in; there is no rollback.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use worksnap_domain::constants::ERROR_TAG;
use worksnap_domain::{
    AppSnapshot, DocumentRef, RestoreReport, RestoreTimings, Result, WindowRect, WorkspaceSnapshot,
    WorksnapError,
};

use crate::codec::decode_list;
use crate::ports::{ControlPlane, DocumentLocator};
use crate::probe::WindowProbe;
use crate::scripts;

/// Outcome of reopening a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    Opened,
    Skipped,
    Failed,
}

/// Replays a [`WorkspaceSnapshot`] against the live desktop.
pub struct RestoreOrchestrator {
    control: Arc<dyn ControlPlane>,
    probe: WindowProbe,
    locator: Arc<dyn DocumentLocator>,
    timings: RestoreTimings,
}

impl RestoreOrchestrator {
    pub fn new(
        control: Arc<dyn ControlPlane>,
        locator: Arc<dyn DocumentLocator>,
        timings: RestoreTimings,
    ) -> Self {
        let probe = WindowProbe::new(control.clone());
        Self { control, probe, locator, timings }
    }

    /// Run both phases once and report what happened.
    pub async fn restore(&self, snapshot: &WorkspaceSnapshot) -> RestoreReport {
        let mut report = RestoreReport::new(&snapshot.name);
        info!(workspace = %snapshot.name, apps = snapshot.apps.len(), "restore.started");

        for app in &snapshot.apps {
            match self.restore_content(app, &mut report).await {
                Ok(()) => report.apps_restored.push(app.app().to_string()),
                Err(err) => {
                    warn!(app = app.app(), error = %err, "restore.app_failed");
                    report.apps_failed.push((app.app().to_string(), err.to_string()));
                }
            }
        }

        settle(self.timings.geometry_settle).await;

        for app in &snapshot.apps {
            let positions = app.window_positions();
            if !positions.is_empty() {
                self.restore_geometry(app.app(), positions, &mut report).await;
            }
        }

        info!(
            workspace = %snapshot.name,
            restored = report.apps_restored.len(),
            failed = report.apps_failed.len(),
            windows_positioned = report.windows_positioned,
            windows_failed = report.windows_failed,
            windows_skipped = report.windows_skipped,
            "restore.completed"
        );
        report
    }

    async fn restore_content(&self, app: &AppSnapshot, report: &mut RestoreReport) -> Result<()> {
        debug!(app = app.app(), kind = %app.kind(), "restore.content");
        match app {
            AppSnapshot::Browser { app, windows, .. } => self.restore_browser(app, windows).await,
            AppSnapshot::DocumentEditor { app, documents, .. } => {
                self.restore_document_editor(app, documents, report).await
            }
            AppSnapshot::BibleSoftware { app, current_layout, .. } => {
                self.restore_bible_software(app, current_layout).await
            }
            AppSnapshot::ReferenceManager { app, .. } => {
                self.activate(app, self.timings.reference_activate_settle).await
            }
            AppSnapshot::Generic { app, .. } => {
                self.activate(app, self.timings.generic_activate_settle).await
            }
        }
    }

    async fn activate(&self, app: &str, then_wait: Duration) -> Result<()> {
        self.control.run(&scripts::activate(app)).await?;
        settle(then_wait).await;
        Ok(())
    }

    /// Close existing windows, then open one window per recorded window.
    ///
    /// Windows are launched without waiting for their pages to load.
    async fn restore_browser(&self, app: &str, windows: &[Vec<String>]) -> Result<()> {
        if windows.iter().all(Vec::is_empty) {
            debug!(app, "restore.browser_without_tabs");
            return Ok(());
        }

        self.control.execute(&scripts::close_all_windows(app)).await;
        settle(self.timings.browser_close_settle).await;

        let mut attempted = 0usize;
        let mut failed = 0usize;
        for tabs in windows {
            let Some(script) = scripts::open_browser_window(app, tabs, attempted == 0) else {
                continue;
            };
            attempted += 1;
            if let Err(err) = self.control.run(&script).await {
                warn!(app, window = attempted, error = %err, "restore.browser_window_failed");
                failed += 1;
            }
            settle(self.timings.browser_window_settle).await;
        }

        if failed > 0 {
            return Err(WorksnapError::InterpreterError(format!(
                "{failed} of {attempted} browser windows could not be opened"
            )));
        }
        Ok(())
    }

    async fn restore_document_editor(
        &self,
        app: &str,
        documents: &[DocumentRef],
        report: &mut RestoreReport,
    ) -> Result<()> {
        self.control.execute(&scripts::ensure_launched(app)).await;
        settle(self.timings.editor_launch_settle).await;
        self.activate(app, self.timings.editor_ready_settle).await?;

        for document in documents {
            match self.restore_document(app, document).await {
                DocumentOutcome::Opened => report.documents_opened += 1,
                DocumentOutcome::Skipped => report.documents_skipped += 1,
                DocumentOutcome::Failed => report.documents_failed += 1,
            }
        }
        Ok(())
    }

    /// Reopen one document unless it is unresolvable, gone, or already open.
    pub async fn restore_document(&self, app: &str, document: &DocumentRef) -> DocumentOutcome {
        if document.path.is_empty() {
            debug!(app, document = %document.name, "restore.document_without_path");
            return DocumentOutcome::Skipped;
        }

        let posix = self.control.execute(&scripts::posix_path(&document.path)).await;
        if posix.is_empty() {
            warn!(app, path = %document.path, "restore.document_path_unresolved");
            return DocumentOutcome::Skipped;
        }

        let path = Path::new(&posix);
        if !self.locator.exists(path) {
            warn!(app, path = %posix, "restore.document_missing");
            return DocumentOutcome::Skipped;
        }

        let open_names =
            decode_list(&self.control.execute(&scripts::open_document_names(app)).await);
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or(&document.name);
        if open_names.iter().any(|open| open == file_name || *open == document.name) {
            debug!(app, path = %posix, "restore.document_already_open");
            return DocumentOutcome::Skipped;
        }

        let outcome = match self.control.run(&scripts::open_document(app, &posix)).await {
            Ok(_) => {
                info!(app, path = %posix, "restore.document_opened");
                DocumentOutcome::Opened
            }
            Err(err) => {
                warn!(app, path = %posix, error = %err, "restore.document_open_failed");
                DocumentOutcome::Failed
            }
        };
        settle(self.timings.document_open_settle).await;
        outcome
    }

    async fn restore_bible_software(&self, app: &str, layout: &str) -> Result<()> {
        self.activate(app, self.timings.bible_load_settle).await?;
        if !layout.is_empty() {
            // The menu may have changed or the layout may already be active.
            self.control.execute(&scripts::invoke_layout(app, layout)).await;
        }
        Ok(())
    }

    /// Reapply geometry to windows `1..=min(recorded, live)` by position.
    ///
    /// Windows are matched purely by index; if the live order differs from
    /// capture order, geometry lands on a different window.
    async fn restore_geometry(
        &self,
        app: &str,
        positions: &[WindowRect],
        report: &mut RestoreReport,
    ) {
        settle(self.timings.per_app_geometry_settle).await;

        let live = self.probe.live_window_count(app).await;
        let applicable = positions.len().min(live);
        let dropped = positions.len() - applicable;
        report.windows_skipped += dropped;
        info!(app, live, recorded = positions.len(), applicable, "restore.geometry");

        let settle_secs = self.timings.position_size_settle.as_secs_f64();
        for (offset, rect) in positions.iter().take(applicable).enumerate() {
            let index = offset + 1;
            let script = scripts::apply_window_geometry(app, index, rect, settle_secs);
            match self.control.run(&script).await {
                Ok(output) if output.starts_with(ERROR_TAG) => {
                    warn!(app, window = index, output = %output, "restore.window_failed");
                    report.windows_failed += 1;
                }
                Ok(_) => {
                    debug!(
                        app,
                        window = index,
                        x = rect.x,
                        y = rect.y,
                        "restore.window_positioned"
                    );
                    report.windows_positioned += 1;
                }
                Err(err) => {
                    warn!(app, window = index, error = %err, "restore.window_failed");
                    report.windows_failed += 1;
                }
            }
            settle(self.timings.between_windows_settle).await;
        }
    }
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
