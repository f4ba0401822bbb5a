//! Per-category capturers
//!
//! Each capturer turns one running application's live state into its
//! [`AppSnapshot`] fragment. Sub-queries that fail or return malformed text
//! degrade to missing data; they never fail the capturer.

use std::sync::Arc;

use tracing::debug;
use worksnap_domain::constants::{INNER_DELIMITER, OUTER_DELIMITER};
use worksnap_domain::{AppKind, AppSnapshot, DocumentRef};

use super::RunningProcesses;
use crate::codec::{decode_records, decode_sequences};
use crate::ports::ControlPlane;
use crate::probe::WindowProbe;
use crate::scripts;

/// Dispatches capture to the normalizer for an app category.
#[derive(Clone)]
pub struct AppCapturer {
    control: Arc<dyn ControlPlane>,
    probe: WindowProbe,
}

impl AppCapturer {
    pub fn new(control: Arc<dyn ControlPlane>) -> Self {
        let probe = WindowProbe::new(control.clone());
        Self { control, probe }
    }

    /// Capture `app` as `kind`, or `None` when it is not running.
    ///
    /// Generic captures are also `None` when no window could be probed,
    /// since there is nothing to restore.
    pub async fn capture(
        &self,
        kind: AppKind,
        app: &str,
        running: &RunningProcesses,
    ) -> Option<AppSnapshot> {
        if !running.contains(app) {
            debug!(app, %kind, "capture.not_running");
            return None;
        }

        match kind {
            AppKind::Browser => Some(self.capture_browser(app).await),
            AppKind::DocumentEditor => Some(self.capture_document_editor(app).await),
            AppKind::BibleSoftware => Some(self.capture_bible_software(app).await),
            AppKind::ReferenceManager => Some(self.capture_reference_manager(app).await),
            AppKind::Generic => self.capture_generic(app).await,
        }
    }

    async fn capture_browser(&self, app: &str) -> AppSnapshot {
        let raw = self.control.execute(&scripts::browser_tabs(app)).await;
        let windows = decode_sequences(&raw, OUTER_DELIMITER, INNER_DELIMITER);
        debug!(app, windows = windows.len(), "capture.browser_tabs");

        AppSnapshot::Browser {
            app: app.to_string(),
            windows,
            window_positions: self.probe.probe_windows(app).await,
        }
    }

    async fn capture_document_editor(&self, app: &str) -> AppSnapshot {
        let raw = self.control.execute(&scripts::saved_documents(app)).await;
        let documents: Vec<DocumentRef> = decode_records(&raw, OUTER_DELIMITER, INNER_DELIMITER)
            .into_iter()
            .map(|mut fields| {
                let path = if fields.len() > 1 { fields.swap_remove(1) } else { String::new() };
                let name = fields.swap_remove(0);
                DocumentRef { name, path }
            })
            .collect();
        debug!(app, documents = documents.len(), "capture.saved_documents");

        AppSnapshot::DocumentEditor {
            app: app.to_string(),
            documents,
            window_positions: self.probe.probe_windows(app).await,
        }
    }

    async fn capture_bible_software(&self, app: &str) -> AppSnapshot {
        let current_layout = self.control.execute(&scripts::current_layout(app)).await;

        AppSnapshot::BibleSoftware {
            app: app.to_string(),
            current_layout,
            window_positions: self.probe.probe_windows(app).await,
        }
    }

    async fn capture_reference_manager(&self, app: &str) -> AppSnapshot {
        AppSnapshot::ReferenceManager {
            app: app.to_string(),
            window_positions: self.probe.probe_windows(app).await,
        }
    }

    async fn capture_generic(&self, app: &str) -> Option<AppSnapshot> {
        let window_positions = self.probe.probe_windows(app).await;
        if window_positions.is_empty() {
            debug!(app, "capture.generic_without_windows");
            return None;
        }
        Some(AppSnapshot::Generic { app: app.to_string(), window_positions })
    }
}
