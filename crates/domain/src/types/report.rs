//! Restore outcome reporting

use serde::{Deserialize, Serialize};

/// Outcome of one restore invocation.
///
/// Restore is best-effort: failures are recorded here instead of aborting
/// the remaining steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreReport {
    pub workspace: String,
    /// Apps whose content/launch phase completed.
    pub apps_restored: Vec<String>,
    /// Apps whose content/launch phase failed, with the failure text.
    pub apps_failed: Vec<(String, String)>,
    pub windows_positioned: usize,
    pub windows_failed: usize,
    /// Recorded windows dropped because the live app had fewer windows.
    pub windows_skipped: usize,
    pub documents_opened: usize,
    /// Documents skipped because they were unresolvable, missing on disk or
    /// already open.
    pub documents_skipped: usize,
    pub documents_failed: usize,
}

impl RestoreReport {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self { workspace: workspace.into(), ..Self::default() }
    }

    /// Whether every attempted step succeeded.
    pub fn is_clean(&self) -> bool {
        self.apps_failed.is_empty() && self.windows_failed == 0 && self.documents_failed == 0
    }
}
