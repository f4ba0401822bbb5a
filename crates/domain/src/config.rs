//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BIBLE_SOFTWARE, DEFAULT_BROWSER, DEFAULT_DOCUMENT_EDITOR, DEFAULT_EXCLUDED_PROCESSES,
    DEFAULT_INTERPRETER_PROGRAM, DEFAULT_INTERPRETER_TIMEOUT_SECS, DEFAULT_REFERENCE_MANAGER,
    DEFAULT_WORKSPACE_DIR,
};
use crate::types::AppKind;
use crate::utils::serde::duration_millis;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub interpreter: InterpreterConfig,
    pub apps: AppCatalog,
    pub timings: RestoreTimings,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<name>.json` document per workspace.
    pub directory: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { directory: DEFAULT_WORKSPACE_DIR.to_string() }
    }
}

/// Automation interpreter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    pub program: String,
    /// Arguments placed before the script text.
    pub args: Vec<String>,
    pub timeout_seconds: u64,
}

impl InterpreterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_INTERPRETER_PROGRAM.to_string(),
            args: vec!["-e".to_string()],
            timeout_seconds: DEFAULT_INTERPRETER_TIMEOUT_SECS,
        }
    }
}

/// Process names bound to the dedicated capturers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCatalog {
    pub browser: String,
    pub document_editor: String,
    pub bible_software: String,
    pub reference_manager: String,
    /// Processes never captured generically.
    pub excluded: Vec<String>,
}

impl AppCatalog {
    /// Dedicated capturers in capture order.
    pub fn dedicated(&self) -> [(AppKind, &str); 4] {
        [
            (AppKind::Browser, self.browser.as_str()),
            (AppKind::DocumentEditor, self.document_editor.as_str()),
            (AppKind::BibleSoftware, self.bible_software.as_str()),
            (AppKind::ReferenceManager, self.reference_manager.as_str()),
        ]
    }

    /// Whether `process` has a dedicated capturer.
    pub fn is_dedicated(&self, process: &str) -> bool {
        self.dedicated().iter().any(|(_, name)| *name == process)
    }

    pub fn is_excluded(&self, process: &str) -> bool {
        self.excluded.iter().any(|name| name == process)
    }
}

impl Default for AppCatalog {
    fn default() -> Self {
        Self {
            browser: DEFAULT_BROWSER.to_string(),
            document_editor: DEFAULT_DOCUMENT_EDITOR.to_string(),
            bible_software: DEFAULT_BIBLE_SOFTWARE.to_string(),
            reference_manager: DEFAULT_REFERENCE_MANAGER.to_string(),
            excluded: DEFAULT_EXCLUDED_PROCESSES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Settle delays inserted during restore, stored as milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreTimings {
    #[serde(with = "duration_millis")]
    pub browser_close_settle: Duration,
    #[serde(with = "duration_millis")]
    pub browser_window_settle: Duration,
    #[serde(with = "duration_millis")]
    pub editor_launch_settle: Duration,
    #[serde(with = "duration_millis")]
    pub editor_ready_settle: Duration,
    #[serde(with = "duration_millis")]
    pub document_open_settle: Duration,
    #[serde(with = "duration_millis")]
    pub bible_load_settle: Duration,
    #[serde(with = "duration_millis")]
    pub reference_activate_settle: Duration,
    #[serde(with = "duration_millis")]
    pub generic_activate_settle: Duration,
    /// Pause between the content phase and the geometry phase.
    #[serde(with = "duration_millis")]
    pub geometry_settle: Duration,
    #[serde(with = "duration_millis")]
    pub per_app_geometry_settle: Duration,
    /// Pause between setting a window's position and its size.
    #[serde(with = "duration_millis")]
    pub position_size_settle: Duration,
    #[serde(with = "duration_millis")]
    pub between_windows_settle: Duration,
}

impl RestoreTimings {
    /// Zero every delay.
    pub fn immediate() -> Self {
        Self {
            browser_close_settle: Duration::ZERO,
            browser_window_settle: Duration::ZERO,
            editor_launch_settle: Duration::ZERO,
            editor_ready_settle: Duration::ZERO,
            document_open_settle: Duration::ZERO,
            bible_load_settle: Duration::ZERO,
            reference_activate_settle: Duration::ZERO,
            generic_activate_settle: Duration::ZERO,
            geometry_settle: Duration::ZERO,
            per_app_geometry_settle: Duration::ZERO,
            position_size_settle: Duration::ZERO,
            between_windows_settle: Duration::ZERO,
        }
    }
}

impl Default for RestoreTimings {
    fn default() -> Self {
        Self {
            browser_close_settle: Duration::from_millis(1000),
            browser_window_settle: Duration::from_millis(2000),
            editor_launch_settle: Duration::from_millis(2000),
            editor_ready_settle: Duration::from_millis(5000),
            document_open_settle: Duration::from_millis(1000),
            bible_load_settle: Duration::from_millis(3000),
            reference_activate_settle: Duration::from_millis(2000),
            generic_activate_settle: Duration::from_millis(1000),
            geometry_settle: Duration::from_millis(3000),
            per_app_geometry_settle: Duration::from_millis(2000),
            position_size_settle: Duration::from_millis(100),
            between_windows_settle: Duration::from_millis(300),
        }
    }
}
