//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Control plane
pub const DEFAULT_INTERPRETER_PROGRAM: &str = "osascript";
pub const DEFAULT_INTERPRETER_TIMEOUT_SECS: u64 = 30;

// Text protocol delimiters used to flatten nested interpreter results
pub const OUTER_DELIMITER: &str = "|||";
pub const INNER_DELIMITER: &str = ":::";
pub const TUPLE_DELIMITER: char = ',';
/// Prefix the probe scripts use to report a per-window failure.
pub const ERROR_TAG: &str = "ERROR:";
/// Marker the geometry scripts return on success.
pub const OK_TAG: &str = "OK";

// Default app catalog
pub const DEFAULT_BROWSER: &str = "Safari";
pub const DEFAULT_DOCUMENT_EDITOR: &str = "Microsoft Word";
pub const DEFAULT_BIBLE_SOFTWARE: &str = "Logos";
pub const DEFAULT_REFERENCE_MANAGER: &str = "Zotero";
pub const DEFAULT_EXCLUDED_PROCESSES: &[&str] = &["Finder", "System Events"];

// Bible software menu surface
pub const LAYOUTS_MENU: &str = "Layouts";

// Storage
pub const DEFAULT_WORKSPACE_DIR: &str = "saved_workspaces";
pub const SNAPSHOT_EXTENSION: &str = "json";
