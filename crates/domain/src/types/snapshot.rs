//! Workspace snapshot documents
//!
//! A [`WorkspaceSnapshot`] is the persisted record of one captured desktop
//! session. Each running application contributes one [`AppSnapshot`], a
//! closed tagged variant keyed by `type` in the stored document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::serde::created_timestamp;
use crate::{Result, WorksnapError};

/// Application category of an [`AppSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    Generic,
    Browser,
    DocumentEditor,
    BibleSoftware,
    ReferenceManager,
}

crate::impl_domain_tag_conversions!(AppKind {
    Generic => "generic",
    Browser => "browser",
    DocumentEditor => "document_editor",
    BibleSoftware => "bible_software",
    ReferenceManager => "reference_manager",
});

/// Geometry of one window, in screen points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// A saved document open in a document editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub name: String,
    /// Full path as reported by the editor; empty when it could not be resolved.
    #[serde(default)]
    pub path: String,
}

/// Per-application fragment of a workspace snapshot.
///
/// Documents with an unknown or missing `type` load as [`AppSnapshot::Generic`]
/// so older files stay restorable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "RawAppSnapshot")]
pub enum AppSnapshot {
    Generic {
        app: String,
        window_positions: Vec<WindowRect>,
    },
    Browser {
        app: String,
        /// Windows in capture order, each holding tab URLs left to right.
        windows: Vec<Vec<String>>,
        window_positions: Vec<WindowRect>,
    },
    DocumentEditor {
        app: String,
        documents: Vec<DocumentRef>,
        window_positions: Vec<WindowRect>,
    },
    BibleSoftware {
        app: String,
        current_layout: String,
        window_positions: Vec<WindowRect>,
    },
    ReferenceManager {
        app: String,
        window_positions: Vec<WindowRect>,
    },
}

impl AppSnapshot {
    /// Process name of the captured application.
    pub fn app(&self) -> &str {
        match self {
            Self::Generic { app, .. }
            | Self::Browser { app, .. }
            | Self::DocumentEditor { app, .. }
            | Self::BibleSoftware { app, .. }
            | Self::ReferenceManager { app, .. } => app,
        }
    }

    pub fn kind(&self) -> AppKind {
        match self {
            Self::Generic { .. } => AppKind::Generic,
            Self::Browser { .. } => AppKind::Browser,
            Self::DocumentEditor { .. } => AppKind::DocumentEditor,
            Self::BibleSoftware { .. } => AppKind::BibleSoftware,
            Self::ReferenceManager { .. } => AppKind::ReferenceManager,
        }
    }

    /// Window geometry in probe order.
    pub fn window_positions(&self) -> &[WindowRect] {
        match self {
            Self::Generic { window_positions, .. }
            | Self::Browser { window_positions, .. }
            | Self::DocumentEditor { window_positions, .. }
            | Self::BibleSoftware { window_positions, .. }
            | Self::ReferenceManager { window_positions, .. } => window_positions,
        }
    }
}

/// Lenient wire shape used when reading stored documents.
#[derive(Deserialize)]
struct RawAppSnapshot {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    app: String,
    #[serde(default)]
    window_positions: Vec<WindowRect>,
    #[serde(default)]
    windows: Vec<Vec<String>>,
    #[serde(default)]
    documents: Vec<DocumentRef>,
    #[serde(default)]
    current_layout: Option<String>,
}

impl From<RawAppSnapshot> for AppSnapshot {
    fn from(raw: RawAppSnapshot) -> Self {
        let kind = raw.kind.as_deref().and_then(|k| k.parse().ok()).unwrap_or(AppKind::Generic);
        let RawAppSnapshot { app, window_positions, windows, documents, current_layout, .. } = raw;

        match kind {
            AppKind::Generic => Self::Generic { app, window_positions },
            AppKind::Browser => Self::Browser { app, windows, window_positions },
            AppKind::DocumentEditor => Self::DocumentEditor { app, documents, window_positions },
            AppKind::BibleSoftware => Self::BibleSoftware {
                app,
                current_layout: current_layout.unwrap_or_default(),
                window_positions,
            },
            AppKind::ReferenceManager => Self::ReferenceManager { app, window_positions },
        }
    }
}

/// A named, persisted capture of a desktop session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub name: String,
    #[serde(with = "created_timestamp")]
    pub created: DateTime<Utc>,
    /// Capture order; restore sequencing does not depend on it.
    #[serde(default)]
    pub apps: Vec<AppSnapshot>,
}

impl WorkspaceSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(name: impl Into<String>, apps: Vec<AppSnapshot>) -> Self {
        Self { name: name.into(), created: Utc::now(), apps }
    }

    pub fn summary(&self) -> WorkspaceSummary {
        WorkspaceSummary {
            name: self.name.clone(),
            created: Some(self.created),
            app_count: self.apps.len(),
            apps: self.apps.iter().map(|a| a.app().to_string()).collect(),
        }
    }
}

/// Listing entry for a stored snapshot.
///
/// `created` is `None` when the stored timestamp is missing or unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub app_count: usize,
    pub apps: Vec<String>,
}

/// Check that `name` can key a stored snapshot.
///
/// The name doubles as the file stem, so it must be non-empty and must not
/// contain path separators or be a relative path component.
pub fn validate_snapshot_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WorksnapError::InvalidInput("workspace name is required".to_string()));
    }
    if trimmed != name {
        return Err(WorksnapError::InvalidInput(format!(
            "workspace name has leading or trailing whitespace: {name:?}"
        )));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(WorksnapError::InvalidInput(format!("invalid workspace name: {name:?}")));
    }
    Ok(())
}
