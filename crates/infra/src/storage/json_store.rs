//! JSON file snapshot store
//!
//! One pretty-printed `<name>.json` document per workspace inside a single
//! directory. Writes go to a sibling temp file first and are renamed into
//! place, so a reader never sees a half-written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use worksnap_core::SnapshotRepository;
use worksnap_domain::constants::SNAPSHOT_EXTENSION;
use worksnap_domain::utils::serde::created_timestamp;
use worksnap_domain::{
    validate_snapshot_name, Result as DomainResult, WorksnapError, WorkspaceSnapshot,
    WorkspaceSummary,
};

use crate::platform::error_helpers::map_storage_io_error;

const UNKNOWN_APP: &str = "Unknown";

/// Listing view of a stored document.
///
/// Only the summary fields are read, and each may be missing: the name
/// falls back to the file stem and an unreadable timestamp to `None`.
#[derive(Deserialize)]
struct StoredSummary {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    apps: Vec<StoredApp>,
}

#[derive(Deserialize)]
struct StoredApp {
    #[serde(default)]
    app: Option<String>,
}

impl StoredSummary {
    fn into_summary(self, stem: &str) -> WorkspaceSummary {
        let apps: Vec<String> = self
            .apps
            .into_iter()
            .map(|entry| entry.app.unwrap_or_else(|| UNKNOWN_APP.to_string()))
            .collect();
        WorkspaceSummary {
            name: self.name.unwrap_or_else(|| stem.to_string()),
            created: self.created.as_deref().and_then(created_timestamp::parse),
            app_count: apps.len(),
            apps,
        }
    }
}

/// Directory-backed [`SnapshotRepository`].
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    directory: PathBuf,
}

impl JsonSnapshotStore {
    /// Store rooted at `directory`; it is created on first save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// Path of the document for `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{SNAPSHOT_EXTENSION}"))
    }

    /// Read and decode one document.
    ///
    /// Bytes that are not valid UTF-8 JSON of the expected shape are a
    /// `CorruptDocument`; only filesystem failures map to IO errors.
    async fn read_document<T: DeserializeOwned>(path: &Path, label: &str) -> DomainResult<T> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| map_storage_io_error(&format!("workspace '{label}'"), e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| WorksnapError::CorruptDocument(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl SnapshotRepository for JsonSnapshotStore {
    async fn save(&self, snapshot: &WorkspaceSnapshot) -> DomainResult<()> {
        validate_snapshot_name(&snapshot.name)?;
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| map_storage_io_error("create workspace directory", e))?;

        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| WorksnapError::Internal(format!("serialize workspace: {e}")))?;

        let path = self.path_for(&snapshot.name);
        let staging = path.with_extension(format!("{SNAPSHOT_EXTENSION}.tmp"));
        tokio::fs::write(&staging, contents)
            .await
            .map_err(|e| map_storage_io_error("write workspace", e))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| map_storage_io_error("replace workspace", e))?;

        info!(workspace = %snapshot.name, path = %path.display(), "storage.saved");
        Ok(())
    }

    async fn load(&self, name: &str) -> DomainResult<WorkspaceSnapshot> {
        validate_snapshot_name(name)?;
        let snapshot: WorkspaceSnapshot = Self::read_document(&self.path_for(name), name).await?;
        debug!(workspace = name, apps = snapshot.apps.len(), "storage.loaded");
        Ok(snapshot)
    }

    /// Summaries of every readable document, newest first.
    ///
    /// Documents without a readable timestamp sort last. Unreadable or
    /// corrupt documents are logged and skipped.
    async fn list(&self) -> DomainResult<Vec<WorkspaceSummary>> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_storage_io_error("list workspaces", e)),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| map_storage_io_error("list workspaces", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
            match Self::read_document::<StoredSummary>(&path, &stem).await {
                Ok(stored) => summaries.push(stored.into_summary(&stem)),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    kind = err.label(),
                    "storage.skipped_document"
                ),
            }
        }

        summaries.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(summaries)
    }

    async fn delete(&self, name: &str) -> DomainResult<()> {
        validate_snapshot_name(name)?;
        tokio::fs::remove_file(self.path_for(name))
            .await
            .map_err(|e| map_storage_io_error(&format!("workspace '{name}'"), e))?;
        info!(workspace = name, "storage.deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;
    use worksnap_domain::{AppSnapshot, WindowRect};

    use super::*;

    fn snapshot(name: &str, hour: u32) -> WorkspaceSnapshot {
        let mut snapshot = WorkspaceSnapshot::new(
            name,
            vec![AppSnapshot::Generic {
                app: "Notes".into(),
                window_positions: vec![WindowRect::new(0, 25, 800, 600)],
            }],
        );
        snapshot.created = Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap();
        snapshot
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_loads_back() {
        let temp = tempdir().unwrap();
        let store = JsonSnapshotStore::new(temp.path().join("saved_workspaces"));

        store.save(&snapshot("Work", 9)).await.unwrap();

        assert!(store.path_for("Work").is_file());
        assert_eq!(store.load("Work").await.unwrap(), snapshot("Work", 9));
    }

    #[tokio::test]
    async fn test_save_overwrites_and_leaves_no_staging_file() {
        let temp = tempdir().unwrap();
        let store = JsonSnapshotStore::new(temp.path());

        store.save(&snapshot("Work", 9)).await.unwrap();
        store.save(&snapshot("Work", 10)).await.unwrap();

        assert_eq!(store.load("Work").await.unwrap().created, snapshot("Work", 10).created);
        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["Work.json".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let temp = tempdir().unwrap();
        let store = JsonSnapshotStore::new(temp.path());

        assert!(matches!(store.load("Nope").await, Err(WorksnapError::NotFound(_))));
        assert!(matches!(store.delete("Nope").await, Err(WorksnapError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_corrupt_document_load_fails() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("Broken.json"), "{ not json").unwrap();
        let store = JsonSnapshotStore::new(temp.path());

        assert!(matches!(store.load("Broken").await, Err(WorksnapError::CorruptDocument(_))));
    }

    #[tokio::test]
    async fn test_non_utf8_document_is_corrupt() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("Work.json"), [0xff, 0xfe, 0x7b]).unwrap();
        let store = JsonSnapshotStore::new(temp.path());

        assert!(matches!(store.load("Work").await, Err(WorksnapError::CorruptDocument(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_falls_back_for_missing_name_and_timestamp() {
        let temp = tempdir().unwrap();
        let store = JsonSnapshotStore::new(temp.path());
        store.save(&snapshot("Work", 9)).await.unwrap();
        std::fs::write(temp.path().join("Legacy.json"), r#"{"apps": [{"app": "Safari"}, {}]}"#)
            .unwrap();
        std::fs::write(temp.path().join("Odd.json"), r#"{"name": "Odd", "created": "yesterday"}"#)
            .unwrap();

        let summaries = store.list().await.unwrap();

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].name, "Work");
        assert_eq!(summaries[0].created, Some(snapshot("Work", 9).created));
        let legacy = summaries.iter().find(|s| s.name == "Legacy").unwrap();
        assert_eq!(legacy.created, None);
        assert_eq!(legacy.app_count, 2);
        assert_eq!(legacy.apps, vec!["Safari".to_string(), "Unknown".to_string()]);
        let odd = summaries.iter().find(|s| s.name == "Odd").unwrap();
        assert_eq!(odd.created, None);
        assert_eq!(odd.app_count, 0);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let temp = tempdir().unwrap();
        let store = JsonSnapshotStore::new(temp.path().join("absent"));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_names_that_escape_directory_are_rejected() {
        let temp = tempdir().unwrap();
        let store = JsonSnapshotStore::new(temp.path());

        assert!(matches!(store.load("../etc").await, Err(WorksnapError::InvalidInput(_))));
        assert!(matches!(
            store.save(&snapshot("a/b", 1)).await,
            Err(WorksnapError::InvalidInput(_))
        ));
    }
}
