//! In-memory adapters for the storage and filesystem ports
//!
//! Provides deterministic stand-ins so engine tests never touch disk.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use worksnap_core::{DocumentLocator, SnapshotRepository};
use worksnap_domain::{
    Result as DomainResult, WorksnapError, WorkspaceSnapshot, WorkspaceSummary,
};

/// In-memory mock for `SnapshotRepository`, keyed by snapshot name.
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    snapshots: Mutex<BTreeMap<String, WorkspaceSnapshot>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a stored snapshot.
    pub fn with_snapshot(self, snapshot: WorkspaceSnapshot) -> Self {
        self.snapshots
            .lock()
            .expect("repository mutex poisoned")
            .insert(snapshot.name.clone(), snapshot);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshots.lock().expect("repository mutex poisoned").contains_key(name)
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn save(&self, snapshot: &WorkspaceSnapshot) -> DomainResult<()> {
        self.snapshots
            .lock()
            .expect("repository mutex poisoned")
            .insert(snapshot.name.clone(), snapshot.clone());
        Ok(())
    }

    async fn load(&self, name: &str) -> DomainResult<WorkspaceSnapshot> {
        self.snapshots
            .lock()
            .expect("repository mutex poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| WorksnapError::NotFound(format!("workspace '{name}'")))
    }

    async fn list(&self) -> DomainResult<Vec<WorkspaceSummary>> {
        let mut summaries: Vec<WorkspaceSummary> = self
            .snapshots
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .map(WorkspaceSnapshot::summary)
            .collect();
        summaries.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(summaries)
    }

    async fn delete(&self, name: &str) -> DomainResult<()> {
        self.snapshots
            .lock()
            .expect("repository mutex poisoned")
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| WorksnapError::NotFound(format!("workspace '{name}'")))
    }
}

/// `DocumentLocator` backed by a fixed set of existing paths.
#[derive(Default)]
pub struct FakeDocumentLocator {
    existing: HashSet<PathBuf>,
}

impl FakeDocumentLocator {
    pub fn with_paths(paths: &[&str]) -> Self {
        Self { existing: paths.iter().map(PathBuf::from).collect() }
    }
}

impl DocumentLocator for FakeDocumentLocator {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }
}
