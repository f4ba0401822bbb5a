//! Engine wiring
//!
//! Builds a [`WorkspaceEngine`] from [`Config`] using the infrastructure
//! adapters in this crate.

use std::sync::Arc;

use tracing::info;
use worksnap_core::{ControlPlane, WorkspaceEngine};
use worksnap_domain::Config;

use crate::platform::{LocalDocumentLocator, OsascriptControlPlane};
use crate::storage::JsonSnapshotStore;

/// Engine driving the configured interpreter and storing snapshots as JSON.
pub fn build_engine(config: &Config) -> WorkspaceEngine {
    let control = Arc::new(OsascriptControlPlane::from_config(&config.interpreter));
    build_engine_with(control, config)
}

/// Engine with a caller-supplied control plane.
pub fn build_engine_with(control: Arc<dyn ControlPlane>, config: &Config) -> WorkspaceEngine {
    info!(
        directory = %config.storage.directory,
        interpreter = %config.interpreter.program,
        timeout_secs = config.interpreter.timeout_seconds,
        "bootstrap.engine"
    );
    WorkspaceEngine::new(
        control,
        Arc::new(JsonSnapshotStore::new(&config.storage.directory)),
        Arc::new(LocalDocumentLocator),
        config.apps.clone(),
        config.timings.clone(),
    )
}
