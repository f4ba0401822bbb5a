//! Domain types and models

pub mod report;
pub mod snapshot;

pub use report::RestoreReport;
pub use snapshot::{
    validate_snapshot_name, AppKind, AppSnapshot, DocumentRef, WindowRect, WorkspaceSnapshot,
    WorkspaceSummary,
};
