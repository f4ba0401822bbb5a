//! Filesystem-backed document lookup

use std::path::Path;

use worksnap_core::DocumentLocator;

/// Checks document paths against the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDocumentLocator;

impl DocumentLocator for LocalDocumentLocator {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
