//! Platform adapters
//!
//! The interpreter adapter is not gated on `target_os`: the program and its
//! arguments come from configuration, so any host with a compatible
//! interpreter (or a shell, in tests) can drive it.

pub mod applescript;
pub mod documents;
pub(crate) mod error_helpers;

pub use applescript::{execute_script, OsascriptControlPlane};
pub use documents::LocalDocumentLocator;
