//! Error mapping helpers for process and filesystem operations
//!
//! - `tokio::task::JoinError` → `WorksnapError::Internal`
//! - Interpreter process IO errors → `WorksnapError::InterpreterError`
//! - Snapshot file IO errors → `WorksnapError::Storage` (or `NotFound`)

use std::io::ErrorKind;

use worksnap_domain::WorksnapError;

/// Map a `tokio::task::JoinError` from `spawn_blocking`.
#[inline]
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> WorksnapError {
    if err.is_cancelled() {
        WorksnapError::Internal("interpreter task cancelled".into())
    } else {
        WorksnapError::Internal(format!("interpreter task panicked: {err}"))
    }
}

/// Map an IO error raised while driving the interpreter process.
///
/// ```rust,ignore
/// Command::new(program)
///     .spawn()
///     .map_err(|e| map_process_io_error("interpreter spawn", e))?;
/// ```
#[inline]
pub(crate) fn map_process_io_error(operation: &str, err: std::io::Error) -> WorksnapError {
    WorksnapError::InterpreterError(format!("{operation} failed: {err}"))
}

/// Map an IO error raised while touching snapshot storage.
#[inline]
pub(crate) fn map_storage_io_error(operation: &str, err: std::io::Error) -> WorksnapError {
    if err.kind() == ErrorKind::NotFound {
        WorksnapError::NotFound(operation.to_string())
    } else {
        WorksnapError::Storage(format!("{operation} failed: {err}"))
    }
}
