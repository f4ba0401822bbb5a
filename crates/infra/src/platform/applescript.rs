//! Interpreter execution with timeout handling.
//!
//! Runs one script per child process (`osascript -e <script>` by default)
//! and returns its trimmed stdout. Timeouts use the `wait-timeout` crate;
//! stdout and stderr are drained on reader threads so a large result cannot
//! fill the pipe and stall the child.
//!
//! # Example
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use worksnap_infra::platform::applescript::execute_script;
//!
//! fn main() -> worksnap_domain::Result<()> {
//!     let args = vec!["-e".to_string()];
//!     let name = execute_script(
//!         "osascript",
//!         &args,
//!         r#"tell application "Finder" to get name"#,
//!         Duration::from_secs(2),
//!     )?;
//!     println!("{name}");
//!     Ok(())
//! }
//! ```

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use async_trait::async_trait;
use wait_timeout::ChildExt;
use worksnap_core::ControlPlane;
use worksnap_domain::{InterpreterConfig, Result as DomainResult, WorksnapError};

use super::error_helpers::{map_join_error, map_process_io_error};

/// Execute one script with a timeout.
///
/// The command line is `program args... script`.
///
/// # Errors
/// - `InterpreterTimeout` if the child outlives `timeout` (it is killed)
/// - `InterpreterError` if the child cannot be spawned, exits non-zero, is
///   killed by a signal, or prints non-UTF-8 output
pub fn execute_script(
    program: &str,
    args: &[String],
    script: &str,
    timeout: Duration,
) -> DomainResult<String> {
    tracing::debug!(
        program,
        script_preview = %script.chars().take(100).collect::<String>(),
        timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        "interpreter.execute"
    );

    let mut child = Command::new(program)
        .args(args)
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| map_process_io_error("interpreter spawn", e))?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            tracing::warn!(
                program,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "interpreter.timeout"
            );
            let _ = child.kill();
            let _ = child.wait();
            // Reader threads are left detached; a grandchild may still hold the pipes.
            return Err(WorksnapError::InterpreterTimeout(format!(
                "{program} did not finish within {}ms",
                timeout.as_millis()
            )));
        }
        Err(e) => {
            tracing::error!(program, error = %e, "interpreter.wait_failed");
            let _ = child.kill();
            return Err(map_process_io_error("interpreter wait", e));
        }
    };

    let stdout = collect(stdout)?;
    let stderr = String::from_utf8_lossy(&collect(stderr)?).trim().to_string();

    if !status.success() {
        let code = status.code().map_or_else(|| "signal".to_string(), |c| c.to_string());
        tracing::warn!(program, exit_code = %code, stderr = %stderr, "interpreter.failed");
        return Err(WorksnapError::InterpreterError(format!(
            "{program} exited with {code}: {stderr}"
        )));
    }
    if !stderr.is_empty() {
        tracing::warn!(program, stderr = %stderr, "interpreter.stderr");
    }

    let stdout = String::from_utf8(stdout).map_err(|e| {
        tracing::warn!(program, error = %e, "interpreter.invalid_utf8");
        WorksnapError::InterpreterError(format!("interpreter output is not valid UTF-8: {e}"))
    })?;

    let result = stdout.trim().to_string();
    tracing::trace!(output_len = result.len(), "interpreter.completed");
    Ok(result)
}

type PipeReader = JoinHandle<std::io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<PipeReader> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            pipe.read_to_end(&mut buffer)?;
            Ok(buffer)
        })
    })
}

fn collect(reader: Option<PipeReader>) -> DomainResult<Vec<u8>> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    handle
        .join()
        .map_err(|_| WorksnapError::Internal("interpreter output reader panicked".into()))?
        .map_err(|e| map_process_io_error("interpreter output", e))
}

/// [`ControlPlane`] backed by a child-process interpreter.
///
/// Every call spawns a fresh process on the blocking pool; calls share no
/// state.
#[derive(Debug, Clone)]
pub struct OsascriptControlPlane {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl OsascriptControlPlane {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self { program: program.into(), args, timeout }
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for OsascriptControlPlane {
    fn default() -> Self {
        Self::from_config(&InterpreterConfig::default())
    }
}

#[async_trait]
impl ControlPlane for OsascriptControlPlane {
    async fn run(&self, script: &str) -> DomainResult<String> {
        let program = self.program.clone();
        let args = self.args.clone();
        let script = script.to_string();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || execute_script(&program, &args, &script, timeout))
            .await
            .map_err(map_join_error)?
    }
}
