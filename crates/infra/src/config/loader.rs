//! Configuration loader
//!
//! Loads engine configuration from a file, then applies environment
//! overrides.
//!
//! ## Loading Strategy
//! 1. Probes a fixed list of paths for a config file
//! 2. Falls back to built-in defaults when none exists
//! 3. Applies environment variable overrides on top
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `WORKSNAP_WORKSPACE_DIR`: Snapshot directory
//! - `WORKSNAP_INTERPRETER`: Interpreter program
//! - `WORKSNAP_INTERPRETER_TIMEOUT`: Per-call timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./worksnap.json` or `./worksnap.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use worksnap_domain::{Config, Result, WorksnapError};

pub const ENV_WORKSPACE_DIR: &str = "WORKSNAP_WORKSPACE_DIR";
pub const ENV_INTERPRETER: &str = "WORKSNAP_INTERPRETER";
pub const ENV_INTERPRETER_TIMEOUT: &str = "WORKSNAP_INTERPRETER_TIMEOUT";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["worksnap.json", "worksnap.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Uses the first probed config file, or defaults if there is none, then
/// applies environment overrides.
///
/// # Errors
/// Returns `WorksnapError::Config` if a probed file is invalid or an
/// override has an invalid value.
pub fn load() -> Result<Config> {
    let config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(config)
}

/// Apply `WORKSNAP_*` environment overrides to `config`
///
/// Unset variables leave the corresponding field untouched.
///
/// # Errors
/// Returns `WorksnapError::Config` if `WORKSNAP_INTERPRETER_TIMEOUT` is not a
/// positive integer.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(directory) = env_var(ENV_WORKSPACE_DIR) {
        config.storage.directory = directory;
    }
    if let Some(program) = env_var(ENV_INTERPRETER) {
        config.interpreter.program = program;
    }
    if let Some(raw) = env_var(ENV_INTERPRETER_TIMEOUT) {
        let seconds = raw.parse::<u64>().map_err(|e| {
            WorksnapError::Config(format!("Invalid interpreter timeout {raw:?}: {e}"))
        })?;
        if seconds == 0 {
            return Err(WorksnapError::Config("Interpreter timeout must be positive".to_string()));
        }
        config.interpreter.timeout_seconds = seconds;
    }
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations and errors when
/// nothing is found. Format is detected by file extension.
///
/// # Errors
/// Returns `WorksnapError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WorksnapError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WorksnapError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WorksnapError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, choosing the format by the
/// extension of `path`.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WorksnapError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WorksnapError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WorksnapError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Non-empty environment variable, if set.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
