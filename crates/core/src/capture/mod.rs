//! Workspace capture
//!
//! The running-process list is queried once per capture and passed to every
//! capturer, so all of them see the same view of the desktop.

pub mod capturers;
pub mod service;

pub use capturers::AppCapturer;
pub use service::CaptureService;

/// Names of the visible processes at the start of a capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningProcesses(Vec<String>);

impl RunningProcesses {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn contains(&self, app: &str) -> bool {
        self.0.iter().any(|name| name == app)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
