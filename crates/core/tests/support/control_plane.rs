//! Scripted `ControlPlane` fake
//!
//! Answers each script with the first rule whose needles all occur in the
//! script text, and records every script in call order.

use std::sync::Mutex;

use async_trait::async_trait;
use worksnap_core::ControlPlane;
use worksnap_domain::{Result as DomainResult, WorksnapError};

struct Rule {
    needles: Vec<String>,
    response: DomainResult<String>,
}

/// In-memory stand-in for the automation interpreter.
#[derive(Default)]
pub struct ScriptedControlPlane {
    rules: Vec<Rule>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer scripts containing every needle with `output`.
    pub fn on(mut self, needles: &[&str], output: &str) -> Self {
        self.rules.push(Rule {
            needles: needles.iter().map(|n| (*n).to_string()).collect(),
            response: Ok(output.to_string()),
        });
        self
    }

    /// Fail scripts containing every needle with `error`.
    pub fn fail(mut self, needles: &[&str], error: WorksnapError) -> Self {
        self.rules.push(Rule {
            needles: needles.iter().map(|n| (*n).to_string()).collect(),
            response: Err(error),
        });
        self
    }

    /// Visible process list rendering.
    pub fn with_running(self, apps: &[&str]) -> Self {
        let rendered = apps.join(", ");
        self.on(&["whose visible is true"], &rendered)
    }

    /// Window count for `app`.
    pub fn with_window_count(self, app: &str, count: usize) -> Self {
        let process = format!("tell process \"{app}\"");
        self.on(&[&process, "count of windows"], &count.to_string())
    }

    /// Geometry tuple for window `index` of `app`.
    pub fn with_window(self, app: &str, index: usize, tuple: &str) -> Self {
        let process = format!("tell process \"{app}\"");
        let window = format!("position of window {index}\n");
        self.on(&[&process, &window], tuple)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    /// Recorded scripts containing every needle.
    pub fn calls_matching(&self, needles: &[&str]) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|script| needles.iter().all(|n| script.contains(n)))
            .collect()
    }

    /// Position of the first recorded script containing every needle.
    pub fn first_index_of(&self, needles: &[&str]) -> Option<usize> {
        self.calls().iter().position(|script| needles.iter().all(|n| script.contains(n)))
    }
}

#[async_trait]
impl ControlPlane for ScriptedControlPlane {
    async fn run(&self, script: &str) -> DomainResult<String> {
        self.calls.lock().expect("calls mutex poisoned").push(script.to_string());
        self.rules
            .iter()
            .find(|rule| rule.needles.iter().all(|n| script.contains(n.as_str())))
            .map_or_else(|| Ok(String::new()), |rule| rule.response.clone())
    }
}
