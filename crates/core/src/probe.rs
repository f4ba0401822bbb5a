//! Window geometry probe
//!
//! Enumerates an application's windows through the control plane and
//! measures each one independently.

use std::sync::Arc;

use tracing::{debug, warn};
use worksnap_domain::WindowRect;

use crate::codec::{parse_count, parse_window_tuple};
use crate::ports::ControlPlane;
use crate::scripts;

/// Measures window geometry for running applications.
#[derive(Clone)]
pub struct WindowProbe {
    control: Arc<dyn ControlPlane>,
}

impl WindowProbe {
    pub fn new(control: Arc<dyn ControlPlane>) -> Self {
        Self { control }
    }

    /// Number of windows the app has right now; `0` when the count is
    /// unavailable or unparsable.
    pub async fn live_window_count(&self, app: &str) -> usize {
        let raw = self.control.execute(&scripts::window_count(app)).await;
        match parse_count(&raw) {
            Ok(count) => count,
            Err(err) => {
                debug!(app, raw = %raw, error = %err, "probe.window_count_unparsable");
                0
            }
        }
    }

    /// Geometry of each window in index order (1..=count).
    ///
    /// A window whose query fails or returns a malformed tuple is skipped;
    /// the remaining windows are still probed. The result is never padded.
    pub async fn probe_windows(&self, app: &str) -> Vec<WindowRect> {
        let count = self.live_window_count(app).await;
        debug!(app, count, "probe.window_count");

        let mut positions = Vec::with_capacity(count);
        for index in 1..=count {
            let raw = self.control.execute(&scripts::window_geometry(app, index)).await;
            match parse_window_tuple(&raw) {
                Ok(rect) => positions.push(rect),
                Err(err) => {
                    warn!(app, window = index, error = %err, "probe.window_skipped");
                }
            }
        }

        debug!(app, captured = positions.len(), "probe.complete");
        positions
    }
}
