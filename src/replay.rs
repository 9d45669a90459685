//! Scripted input replay.
//!
//! An input script describes where the surface sits on the page and a list of
//! timestamped raw events. Replaying it through a pad reproduces a signing
//! session without a live host, which is how the command-line tool and the
//! integration tests drive the pad.
//!
//! ```json
//! {
//!   "surface": { "width": 198, "height": 55, "offset_left": 10, "offset_top": 20 },
//!   "events": [
//!     { "at_ms": 0,  "input": { "family": "mouse", "phase": "down", "page_x": 20, "page_y": 30 } },
//!     { "at_ms": 16, "input": { "family": "mouse", "phase": "move", "page_x": 40, "page_y": 35 } },
//!     { "at_ms": 32, "input": { "family": "mouse", "phase": "up",   "page_x": 40, "page_y": 35 } }
//!   ]
//! }
//! ```

use crate::input::{Offset, RawInput, SessionEnd, StaticGeometry};
use crate::pad::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SignaturePad};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("invalid input script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event {index} is earlier than the event before it")]
    OutOfOrder { index: usize },
}

/// Placement and size of the surface the script was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default)]
    pub offset_left: f64,
    #[serde(default)]
    pub offset_top: f64,
    #[serde(default)]
    pub scroll_left: f64,
    #[serde(default)]
    pub scroll_top: f64,
    /// Reproduce hosts that misreport the offset while zoomed
    #[serde(default)]
    pub zoom_drift: bool,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            offset_left: 0.0,
            offset_top: 0.0,
            scroll_left: 0.0,
            scroll_top: 0.0,
            zoom_drift: false,
        }
    }
}

fn default_width() -> i32 {
    DEFAULT_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_HEIGHT
}

impl SurfaceSpec {
    pub fn geometry(&self) -> StaticGeometry {
        StaticGeometry {
            offset: Offset::new(self.offset_left, self.offset_top),
            scroll: Offset::new(self.scroll_left, self.scroll_top),
            zoom_drift: self.zoom_drift,
        }
    }
}

/// One raw event and when it happened, relative to the script start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub at_ms: u64,
    pub input: RawInput,
}

/// A recorded signing session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub surface: SurfaceSpec,
    pub events: Vec<ScriptedInput>,
}

/// Parses and checks a script: timestamps must never go backwards.
pub fn parse_script(text: &str) -> Result<InputScript, ReplayError> {
    let script: InputScript = serde_json::from_str(text)?;
    for (index, pair) in script.events.windows(2).enumerate() {
        if pair[1].at_ms < pair[0].at_ms {
            return Err(ReplayError::OutOfOrder { index: index + 1 });
        }
    }
    Ok(script)
}

/// Feeds every scripted event into `pad` and returns the sessions it finished.
///
/// After the last event the pad is polled once past its leave deadline, so
/// a script that ends outside the surface still finalizes its session.
pub fn run(pad: &mut SignaturePad, script: &InputScript) -> Vec<SessionEnd> {
    let start = Instant::now();
    let mut geometry = script.surface.geometry();
    let mut finished = Vec::new();

    for scripted in &script.events {
        let now = start + Duration::from_millis(scripted.at_ms);
        if let Some(end) = pad.poll(now) {
            finished.push(end);
        }
        finished.extend(pad.handle_input(&scripted.input, &mut geometry, now));
    }

    if let Some(deadline) = pad.next_deadline() {
        debug!("Script ended outside the surface; flushing pending session");
        finished.extend(pad.poll(deadline));
    }

    info!(
        "Replayed {} events; {} sessions finished, {} segments recorded",
        script.events.len(),
        finished.len(),
        pad.signature().len()
    );
    finished
}
