//! The signature pad: one surface, one recorder, one state machine.

use crate::config::PadConfig;
use crate::draw::{self, Canvas, RenderError, Segment};
use crate::input::{
    DrawingSession, DrawingStateMachine, InputFamily, PointerEvent, PointerNormalizer, RawInput,
    SessionEnd, StrokeTarget, SurfaceGeometry,
};
use crate::path::{self, PathError, PathRecorder};
use crate::sink::TextSink;
use log::{debug, info, warn};
use std::io::Write;
use std::time::Instant;
use thiserror::Error;

/// Surface size used when the host does not pick one.
pub const DEFAULT_WIDTH: i32 = 198;
pub const DEFAULT_HEIGHT: i32 = 55;

/// Errors surfaced to the host by pad-level checks.
#[derive(Debug, Error)]
pub enum PadError {
    #[error("Please sign the document")]
    SignatureMissing,
}

/// A signature widget bound to one drawing surface.
///
/// Owns the surface, the recorded path and the input pipeline. Finished
/// sessions publish the portable text to the optional host sink.
pub struct SignaturePad {
    config: PadConfig,
    canvas: Option<Canvas>,
    recorder: PathRecorder,
    normalizer: PointerNormalizer,
    machine: DrawingStateMachine,
    sink: Option<Box<dyn TextSink>>,
}

impl std::fmt::Debug for SignaturePad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignaturePad")
            .field("config", &self.config)
            .field("drawable", &self.is_drawable())
            .field("segments", &self.recorder.len())
            .field("family", &self.normalizer.family())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl SignaturePad {
    /// Creates a pad with a `width` x `height` surface.
    ///
    /// When no surface can be created the pad still records and regenerates
    /// paths but ignores pointer input.
    pub fn new(config: PadConfig, width: i32, height: i32) -> Self {
        let canvas = match Canvas::new(width, height) {
            Ok(canvas) => Some(canvas),
            Err(err) => {
                warn!("Drawing surface unavailable; pad will be display-only: {err}");
                None
            }
        };

        let machine = if canvas.is_some() && !config.display_only() {
            DrawingStateMachine::new()
        } else {
            DrawingStateMachine::disabled()
        };

        let pad = Self {
            config,
            canvas,
            recorder: PathRecorder::new(),
            normalizer: PointerNormalizer::new(),
            machine,
            sink: None,
        };
        pad.repaint();
        info!(
            "Signature pad ready ({}x{}, drawable={})",
            width,
            height,
            pad.is_drawable()
        );
        pad
    }

    /// Attaches the host text field that receives published paths.
    pub fn with_sink(mut self, sink: Box<dyn TextSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Whether pointer input can draw on this pad.
    pub fn is_drawable(&self) -> bool {
        self.machine.is_enabled()
    }

    pub fn input_family(&self) -> Option<InputFamily> {
        self.normalizer.family()
    }

    pub fn session(&self) -> DrawingSession {
        self.machine.session()
    }

    /// Pending leave deadline the host should wake up for.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.machine.next_deadline()
    }

    /// Feeds one raw host event through normalization and the state machine.
    pub fn handle_input(
        &mut self,
        raw: &RawInput,
        geometry: &mut dyn SurfaceGeometry,
        now: Instant,
    ) -> Vec<SessionEnd> {
        if !self.is_drawable() {
            return Vec::new();
        }
        let events = self.normalizer.normalize(raw, geometry);
        events
            .iter()
            .filter_map(|event| self.handle_event(event, now))
            .collect()
    }

    /// Applies one already-normalized pointer event.
    pub fn handle_event(&mut self, event: &PointerEvent, now: Instant) -> Option<SessionEnd> {
        let mut target = StrokeTarget {
            recorder: &mut self.recorder,
            canvas: self.canvas.as_ref(),
            config: &self.config,
        };
        let end = self.machine.handle(event, now, &mut target)?;
        self.publish(&end);
        Some(end)
    }

    /// Finalizes a session whose leave deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SessionEnd> {
        let mut target = StrokeTarget {
            recorder: &mut self.recorder,
            canvas: self.canvas.as_ref(),
            config: &self.config,
        };
        let end = self.machine.poll(now, &mut target)?;
        self.publish(&end);
        Some(end)
    }

    /// Erases the signature and empties the host text field.
    pub fn clear(&mut self) {
        debug!("Clearing signature pad");
        self.machine.reset();
        self.recorder.clear();
        self.repaint();
        self.write_sink("");
    }

    /// Replaces the signature with the path encoded in `text`.
    ///
    /// # Errors
    /// Returns [`PathError`] when `text` is not a valid path; the pad is left
    /// untouched in that case.
    pub fn regenerate_str(&mut self, text: &str) -> Result<(), PathError> {
        let path = path::deserialize(text)?;
        self.regenerate(&path);
        Ok(())
    }

    /// Replaces the signature with `path`, redrawing it from scratch and
    /// writing the new text to the host sink.
    pub fn regenerate(&mut self, path: &[Segment]) {
        self.machine.reset();
        path::regenerate(
            &mut self.recorder,
            self.canvas.as_ref(),
            &self.config,
            path,
        );
        let text = self.recorder.serialize().to_string();
        self.write_sink(&text);
    }

    /// The recorded segments in drawing order.
    pub fn signature(&self) -> &[Segment] {
        self.recorder.current_path()
    }

    /// Portable text of the recorded signature.
    pub fn signature_string(&self) -> &str {
        self.recorder.serialize()
    }

    /// Mutation counter of the recorded path.
    pub fn version(&self) -> u64 {
        self.recorder.version()
    }

    /// Checks that a draw-only pad holds a signature.
    pub fn validate(&self) -> Result<(), PadError> {
        if self.config.draw_only() && self.recorder.is_empty() {
            return Err(PadError::SignatureMissing);
        }
        Ok(())
    }

    /// Renders the signature without the guideline and writes it as PNG.
    pub fn export_png<W: Write>(&self, writer: &mut W) -> Result<(), RenderError> {
        let (width, height) = self.canvas.as_ref().map_or(
            (DEFAULT_WIDTH, DEFAULT_HEIGHT),
            |canvas| (canvas.width(), canvas.height()),
        );
        let canvas = Canvas::new(width, height)?;
        let ctx = canvas.context();
        draw::fill_background(ctx, &self.config, width, height);
        draw::draw_path(ctx, &self.config, self.recorder.current_path());
        canvas.write_png(writer)
    }

    /// Swaps in a new configuration and repaints the current signature.
    ///
    /// An open session is finished first and publishes what it drew.
    pub fn reconfigure(&mut self, config: PadConfig) {
        let mut target = StrokeTarget {
            recorder: &mut self.recorder,
            canvas: self.canvas.as_ref(),
            config: &self.config,
        };
        if let Some(end) = self.machine.interrupt(&mut target) {
            self.publish(&end);
        }

        self.machine = if self.canvas.is_some() && !config.display_only() {
            DrawingStateMachine::new()
        } else {
            DrawingStateMachine::disabled()
        };
        self.config = config;
        self.repaint();
        debug!("Pad reconfigured; drawable={}", self.is_drawable());
    }

    /// Redraws background, guideline and the recorded path.
    fn repaint(&self) {
        if let Some(canvas) = &self.canvas {
            let ctx = canvas.context();
            draw::prepare_surface(ctx, &self.config, canvas.width(), canvas.height());
            draw::draw_path(ctx, &self.config, self.recorder.current_path());
        }
    }

    fn publish(&mut self, end: &SessionEnd) {
        if !end.publish {
            debug!("Session {:?} produced nothing to publish", end.reason);
            return;
        }
        let text = self.recorder.serialize().to_string();
        self.write_sink(&text);
    }

    fn write_sink(&mut self, text: &str) {
        if let Some(sink) = self.sink.as_mut()
            && let Err(err) = sink.write(text)
        {
            warn!("Failed to write signature to host sink: {err:#}");
        }
    }
}
