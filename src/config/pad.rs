//! Immutable per-pad drawing parameters.

use super::enums::PenCap;
use crate::draw::{
    Color,
    color::{GUIDE_GREY, INK_BLUE, WHITE},
};
use std::time::Duration;

/// Resolved drawing parameters for one pad instance.
///
/// Built once from the file [`Config`](super::Config) (or
/// [`PadConfig::default`]) and never mutated afterwards. The `with_*`
/// methods consume the value and return a replacement, which the pad swaps
/// in through `SignaturePad::reconfigure`.
#[derive(Debug, Clone, PartialEq)]
pub struct PadConfig {
    pen_color: Color,
    pen_width: f64,
    pen_cap: PenCap,
    background: Color,
    guideline_color: Color,
    guideline_width: f64,
    guideline_margin: f64,
    guideline_top: f64,
    display_only: bool,
    draw_only: bool,
    leave_timeout: Duration,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            pen_color: INK_BLUE,
            pen_width: 2.0,
            pen_cap: PenCap::Round,
            background: WHITE,
            guideline_color: GUIDE_GREY,
            guideline_width: 2.0,
            guideline_margin: 5.0,
            guideline_top: 35.0,
            display_only: false,
            draw_only: false,
            leave_timeout: Duration::from_millis(super::types::default_leave_timeout_ms()),
        }
    }
}

impl PadConfig {
    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    pub fn pen_cap(&self) -> PenCap {
        self.pen_cap
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn guideline_color(&self) -> Color {
        self.guideline_color
    }

    pub fn guideline_width(&self) -> f64 {
        self.guideline_width
    }

    pub fn guideline_margin(&self) -> f64 {
        self.guideline_margin
    }

    pub fn guideline_top(&self) -> f64 {
        self.guideline_top
    }

    pub fn display_only(&self) -> bool {
        self.display_only
    }

    pub fn draw_only(&self) -> bool {
        self.draw_only
    }

    pub fn leave_timeout(&self) -> Duration {
        self.leave_timeout
    }

    pub fn with_pen(mut self, color: Color, width: f64, cap: PenCap) -> Self {
        self.pen_color = color;
        self.pen_width = width;
        self.pen_cap = cap;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_guideline(mut self, color: Color, width: f64, margin: f64, top: f64) -> Self {
        self.guideline_color = color;
        self.guideline_width = width;
        self.guideline_margin = margin;
        self.guideline_top = top;
        self
    }

    pub fn with_display_only(mut self, display_only: bool) -> Self {
        self.display_only = display_only;
        self
    }

    pub fn with_draw_only(mut self, draw_only: bool) -> Self {
        self.draw_only = draw_only;
        self
    }

    pub fn with_leave_timeout(mut self, timeout: Duration) -> Self {
        self.leave_timeout = timeout;
        self
    }

    /// Whether the signing baseline should be drawn at all.
    pub fn shows_guideline(&self) -> bool {
        !self.display_only && self.guideline_width > 0.0
    }
}
