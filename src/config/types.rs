//! Configuration type definitions.

use super::enums::{ColorSpec, PenCap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pen (ink) settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PenConfig {
    /// Ink color - a named color, a hex string like `"#145394"`, or `[r, g, b]`
    #[serde(default = "default_pen_color")]
    pub color: ColorSpec,

    /// Pen thickness in pixels (valid range: 0.5 - 20.0)
    #[serde(default = "default_pen_width")]
    pub width: f64,

    /// Segment end cap: butt, round or square
    #[serde(default)]
    pub cap: PenCap,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            color: default_pen_color(),
            width: default_pen_width(),
            cap: PenCap::default(),
        }
    }
}

/// Surface background settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BackgroundConfig {
    /// Fill color painted on every clear
    #[serde(default = "default_background_color")]
    pub color: ColorSpec,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color: default_background_color(),
        }
    }
}

/// Signing baseline settings.
///
/// The guideline is a horizontal rule drawn `top` pixels from the top of the
/// surface, inset by `margin` on both sides. It is never drawn on display-only
/// pads and a width of 0 disables it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuidelineConfig {
    #[serde(default = "default_guideline_color")]
    pub color: ColorSpec,

    /// Line thickness in pixels (0 disables the guideline)
    #[serde(default = "default_guideline_width")]
    pub width: f64,

    /// Horizontal inset from both surface edges
    #[serde(default = "default_guideline_margin")]
    pub margin: f64,

    /// Distance from the top of the surface
    #[serde(default = "default_guideline_top")]
    pub top: f64,
}

impl Default for GuidelineConfig {
    fn default() -> Self {
        Self {
            color: default_guideline_color(),
            width: default_guideline_width(),
            margin: default_guideline_margin(),
            top: default_guideline_top(),
        }
    }
}

/// Interaction behavior.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BehaviorConfig {
    /// Render signatures only; ignore all pointer input and skip the guideline
    #[serde(default)]
    pub display_only: bool,

    /// Require a drawn signature when validating
    #[serde(default)]
    pub draw_only: bool,

    /// Delay in milliseconds before a session is finalized after the pointer
    /// leaves the surface without releasing (valid range: 50 - 5000)
    #[serde(default = "default_leave_timeout_ms")]
    pub leave_timeout_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            display_only: false,
            draw_only: false,
            leave_timeout_ms: default_leave_timeout_ms(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("#145394".to_string())
}

fn default_pen_width() -> f64 {
    2.0
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_guideline_color() -> ColorSpec {
    ColorSpec::Name("#cccccc".to_string())
}

fn default_guideline_width() -> f64 {
    2.0
}

fn default_guideline_margin() -> f64 {
    5.0
}

fn default_guideline_top() -> f64 {
    35.0
}

pub(crate) fn default_leave_timeout_ms() -> u64 {
    500
}
