//! Cairo-based rendering functions for signature segments.
//!
//! Everything here is stateless: each call configures the context from the
//! [`PadConfig`] it is given, so the same functions serve the live pad surface
//! and the throwaway surface used for image export.

use super::segment::Segment;
use crate::config::PadConfig;

/// Clears the surface and fills it with the configured background color.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `config` - Pad configuration supplying the background color
/// * `width` - Surface width in pixels
/// * `height` - Surface height in pixels
pub fn fill_background(ctx: &cairo::Context, config: &PadConfig, width: i32, height: i32) {
    ctx.save().ok();

    ctx.set_operator(cairo::Operator::Clear);
    ctx.rectangle(0.0, 0.0, width as f64, height as f64);
    let _ = ctx.fill();

    ctx.set_operator(cairo::Operator::Over);
    config.background().apply(ctx);
    ctx.rectangle(0.0, 0.0, width as f64, height as f64);
    let _ = ctx.fill();

    ctx.restore().ok();
}

/// Draws the horizontal signing baseline.
///
/// Skipped for display-only pads and when the guideline width is zero.
pub fn draw_guideline(ctx: &cairo::Context, config: &PadConfig, width: i32) {
    if !config.shows_guideline() {
        return;
    }

    let margin = config.guideline_margin();
    let top = config.guideline_top();

    ctx.save().ok();
    config.guideline_color().apply(ctx);
    ctx.set_line_width(config.guideline_width());
    ctx.new_path();
    ctx.move_to(margin, top);
    ctx.line_to(width as f64 - margin, top);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Background plus guideline: the blank state of a pad.
pub fn prepare_surface(ctx: &cairo::Context, config: &PadConfig, width: i32, height: i32) {
    fill_background(ctx, config, width, height);
    draw_guideline(ctx, config, width);
}

/// Strokes one segment with the configured pen.
pub fn draw_segment(ctx: &cairo::Context, config: &PadConfig, segment: &Segment) {
    ctx.save().ok();
    config.pen_color().apply(ctx);
    ctx.set_line_width(config.pen_width());
    ctx.set_line_cap(config.pen_cap().to_cairo());

    ctx.new_path();
    ctx.move_to(segment.move_from.x as f64, segment.move_from.y as f64);
    ctx.line_to(segment.line_to.x as f64, segment.line_to.y as f64);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Replays segments in order.
pub fn draw_path(ctx: &cairo::Context, config: &PadConfig, path: &[Segment]) {
    for segment in path {
        draw_segment(ctx, config, segment);
    }
}
