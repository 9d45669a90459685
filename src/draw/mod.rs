//! Rendering primitives and signature geometry (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Point`] / [`Segment`] / [`Path`]: the recorded geometry of a signature
//! - [`Canvas`]: the image surface a pad draws on
//! - Stateless rendering functions for Cairo-based output

pub mod canvas;
pub mod color;
pub mod render;
pub mod segment;

// Re-export commonly used types at module level
pub use canvas::{Canvas, RenderError, Snapshot};
pub use color::Color;
pub use render::{draw_guideline, draw_path, draw_segment, fill_background, prepare_surface};
pub use segment::{DOT_OFFSET, Path, Point, Segment};
