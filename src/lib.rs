//! Freehand signature capture, recording and replay.
//!
//! A [`SignaturePad`] turns raw mouse, touch or pen input into a recorded
//! path of line segments, draws it on a Cairo surface and publishes the path
//! as portable JSON text. Saved text can be regenerated onto a fresh surface
//! with pixel-identical output.

pub mod config;
pub mod draw;
pub mod input;
pub mod pad;
pub mod path;
pub mod replay;
pub mod sink;
pub mod util;

pub use config::{Config, PadConfig};
pub use pad::{PadError, SignaturePad};
