//! Signature path recording and its portable text form.
//!
//! [`PathRecorder`] owns the live segments of a pad; [`codec`] turns them
//! into the JSON array-of-records text used for persistence and replays that
//! text back onto a surface.

pub mod codec;
pub mod recorder;

pub use codec::{PathError, SegmentRecord, deserialize, regenerate, serialize};
pub use recorder::PathRecorder;
