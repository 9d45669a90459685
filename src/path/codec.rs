//! Portable text form of a signature path.
//!
//! A path is persisted as a JSON array of records, one per segment, in
//! drawing order:
//!
//! ```json
//! [{"mx":10,"my":10,"lx":10,"ly":11},{"mx":10,"my":10,"lx":12,"ly":14}]
//! ```
//!
//! `mx`/`my` is the move-from point and `lx`/`ly` the line-to point, in device
//! pixels relative to the top-left corner of the surface. Arrays written by
//! hand are accepted as long as every record carries the four numeric fields;
//! fractional values are floored to whole pixels.

use super::recorder::PathRecorder;
use crate::config::PadConfig;
use crate::draw::{self, Canvas, Path, Point, Segment};
use crate::util;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Validation failures for portable text.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("signature is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("signature must be an array of segment records")]
    NotAnArray,

    #[error("record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("record {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index} field `{field}` is not a finite number")]
    NotANumber { index: usize, field: &'static str },

    #[error("record {index} field `{field}` does not fit in device pixels")]
    OutOfRange { index: usize, field: &'static str },
}

/// Wire shape of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub mx: i32,
    pub my: i32,
    pub lx: i32,
    pub ly: i32,
}

impl From<&Segment> for SegmentRecord {
    fn from(segment: &Segment) -> Self {
        Self {
            mx: segment.move_from.x,
            my: segment.move_from.y,
            lx: segment.line_to.x,
            ly: segment.line_to.y,
        }
    }
}

impl From<SegmentRecord> for Segment {
    fn from(record: SegmentRecord) -> Self {
        Segment::new(
            Point::new(record.mx, record.my),
            Point::new(record.lx, record.ly),
        )
    }
}

/// Encodes a path as portable text.
pub fn serialize(path: &[Segment]) -> String {
    let records: Vec<SegmentRecord> = path.iter().map(SegmentRecord::from).collect();
    // Plain integer records always encode.
    serde_json::to_string(&records).unwrap_or_else(|err| {
        warn!("Failed to encode signature: {err}");
        String::from("[]")
    })
}

/// Parses portable text into a path.
///
/// # Errors
/// Returns [`PathError`] when the text is not JSON, is not an array, or any
/// record lacks one of `mx`, `my`, `lx`, `ly` as a finite number.
pub fn deserialize(text: &str) -> Result<Path, PathError> {
    let value: Value = serde_json::from_str(text)?;
    from_value(&value)
}

/// Validates an already-parsed JSON value as a path.
pub fn from_value(value: &Value) -> Result<Path, PathError> {
    let records = value.as_array().ok_or(PathError::NotAnArray)?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let object = record
                .as_object()
                .ok_or(PathError::NotAnObject { index })?;
            let field = |name: &'static str| -> Result<i32, PathError> {
                let raw = object
                    .get(name)
                    .ok_or(PathError::MissingField { index, field: name })?;
                let number = raw
                    .as_f64()
                    .filter(|n| n.is_finite())
                    .ok_or(PathError::NotANumber { index, field: name })?;
                util::floor_to_pixel(number).ok_or(PathError::OutOfRange { index, field: name })
            };

            Ok(Segment::new(
                Point::new(field("mx")?, field("my")?),
                Point::new(field("lx")?, field("ly")?),
            ))
        })
        .collect()
}

/// Replays a validated path into the recorder and a cleared surface.
///
/// The recorder's contents are replaced wholesale and every segment is drawn
/// in order, so the resulting pixels match the path having been drawn by
/// hand. Pass `None` for `canvas` when the pad has no drawing surface.
pub fn regenerate(
    recorder: &mut PathRecorder,
    canvas: Option<&Canvas>,
    config: &PadConfig,
    path: &[Segment],
) {
    recorder.replace(path.to_vec());
    if let Some(canvas) = canvas {
        let ctx = canvas.context();
        draw::prepare_surface(ctx, config, canvas.width(), canvas.height());
        draw::draw_path(ctx, config, path);
    }

    debug!("Regenerated signature with {} segments", path.len());
}
