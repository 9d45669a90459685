//! Ordered storage for the segments of the live signature.

use super::codec;
use crate::draw::{Path, Segment};
use std::cell::OnceCell;

/// Owns the recorded path of one pad.
///
/// Every mutation bumps [`version`](Self::version) so hosts can tell whether
/// new data exists since they last looked, and drops the cached portable text.
#[derive(Debug, Default)]
pub struct PathRecorder {
    path: Path,
    version: u64,
    serialized: OnceCell<String>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment to the end of the path.
    pub fn append(&mut self, segment: Segment) {
        self.path.push(segment);
        self.touch();
    }

    /// Substitutes the whole stored path.
    pub fn replace(&mut self, path: Path) {
        self.path = path;
        self.touch();
    }

    /// Empties the stored path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.touch();
    }

    /// Portable text of the stored path; cached until the next mutation.
    pub fn serialize(&self) -> &str {
        self.serialized.get_or_init(|| codec::serialize(&self.path))
    }

    /// The recorded segments in drawing order.
    pub fn current_path(&self) -> &[Segment] {
        &self.path
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.serialized = OnceCell::new();
    }
}
