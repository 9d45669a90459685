//! Lazily-bound front door for raw input.

use super::adapters::{self, InputAdapter};
use super::events::{InputFamily, PointerEvent, RawInput};
use super::geometry::SurfaceGeometry;
use log::{debug, info};

/// Normalizes raw input for one surface.
///
/// The input family is detected from the first event and fixed for the
/// lifetime of the normalizer; events from any other family are dropped.
#[derive(Default)]
pub struct PointerNormalizer {
    adapter: Option<Box<dyn InputAdapter>>,
}

impl std::fmt::Debug for PointerNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerNormalizer")
            .field("family", &self.family())
            .finish()
    }
}

impl PointerNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The family this surface is bound to, once detected.
    pub fn family(&self) -> Option<InputFamily> {
        self.adapter.as_ref().map(|adapter| adapter.family())
    }

    /// Converts one raw event into zero or more canonical events.
    pub fn normalize(
        &mut self,
        raw: &RawInput,
        geometry: &mut dyn SurfaceGeometry,
    ) -> Vec<PointerEvent> {
        let family = raw.family();
        let adapter = self.adapter.get_or_insert_with(|| {
            info!("Detected {family} input; binding surface to it");
            adapters::adapter_for(family)
        });

        if adapter.family() != family {
            debug!(
                "Ignoring {family} input on a surface bound to {}",
                adapter.family()
            );
            return Vec::new();
        }

        adapter.normalize(raw, geometry)
    }
}
