//! Surface placement on the host page and zoom-drift correction.

use crate::draw::Point;
use crate::util;
use log::debug;

/// A page-space offset or scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub left: f64,
    pub top: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        left: 0.0,
        top: 0.0,
    };

    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Where the drawing surface sits on the host page.
///
/// Implemented by the host. `reported_offset` is the page offset the host
/// claims for the surface; `layout_offset` is the static layout position,
/// which does not move with scrolling. Some mobile browsers misreport the
/// former while pinch-zoomed, which [`touch_zoom_correction`] detects.
pub trait SurfaceGeometry {
    fn reported_offset(&self) -> Offset;
    fn layout_offset(&self) -> Offset;
    fn scroll(&self) -> Offset;
    fn set_scroll(&mut self, scroll: Offset);
}

/// Converts a page position to surface pixels.
///
/// Returns `None` when the corrected coordinates are not finite.
pub fn to_surface_point(
    page_x: f64,
    page_y: f64,
    reported: Offset,
    correction: Offset,
) -> Option<Point> {
    let x = util::floor_to_pixel(page_x - reported.left + correction.left)?;
    let y = util::floor_to_pixel(page_y - reported.top + correction.top)?;
    Some(Point::new(x, y))
}

/// Measures the zoom-induced offset error on touch devices.
///
/// For each axis with a non-zero scroll position, the gap between layout and
/// reported offset is sampled, the page is scrolled to 0 on that axis and
/// sampled again, then the scroll is restored. When the gap changed, the
/// reported offset is tracking the scroll and the scroll amount is returned
/// as the correction for that axis.
pub fn touch_zoom_correction(geometry: &mut dyn SurfaceGeometry) -> Offset {
    let original = geometry.scroll();
    let mut correction = Offset::ZERO;

    if original.top > 0.0 {
        let before = geometry.layout_offset().top - geometry.reported_offset().top;
        geometry.set_scroll(Offset::new(original.left, 0.0));
        let after = geometry.layout_offset().top - geometry.reported_offset().top;
        geometry.set_scroll(original);
        if before != after {
            correction.top = original.top;
        }
    }

    if original.left > 0.0 {
        let before = geometry.layout_offset().left - geometry.reported_offset().left;
        geometry.set_scroll(Offset::new(0.0, original.top));
        let after = geometry.layout_offset().left - geometry.reported_offset().left;
        geometry.set_scroll(original);
        if before != after {
            correction.left = original.left;
        }
    }

    if correction != Offset::ZERO {
        debug!(
            "Zoom drift detected; correcting by ({}, {})",
            correction.left, correction.top
        );
    }
    correction
}

/// Geometry with a fixed surface position, for hosts without a live page.
///
/// With `zoom_drift` set it reproduces the misreporting browsers: the
/// reported offset grows with the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticGeometry {
    pub offset: Offset,
    pub scroll: Offset,
    pub zoom_drift: bool,
}

impl StaticGeometry {
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            offset: Offset::new(left, top),
            ..Self::default()
        }
    }
}

impl SurfaceGeometry for StaticGeometry {
    fn reported_offset(&self) -> Offset {
        if self.zoom_drift {
            Offset::new(
                self.offset.left + self.scroll.left,
                self.offset.top + self.scroll.top,
            )
        } else {
            self.offset
        }
    }

    fn layout_offset(&self) -> Offset {
        self.offset
    }

    fn scroll(&self) -> Offset {
        self.scroll
    }

    fn set_scroll(&mut self, scroll: Offset) {
        self.scroll = scroll;
    }
}
