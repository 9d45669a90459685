//! Point and segment primitives that make up a recorded signature.

/// Integer device-pixel coordinate relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by the given offsets, clamped to the
    /// coordinate range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Vertical nudge applied to a tap so the resulting dot has visible length.
pub const DOT_OFFSET: i32 = 1;

/// One drawable line: `move_to(move_from)` followed by `line_to(line_to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub move_from: Point,
    pub line_to: Point,
}

impl Segment {
    pub const fn new(move_from: Point, line_to: Point) -> Self {
        Self { move_from, line_to }
    }

    /// The synthetic segment recorded for a tap or click with no movement.
    pub const fn dot(at: Point) -> Self {
        Self {
            move_from: at,
            line_to: at.offset(0, DOT_OFFSET),
        }
    }
}

/// Ordered segments; order is redraw order.
pub type Path = Vec<Segment>;
