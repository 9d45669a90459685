//! Input normalization and the drawing state machine.
//!
//! Raw host events (mouse, touch or pen) pass through the
//! [`PointerNormalizer`], which converts them to surface-relative
//! [`PointerEvent`]s. The [`DrawingStateMachine`] turns those into recorded
//! segments and tells the pad when a session finishes.

pub mod adapters;
pub mod events;
pub mod geometry;
pub mod normalizer;
pub mod state;

// Re-export commonly used types at module level
pub use adapters::{InputAdapter, MouseAdapter, PenAdapter, TouchAdapter};
pub use events::{
    InputFamily, MouseButton, MouseInput, MousePhase, PenInput, PenPhase, PointerEvent,
    PointerEventKind, PointerId, RawInput, TouchInput, TouchPhase, TouchPoint,
};
pub use geometry::{Offset, StaticGeometry, SurfaceGeometry};
pub use normalizer::PointerNormalizer;
pub use state::{
    DrawingSession, DrawingState, DrawingStateMachine, EndReason, SessionEnd, StrokeTarget,
};
