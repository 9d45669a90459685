//! Raw host input shapes and the canonical pointer event.
//!
//! Hosts deliver mouse, touch and pen input in their own shapes (the
//! `Raw*` types, which mirror what browsers and toolkits report). The
//! normalizer turns those into [`PointerEvent`]s, the only input the drawing
//! state machine understands.

use crate::draw::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    #[default]
    Left,
    /// Right mouse button (ignored for drawing)
    Right,
    /// Middle mouse button (ignored for drawing)
    Middle,
}

/// Input family of a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFamily {
    Mouse,
    Touch,
    Pen,
}

impl fmt::Display for InputFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFamily::Mouse => write!(f, "mouse"),
            InputFamily::Touch => write!(f, "touch"),
            InputFamily::Pen => write!(f, "pen"),
        }
    }
}

/// Phase of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MousePhase {
    Down,
    Move,
    Up,
    Leave,
    Enter,
}

/// A mouse event in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    pub phase: MousePhase,
    #[serde(default)]
    pub button: MouseButton,
    pub page_x: f64,
    pub page_y: f64,
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
    Leave,
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub identifier: u32,
    pub page_x: f64,
    pub page_y: f64,
}

/// A touch event: the contacts that changed plus those still on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub changed_touches: Vec<TouchPoint>,
    #[serde(default)]
    pub target_touches: Vec<TouchPoint>,
}

/// Phase of a pen/stylus pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenPhase {
    Down,
    Move,
    Up,
    Cancel,
    Out,
    Over,
}

/// A pen/stylus pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenInput {
    pub phase: PenPhase,
    pub pointer_id: u32,
    #[serde(default = "default_true")]
    pub is_primary: bool,
    #[serde(default)]
    pub button: MouseButton,
    pub page_x: f64,
    pub page_y: f64,
    /// Samples the host merged into this event, oldest first
    #[serde(default)]
    pub coalesced: Vec<[f64; 2]>,
}

fn default_true() -> bool {
    true
}

/// Raw input from any supported family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum RawInput {
    Mouse(MouseInput),
    Touch(TouchInput),
    Pen(PenInput),
}

impl RawInput {
    pub fn family(&self) -> InputFamily {
        match self {
            RawInput::Mouse(_) => InputFamily::Mouse,
            RawInput::Touch(_) => InputFamily::Touch,
            RawInput::Pen(_) => InputFamily::Pen,
        }
    }
}

/// Identifier of the contact that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The single mouse pointer.
    pub const MOUSE: PointerId = PointerId(0);
}

/// Kind of a canonical pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Primary contact pressed on the surface
    Start,
    /// Contact moved
    Move,
    /// Contact released
    End,
    /// Host aborted the contact
    Cancel,
    /// Contact left the surface bounds without releasing
    Leave,
    /// Contact came back over the surface
    Enter,
}

/// Canonical input event with surface-relative device-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer_id: PointerId,
    pub point: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, pointer_id: PointerId, point: Point) -> Self {
        Self {
            kind,
            pointer_id,
            point,
        }
    }
}
