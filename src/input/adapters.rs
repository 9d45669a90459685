//! Per-family input adapters.
//!
//! Each adapter understands one raw input family and tracks only the primary
//! contact of that family. Secondary contacts, non-primary buttons and
//! non-primary pens never produce events.

use super::events::{
    InputFamily, MouseButton, MouseInput, MousePhase, PenInput, PenPhase, PointerEvent,
    PointerEventKind, PointerId, RawInput, TouchInput, TouchPhase, TouchPoint,
};
use super::geometry::{self, Offset, SurfaceGeometry};
use log::{debug, trace};

/// Converts one family's raw events into canonical pointer events.
pub trait InputAdapter {
    fn family(&self) -> InputFamily;

    /// Normalizes a raw event. Input from other families yields nothing.
    fn normalize(
        &mut self,
        raw: &RawInput,
        geometry: &mut dyn SurfaceGeometry,
    ) -> Vec<PointerEvent>;
}

/// Builds the adapter for a detected family.
pub fn adapter_for(family: InputFamily) -> Box<dyn InputAdapter> {
    match family {
        InputFamily::Mouse => Box::new(MouseAdapter::default()),
        InputFamily::Touch => Box::new(TouchAdapter::default()),
        InputFamily::Pen => Box::new(PenAdapter::default()),
    }
}

fn event_at(
    kind: PointerEventKind,
    pointer_id: PointerId,
    page_x: f64,
    page_y: f64,
    reported: Offset,
    correction: Offset,
) -> Option<PointerEvent> {
    match geometry::to_surface_point(page_x, page_y, reported, correction) {
        Some(point) => Some(PointerEvent::new(kind, pointer_id, point)),
        None => {
            debug!("Dropping {kind:?} with non-finite coordinates ({page_x}, {page_y})");
            None
        }
    }
}

// ============================================================================
// Mouse
// ============================================================================

/// Mouse input: only the left button draws.
#[derive(Debug, Default)]
pub struct MouseAdapter;

impl MouseAdapter {
    fn convert(&self, input: &MouseInput, geometry: &dyn SurfaceGeometry) -> Option<PointerEvent> {
        let kind = match input.phase {
            MousePhase::Down | MousePhase::Up if input.button != MouseButton::Left => {
                trace!("Ignoring {:?} button {:?}", input.button, input.phase);
                return None;
            }
            MousePhase::Down => PointerEventKind::Start,
            MousePhase::Up => PointerEventKind::End,
            MousePhase::Move => PointerEventKind::Move,
            MousePhase::Leave => PointerEventKind::Leave,
            MousePhase::Enter => PointerEventKind::Enter,
        };

        event_at(
            kind,
            PointerId::MOUSE,
            input.page_x,
            input.page_y,
            geometry.reported_offset(),
            Offset::ZERO,
        )
    }
}

impl InputAdapter for MouseAdapter {
    fn family(&self) -> InputFamily {
        InputFamily::Mouse
    }

    fn normalize(
        &mut self,
        raw: &RawInput,
        geometry: &mut dyn SurfaceGeometry,
    ) -> Vec<PointerEvent> {
        match raw {
            RawInput::Mouse(input) => self.convert(input, geometry).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Touch
// ============================================================================

/// Touch input: the first finger down owns the stroke until it lifts.
#[derive(Debug, Default)]
pub struct TouchAdapter {
    active: Option<u32>,
}

impl TouchAdapter {
    pub fn active_identifier(&self) -> Option<u32> {
        self.active
    }

    fn active_touch<'a>(&self, touches: &'a [TouchPoint]) -> Option<&'a TouchPoint> {
        let active = self.active?;
        touches.iter().find(|touch| touch.identifier == active)
    }

    fn convert(
        &mut self,
        input: &TouchInput,
        geometry: &mut dyn SurfaceGeometry,
    ) -> Option<PointerEvent> {
        let (kind, touch) = match input.phase {
            TouchPhase::Start => {
                if self.active.is_some() {
                    trace!("Ignoring secondary touch start");
                    return None;
                }
                let touch = *input.changed_touches.first()?;
                // Only a contact that is alone on the surface starts a stroke.
                if let Some(first) = input.target_touches.first()
                    && first.identifier != touch.identifier
                {
                    trace!("Ignoring touch {} joining an existing contact", touch.identifier);
                    return None;
                }
                self.active = Some(touch.identifier);
                (PointerEventKind::Start, touch)
            }
            TouchPhase::Move => (PointerEventKind::Move, *self.active_touch(&input.changed_touches)?),
            TouchPhase::Leave => {
                (PointerEventKind::Leave, *self.active_touch(&input.changed_touches)?)
            }
            TouchPhase::End | TouchPhase::Cancel => {
                let touch = *self.active_touch(&input.changed_touches)?;
                self.active = None;
                let kind = if input.phase == TouchPhase::End {
                    PointerEventKind::End
                } else {
                    PointerEventKind::Cancel
                };
                (kind, touch)
            }
        };

        let correction = geometry::touch_zoom_correction(geometry);
        event_at(
            kind,
            PointerId(touch.identifier),
            touch.page_x,
            touch.page_y,
            geometry.reported_offset(),
            correction,
        )
    }
}

impl InputAdapter for TouchAdapter {
    fn family(&self) -> InputFamily {
        InputFamily::Touch
    }

    fn normalize(
        &mut self,
        raw: &RawInput,
        geometry: &mut dyn SurfaceGeometry,
    ) -> Vec<PointerEvent> {
        match raw {
            RawInput::Touch(input) => self.convert(input, geometry).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Pen
// ============================================================================

/// Pen/stylus pointer input: only the primary pointer with its tip button.
#[derive(Debug, Default)]
pub struct PenAdapter {
    active: Option<u32>,
}

impl PenAdapter {
    fn convert(&mut self, input: &PenInput, geometry: &dyn SurfaceGeometry) -> Vec<PointerEvent> {
        if !input.is_primary {
            trace!("Ignoring non-primary pen pointer {}", input.pointer_id);
            return Vec::new();
        }

        let kind = match input.phase {
            PenPhase::Down => {
                if input.button != MouseButton::Left || self.active.is_some() {
                    return Vec::new();
                }
                self.active = Some(input.pointer_id);
                PointerEventKind::Start
            }
            PenPhase::Up | PenPhase::Cancel => {
                if input.button != MouseButton::Left || self.active != Some(input.pointer_id) {
                    return Vec::new();
                }
                self.active = None;
                if input.phase == PenPhase::Up {
                    PointerEventKind::End
                } else {
                    PointerEventKind::Cancel
                }
            }
            PenPhase::Move => PointerEventKind::Move,
            PenPhase::Out => PointerEventKind::Leave,
            PenPhase::Over => PointerEventKind::Enter,
        };

        let pointer_id = PointerId(input.pointer_id);
        let reported = geometry.reported_offset();
        let mut events = Vec::with_capacity(input.coalesced.len() + 1);

        if kind == PointerEventKind::Move {
            events.extend(input.coalesced.iter().filter_map(|[x, y]| {
                event_at(kind, pointer_id, *x, *y, reported, Offset::ZERO)
            }));
        }
        events.extend(event_at(
            kind,
            pointer_id,
            input.page_x,
            input.page_y,
            reported,
            Offset::ZERO,
        ));
        events
    }
}

impl InputAdapter for PenAdapter {
    fn family(&self) -> InputFamily {
        InputFamily::Pen
    }

    fn normalize(
        &mut self,
        raw: &RawInput,
        geometry: &mut dyn SurfaceGeometry,
    ) -> Vec<PointerEvent> {
        match raw {
            RawInput::Pen(input) => self.convert(input, geometry),
            _ => Vec::new(),
        }
    }
}
