//! Drawing session state machine.

use crate::config::PadConfig;
use crate::draw::{self, Canvas, Point, Segment};
use crate::input::events::{PointerEvent, PointerEventKind, PointerId};
use crate::path::PathRecorder;
use log::{debug, trace};
use std::time::Instant;

/// Lifecycle of one contact-to-release interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingState {
    /// No contact; waiting for a start event
    #[default]
    Idle,
    /// Contact made, no movement seen yet
    Armed {
        /// Contact that owns the session
        pointer_id: PointerId,
        /// Where the contact landed
        start: Point,
    },
    /// Contact is moving and emitting segments
    Drawing {
        /// Contact that owns the session
        pointer_id: PointerId,
        /// Last recorded point; after a leave this is the exit point
        previous: Point,
        /// When a pending leave finalizes the session
        leave_deadline: Option<Instant>,
    },
}

/// Read-only view of the open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawingSession {
    pub previous_point: Option<Point>,
    pub active_pointer_id: Option<PointerId>,
    pub armed: bool,
}

/// Why a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Contact released
    Released,
    /// Host cancelled the contact
    Cancelled,
    /// Pointer stayed outside the surface past the leave timeout
    LeaveTimeout,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub reason: EndReason,
    /// Segments recorded during this session
    pub segments: usize,
    /// Whether the accumulated path should be written to the host text sink
    pub publish: bool,
}

/// What a session draws into: the recorder plus the optional live surface.
pub struct StrokeTarget<'a> {
    pub recorder: &'a mut PathRecorder,
    pub canvas: Option<&'a Canvas>,
    pub config: &'a PadConfig,
}

impl StrokeTarget<'_> {
    fn emit(&mut self, segment: Segment) {
        self.recorder.append(segment);
        if let Some(canvas) = self.canvas {
            draw::draw_segment(canvas.context(), self.config, &segment);
        }
    }
}

/// Sequences canonical pointer events into drawing sessions.
///
/// Every handler runs to completion before the next event is processed, so
/// the machine never observes a half-applied transition. The only deferred
/// work is the leave deadline, which the host drives through
/// [`poll`](Self::poll).
#[derive(Debug)]
pub struct DrawingStateMachine {
    state: DrawingState,
    enabled: bool,
    session_segments: usize,
}

impl Default for DrawingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingStateMachine {
    pub fn new() -> Self {
        Self {
            state: DrawingState::Idle,
            enabled: true,
            session_segments: 0,
        }
    }

    /// A machine that ignores all input (display-only or surface-less pads).
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn session(&self) -> DrawingSession {
        match self.state {
            DrawingState::Idle => DrawingSession::default(),
            DrawingState::Armed { pointer_id, .. } => DrawingSession {
                previous_point: None,
                active_pointer_id: Some(pointer_id),
                armed: true,
            },
            DrawingState::Drawing {
                pointer_id,
                previous,
                ..
            } => DrawingSession {
                previous_point: Some(previous),
                active_pointer_id: Some(pointer_id),
                armed: true,
            },
        }
    }

    /// Pending leave deadline, for hosts that schedule a wake-up.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            DrawingState::Drawing { leave_deadline, .. } => leave_deadline,
            _ => None,
        }
    }

    /// Drops any open session and pending deadline without finishing it.
    pub fn reset(&mut self) {
        if self.state != DrawingState::Idle {
            debug!("Discarding open drawing session");
        }
        self.state = DrawingState::Idle;
        self.session_segments = 0;
    }

    /// Ends any open session as if the host cancelled it, so segments drawn
    /// so far still publish.
    pub fn interrupt(&mut self, target: &mut StrokeTarget<'_>) -> Option<SessionEnd> {
        if self.state == DrawingState::Idle {
            return None;
        }
        debug!("Interrupting open drawing session");
        Some(self.finish(EndReason::Cancelled, target))
    }

    /// Finalizes the session if its leave deadline has passed.
    pub fn poll(&mut self, now: Instant, target: &mut StrokeTarget<'_>) -> Option<SessionEnd> {
        let state = self.state;
        match state {
            DrawingState::Drawing {
                leave_deadline: Some(deadline),
                ..
            } if now >= deadline => {
                debug!("Leave timeout elapsed; finishing session");
                Some(self.finish(EndReason::LeaveTimeout, target))
            }
            _ => None,
        }
    }

    /// Applies one pointer event.
    ///
    /// Returns the session summary when this event (or an expired leave
    /// deadline noticed on the way in) finished a session.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        target: &mut StrokeTarget<'_>,
    ) -> Option<SessionEnd> {
        if !self.enabled {
            return None;
        }

        let expired = self.poll(now, target);

        let state = self.state;
        let finished = match state {
            DrawingState::Idle => {
                if event.kind == PointerEventKind::Start {
                    self.on_start(event);
                }
                None
            }
            DrawingState::Armed { pointer_id, start } => {
                if event.pointer_id != pointer_id {
                    trace!("Ignoring {:?} from inactive pointer", event.kind);
                    None
                } else {
                    self.on_armed(event, pointer_id, start, now, target)
                }
            }
            DrawingState::Drawing {
                pointer_id,
                previous,
                leave_deadline,
            } => {
                if event.pointer_id != pointer_id {
                    trace!("Ignoring {:?} from inactive pointer", event.kind);
                    None
                } else {
                    self.on_drawing(event, pointer_id, previous, leave_deadline, now, target)
                }
            }
        };

        finished.or(expired)
    }

    fn on_start(&mut self, event: &PointerEvent) {
        debug!(
            "Session armed by pointer {:?} at ({}, {})",
            event.pointer_id, event.point.x, event.point.y
        );
        self.session_segments = 0;
        self.state = DrawingState::Armed {
            pointer_id: event.pointer_id,
            start: event.point,
        };
    }

    fn on_armed(
        &mut self,
        event: &PointerEvent,
        pointer_id: PointerId,
        start: Point,
        now: Instant,
        target: &mut StrokeTarget<'_>,
    ) -> Option<SessionEnd> {
        match event.kind {
            PointerEventKind::Move => {
                let previous = self.begin_stroke(start, event.point, target);
                self.state = DrawingState::Drawing {
                    pointer_id,
                    previous,
                    leave_deadline: None,
                };
                None
            }
            PointerEventKind::Leave => {
                let previous = self.begin_stroke(start, event.point, target);
                self.arm_leave(pointer_id, previous, None, now, target);
                None
            }
            PointerEventKind::End => {
                // A tap still leaves a mark.
                self.record(Segment::dot(start), target);
                Some(self.finish(EndReason::Released, target))
            }
            PointerEventKind::Cancel => Some(self.finish(EndReason::Cancelled, target)),
            PointerEventKind::Start | PointerEventKind::Enter => None,
        }
    }

    fn on_drawing(
        &mut self,
        event: &PointerEvent,
        pointer_id: PointerId,
        previous: Point,
        leave_deadline: Option<Instant>,
        now: Instant,
        target: &mut StrokeTarget<'_>,
    ) -> Option<SessionEnd> {
        match event.kind {
            PointerEventKind::Move => {
                if leave_deadline.is_some() {
                    debug!("Pointer re-entered; resuming session");
                }
                // After a re-entry this joins the exit point to the new one.
                let previous = self.extend_stroke(previous, event.point, target);
                self.state = DrawingState::Drawing {
                    pointer_id,
                    previous,
                    leave_deadline: None,
                };
                None
            }
            PointerEventKind::Leave => {
                let previous = self.extend_stroke(previous, event.point, target);
                self.arm_leave(pointer_id, previous, leave_deadline, now, target);
                None
            }
            PointerEventKind::Enter => {
                if leave_deadline.is_some() {
                    debug!("Pointer re-entered; leave timer cancelled");
                }
                self.state = DrawingState::Drawing {
                    pointer_id,
                    previous,
                    leave_deadline: None,
                };
                None
            }
            PointerEventKind::End => Some(self.finish(EndReason::Released, target)),
            PointerEventKind::Cancel => Some(self.finish(EndReason::Cancelled, target)),
            PointerEventKind::Start => {
                trace!("Rejecting start while a session is open");
                None
            }
        }
    }

    /// First movement of a session: a dot when the contact has not moved,
    /// otherwise a segment from the landing point. Returns the new previous
    /// point.
    fn begin_stroke(&mut self, start: Point, point: Point, target: &mut StrokeTarget<'_>) -> Point {
        if point == start {
            self.record(Segment::dot(start), target);
        } else {
            self.record(Segment::new(start, point), target);
        }
        point
    }

    /// Records the segment to `point` and returns the new previous point.
    ///
    /// A point equal to the previous one records nothing.
    fn extend_stroke(
        &mut self,
        previous: Point,
        point: Point,
        target: &mut StrokeTarget<'_>,
    ) -> Point {
        if previous == point {
            trace!("Skipping coincident point");
        } else {
            self.record(Segment::new(previous, point), target);
        }
        point
    }

    /// Keeps the pen at the exit point and arms the leave deadline unless
    /// one is already pending.
    fn arm_leave(
        &mut self,
        pointer_id: PointerId,
        exit: Point,
        pending: Option<Instant>,
        now: Instant,
        target: &StrokeTarget<'_>,
    ) {
        let deadline = pending.unwrap_or_else(|| now + target.config.leave_timeout());
        debug!(
            "Pointer left surface; finishing in {:?} unless it returns",
            deadline.saturating_duration_since(now)
        );
        self.state = DrawingState::Drawing {
            pointer_id,
            previous: exit,
            leave_deadline: Some(deadline),
        };
    }

    fn record(&mut self, segment: Segment, target: &mut StrokeTarget<'_>) {
        self.session_segments += 1;
        target.emit(segment);
    }

    fn finish(&mut self, reason: EndReason, target: &StrokeTarget<'_>) -> SessionEnd {
        let segments = self.session_segments;
        let publish = match reason {
            EndReason::Cancelled => segments > 0,
            EndReason::Released | EndReason::LeaveTimeout => !target.recorder.is_empty(),
        };

        debug!(
            "Session finished ({reason:?}) with {segments} segments; path holds {}",
            target.recorder.len()
        );

        self.state = DrawingState::Idle;
        self.session_segments = 0;

        SessionEnd {
            reason,
            segments,
            publish,
        }
    }
}
