use super::*;
use crate::config::PadConfig;
use crate::draw::{Canvas, Point, Segment};
use crate::input::events::{PointerEvent, PointerEventKind, PointerId};
use crate::path::PathRecorder;
use std::time::{Duration, Instant};

const PEN: PointerId = PointerId::MOUSE;

fn ev(kind: PointerEventKind, x: i32, y: i32) -> PointerEvent {
    PointerEvent::new(kind, PEN, Point::new(x, y))
}

fn seg(mx: i32, my: i32, lx: i32, ly: i32) -> Segment {
    Segment::new(Point::new(mx, my), Point::new(lx, ly))
}

/// Drives a machine against its own recorder without a surface.
struct Harness {
    machine: DrawingStateMachine,
    recorder: PathRecorder,
    config: PadConfig,
    t0: Instant,
}

impl Harness {
    fn new() -> Self {
        Self {
            machine: DrawingStateMachine::new(),
            recorder: PathRecorder::new(),
            config: PadConfig::default(),
            t0: Instant::now(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    fn send(&mut self, ms: u64, event: PointerEvent) -> Option<SessionEnd> {
        let now = self.at(ms);
        let mut target = StrokeTarget {
            recorder: &mut self.recorder,
            canvas: None,
            config: &self.config,
        };
        self.machine.handle(&event, now, &mut target)
    }

    fn poll(&mut self, ms: u64) -> Option<SessionEnd> {
        let now = self.at(ms);
        let mut target = StrokeTarget {
            recorder: &mut self.recorder,
            canvas: None,
            config: &self.config,
        };
        self.machine.poll(now, &mut target)
    }

    fn interrupt(&mut self) -> Option<SessionEnd> {
        let mut target = StrokeTarget {
            recorder: &mut self.recorder,
            canvas: None,
            config: &self.config,
        };
        self.machine.interrupt(&mut target)
    }
}

#[test]
fn start_arms_without_recording() {
    let mut h = Harness::new();
    assert!(h.send(0, ev(PointerEventKind::Start, 10, 10)).is_none());

    assert!(matches!(h.machine.state(), DrawingState::Armed { .. }));
    assert!(h.recorder.is_empty());

    let session = h.machine.session();
    assert!(session.armed);
    assert_eq!(session.active_pointer_id, Some(PEN));
    assert_eq!(session.previous_point, None);
}

#[test]
fn stationary_first_move_records_dot_then_real_move() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 10, 10));
    h.send(20, ev(PointerEventKind::Move, 12, 14));
    let end = h.send(30, ev(PointerEventKind::End, 12, 14));

    assert_eq!(
        h.recorder.current_path(),
        &[seg(10, 10, 10, 11), seg(10, 10, 12, 14)]
    );
    let end = end.unwrap();
    assert_eq!(end.reason, EndReason::Released);
    assert_eq!(end.segments, 2);
    assert!(end.publish);
    assert_eq!(*h.machine.state(), DrawingState::Idle);
}

#[test]
fn first_move_elsewhere_records_segment_from_start() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 15, 12));
    h.send(20, ev(PointerEventKind::Move, 20, 14));

    assert_eq!(
        h.recorder.current_path(),
        &[seg(10, 10, 15, 12), seg(15, 12, 20, 14)]
    );
    assert_eq!(h.machine.session().previous_point, Some(Point::new(20, 14)));
}

#[test]
fn tap_records_a_dot() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 7, 3));
    let end = h.send(5, ev(PointerEventKind::End, 7, 3)).unwrap();

    assert_eq!(h.recorder.current_path(), &[Segment::dot(Point::new(7, 3))]);
    assert_eq!(end.segments, 1);
    assert!(end.publish);
}

#[test]
fn coincident_moves_are_deduplicated() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 0, 0));
    h.send(1, ev(PointerEventKind::Move, 4, 4));
    h.send(2, ev(PointerEventKind::Move, 4, 4));
    h.send(3, ev(PointerEventKind::Move, 4, 4));
    h.send(4, ev(PointerEventKind::Move, 6, 4));

    assert_eq!(
        h.recorder.current_path(),
        &[seg(0, 0, 4, 4), seg(4, 4, 6, 4)]
    );
}

#[test]
fn segments_accumulate_across_sessions() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 0, 0));
    h.send(1, ev(PointerEventKind::Move, 5, 5));
    h.send(2, ev(PointerEventKind::End, 5, 5));

    h.send(10, ev(PointerEventKind::Start, 20, 20));
    h.send(11, ev(PointerEventKind::Move, 25, 20));
    let end = h.send(12, ev(PointerEventKind::End, 25, 20)).unwrap();

    assert_eq!(h.recorder.len(), 2);
    assert_eq!(end.segments, 1);
}

#[test]
fn cancel_before_movement_does_not_publish() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 3, 3));
    let end = h.send(1, ev(PointerEventKind::Cancel, 3, 3)).unwrap();

    assert_eq!(end.reason, EndReason::Cancelled);
    assert!(!end.publish);
    assert!(h.recorder.is_empty());
    assert_eq!(*h.machine.state(), DrawingState::Idle);
}

#[test]
fn cancel_after_drawing_publishes() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 3, 3));
    h.send(1, ev(PointerEventKind::Move, 8, 3));
    let end = h.send(2, ev(PointerEventKind::Cancel, 8, 3)).unwrap();

    assert!(end.publish);
    assert_eq!(h.recorder.len(), 1);
}

#[test]
fn events_from_other_pointers_are_ignored() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 0, 0));

    let intruder = PointerId(7);
    let moved = PointerEvent::new(PointerEventKind::Move, intruder, Point::new(9, 9));
    let ended = PointerEvent::new(PointerEventKind::End, intruder, Point::new(9, 9));
    assert!(h.send(1, moved).is_none());
    assert!(h.send(2, ended).is_none());

    assert!(h.recorder.is_empty());
    assert_eq!(h.machine.session().active_pointer_id, Some(PEN));
}

#[test]
fn start_during_session_is_ignored() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 0, 0));
    h.send(1, ev(PointerEventKind::Move, 2, 2));
    h.send(2, ev(PointerEventKind::Start, 50, 50));
    h.send(3, ev(PointerEventKind::Move, 4, 2));

    assert_eq!(
        h.recorder.current_path(),
        &[seg(0, 0, 2, 2), seg(2, 2, 4, 2)]
    );
}

#[test]
fn moves_without_session_are_ignored() {
    let mut h = Harness::new();
    assert!(h.send(0, ev(PointerEventKind::Move, 1, 1)).is_none());
    assert!(h.send(1, ev(PointerEventKind::End, 1, 1)).is_none());
    assert!(h.recorder.is_empty());
}

#[test]
fn reentry_before_timeout_continues_session() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 20, 10));
    assert!(h.send(20, ev(PointerEventKind::Leave, 30, 10)).is_none());

    let deadline = h.machine.next_deadline().unwrap();
    assert_eq!(deadline, h.at(520));
    assert_eq!(h.machine.session().previous_point, Some(Point::new(30, 10)));

    // Back before the deadline: the stroke resumes from the exit point.
    assert!(h.send(300, ev(PointerEventKind::Move, 28, 12)).is_none());
    assert!(h.send(310, ev(PointerEventKind::Move, 25, 15)).is_none());
    assert_eq!(h.machine.next_deadline(), None);
    assert!(h.poll(1000).is_none());

    let end = h.send(1100, ev(PointerEventKind::End, 25, 15)).unwrap();
    assert_eq!(end.reason, EndReason::Released);
    assert_eq!(
        h.recorder.current_path(),
        &[
            seg(10, 10, 20, 10),
            seg(20, 10, 30, 10),
            seg(30, 10, 28, 12),
            seg(28, 12, 25, 15),
        ]
    );
}

#[test]
fn leave_timeout_finishes_session_once() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 20, 10));
    h.send(20, ev(PointerEventKind::Leave, 30, 10));

    assert!(h.poll(519).is_none());
    let end = h.poll(520).unwrap();
    assert_eq!(end.reason, EndReason::LeaveTimeout);
    assert!(end.publish);
    assert_eq!(*h.machine.state(), DrawingState::Idle);

    assert!(h.poll(2000).is_none());
    assert_eq!(h.machine.next_deadline(), None);
}

#[test]
fn expired_deadline_is_honored_by_next_event() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 20, 10));
    h.send(20, ev(PointerEventKind::Leave, 30, 10));

    // No poll happened; the late move must not extend the old session.
    let end = h.send(900, ev(PointerEventKind::Move, 40, 40)).unwrap();
    assert_eq!(end.reason, EndReason::LeaveTimeout);
    assert_eq!(h.recorder.len(), 2);
    assert_eq!(*h.machine.state(), DrawingState::Idle);
}

#[test]
fn repeated_leave_keeps_first_deadline() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 20, 10));
    h.send(20, ev(PointerEventKind::Leave, 30, 10));
    h.send(200, ev(PointerEventKind::Leave, 35, 10));

    assert_eq!(h.machine.next_deadline(), Some(h.at(520)));
    assert_eq!(h.recorder.current_path().last(), Some(&seg(30, 10, 35, 10)));
    assert_eq!(h.recorder.len(), 3);
}

#[test]
fn enter_cancels_pending_deadline() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(10, ev(PointerEventKind::Move, 20, 10));
    h.send(20, ev(PointerEventKind::Leave, 30, 10));
    h.send(100, ev(PointerEventKind::Enter, 29, 10));

    assert_eq!(h.machine.next_deadline(), None);
    assert!(h.poll(5000).is_none());
    assert!(matches!(h.machine.state(), DrawingState::Drawing { .. }));
}

#[test]
fn leave_timeout_follows_config() {
    let mut h = Harness::new();
    h.config = PadConfig::default().with_leave_timeout(Duration::from_millis(1000));
    h.send(0, ev(PointerEventKind::Start, 10, 10));
    h.send(0, ev(PointerEventKind::Leave, 12, 10));

    assert_eq!(h.machine.next_deadline(), Some(h.at(1000)));
    assert_eq!(h.recorder.current_path(), &[seg(10, 10, 12, 10)]);
}

#[test]
fn disabled_machine_ignores_input() {
    let mut h = Harness::new();
    h.machine = DrawingStateMachine::disabled();
    assert!(!h.machine.is_enabled());

    h.send(0, ev(PointerEventKind::Start, 1, 1));
    h.send(1, ev(PointerEventKind::Move, 5, 5));
    assert!(h.send(2, ev(PointerEventKind::End, 5, 5)).is_none());
    assert!(h.recorder.is_empty());
    assert_eq!(*h.machine.state(), DrawingState::Idle);
}

#[test]
fn reset_discards_open_session() {
    let mut h = Harness::new();
    h.send(0, ev(PointerEventKind::Start, 1, 1));
    h.send(1, ev(PointerEventKind::Move, 5, 5));
    h.send(2, ev(PointerEventKind::Leave, 9, 5));

    h.machine.reset();
    assert_eq!(*h.machine.state(), DrawingState::Idle);
    assert_eq!(h.machine.next_deadline(), None);
    assert!(h.poll(10_000).is_none());
}

#[test]
fn interrupt_finishes_open_session() {
    let mut h = Harness::new();
    assert!(h.interrupt().is_none());

    h.send(0, ev(PointerEventKind::Start, 1, 1));
    let end = h.interrupt().unwrap();
    assert!(!end.publish);

    h.send(10, ev(PointerEventKind::Start, 1, 1));
    h.send(20, ev(PointerEventKind::Move, 5, 5));
    let end = h.interrupt().unwrap();
    assert_eq!(end.segments, 1);
    assert!(end.publish);
    assert_eq!(*h.machine.state(), DrawingState::Idle);
}

#[test]
fn segments_are_drawn_on_the_canvas() {
    let canvas = Canvas::new(40, 20).unwrap();
    let config = PadConfig::default();
    let mut recorder = PathRecorder::new();
    let mut machine = DrawingStateMachine::new();
    let now = Instant::now();

    let before = canvas.snapshot().unwrap().pixel(10, 10);
    {
        let mut target = StrokeTarget {
            recorder: &mut recorder,
            canvas: Some(&canvas),
            config: &config,
        };
        machine.handle(&ev(PointerEventKind::Start, 2, 10), now, &mut target);
        machine.handle(&ev(PointerEventKind::Move, 30, 10), now, &mut target);
    }

    let after = canvas.snapshot().unwrap().pixel(10, 10);
    assert_ne!(before, after);
    assert_eq!(recorder.len(), 1);
}
