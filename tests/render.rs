use cairo::ImageSurface;
use sigpad::config::PadConfig;
use sigpad::draw::{Point, Segment};
use sigpad::input::{
    MouseButton, MouseInput, MousePhase, PenInput, PenPhase, RawInput, StaticGeometry,
};
use sigpad::sink::{FileSink, MemorySink};
use sigpad::SignaturePad;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const WHITE_PIXEL: u32 = 0xFFFF_FFFF;

fn mouse(phase: MousePhase, x: f64, y: f64) -> RawInput {
    RawInput::Mouse(MouseInput {
        phase,
        button: MouseButton::Left,
        page_x: x,
        page_y: y,
    })
}

fn pen(phase: PenPhase, x: f64, y: f64, coalesced: Vec<[f64; 2]>) -> RawInput {
    RawInput::Pen(PenInput {
        phase,
        pointer_id: 9,
        is_primary: true,
        button: MouseButton::Left,
        page_x: x,
        page_y: y,
        coalesced,
    })
}

/// Signs a zig-zag with the mouse and returns the pad.
fn hand_signed_pad() -> SignaturePad {
    let mut pad = SignaturePad::new(PadConfig::default(), 198, 55);
    let mut geometry = StaticGeometry::default();
    let t0 = Instant::now();

    let stroke = [(20.0, 20.0), (40.0, 30.0), (60.0, 12.0), (90.0, 40.0)];
    pad.handle_input(&mouse(MousePhase::Down, 20.0, 20.0), &mut geometry, t0);
    for (i, (x, y)) in stroke.iter().enumerate() {
        let now = t0 + Duration::from_millis(10 * i as u64);
        pad.handle_input(&mouse(MousePhase::Move, *x, *y), &mut geometry, now);
    }
    pad.handle_input(
        &mouse(MousePhase::Up, 90.0, 40.0),
        &mut geometry,
        t0 + Duration::from_millis(100),
    );
    pad
}

#[test]
fn regenerated_signature_is_pixel_identical() {
    let original = hand_signed_pad();
    let text = original.signature_string().to_string();

    let mut copy = SignaturePad::new(PadConfig::default(), 198, 55);
    copy.regenerate_str(&text).unwrap();

    assert_eq!(copy.signature(), original.signature());
    let a = original.canvas().unwrap().snapshot().unwrap();
    let b = copy.canvas().unwrap().snapshot().unwrap();
    assert!(a == b, "regenerated pixels differ from the hand-drawn ones");
}

#[test]
fn regenerate_replaces_previous_mark() {
    let mut pad = hand_signed_pad();
    pad.regenerate(&[Segment::new(Point::new(150, 10), Point::new(180, 10))]);

    let fresh = {
        let mut fresh = SignaturePad::new(PadConfig::default(), 198, 55);
        fresh.regenerate(&[Segment::new(Point::new(150, 10), Point::new(180, 10))]);
        fresh
    };

    assert_eq!(pad.signature().len(), 1);
    assert!(
        pad.canvas().unwrap().snapshot().unwrap() == fresh.canvas().unwrap().snapshot().unwrap()
    );
}

#[test]
fn clear_restores_blank_surface() {
    let mut pad = hand_signed_pad();
    let blank = SignaturePad::new(PadConfig::default(), 198, 55);

    pad.clear();

    assert!(pad.signature().is_empty());
    assert!(
        pad.canvas().unwrap().snapshot().unwrap() == blank.canvas().unwrap().snapshot().unwrap()
    );
}

#[test]
fn exported_png_omits_guideline() {
    let pad = SignaturePad::new(PadConfig::default(), 198, 55);
    let live = pad.canvas().unwrap().snapshot().unwrap();
    assert_ne!(live.pixel(30, 35), Some(WHITE_PIXEL));

    let mut bytes = Vec::new();
    pad.export_png(&mut bytes).unwrap();

    let mut image = ImageSurface::create_from_png(&mut bytes.as_slice()).unwrap();
    assert_eq!(image.width(), 198);
    assert_eq!(image.height(), 55);

    let stride = image.stride() as usize;
    let data = image.data().unwrap();
    let offset = 35 * stride + 30 * 4;
    let pixel = u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]);
    assert_eq!(pixel, WHITE_PIXEL);
}

#[test]
fn pen_coalesced_samples_become_segments() {
    let sink = MemorySink::new();
    let mut pad =
        SignaturePad::new(PadConfig::default(), 198, 55).with_sink(Box::new(sink.clone()));
    let mut geometry = StaticGeometry::at(10.0, 10.0);
    let now = Instant::now();

    pad.handle_input(&pen(PenPhase::Down, 20.0, 20.0, Vec::new()), &mut geometry, now);
    pad.handle_input(
        &pen(PenPhase::Move, 40.0, 20.0, vec![[25.0, 20.0], [30.0, 20.0]]),
        &mut geometry,
        now,
    );
    pad.handle_input(&pen(PenPhase::Up, 40.0, 20.0, Vec::new()), &mut geometry, now);

    assert_eq!(
        pad.signature_string(),
        r#"[{"mx":10,"my":10,"lx":15,"ly":10},{"mx":15,"my":10,"lx":20,"ly":10},{"mx":20,"my":10,"lx":30,"ly":10}]"#
    );
    assert_eq!(sink.writes().len(), 1);
}

#[test]
fn file_sink_tracks_publishes_and_clear() {
    let temp = TempDir::new().unwrap();
    let field = temp.path().join("signature.json");
    let mut pad = SignaturePad::new(PadConfig::default(), 198, 55)
        .with_sink(Box::new(FileSink::new(&field)));
    let mut geometry = StaticGeometry::default();
    let now = Instant::now();

    pad.handle_input(&mouse(MousePhase::Down, 5.0, 5.0), &mut geometry, now);
    pad.handle_input(&mouse(MousePhase::Up, 5.0, 5.0), &mut geometry, now);
    assert_eq!(
        std::fs::read_to_string(&field).unwrap(),
        r#"[{"mx":5,"my":5,"lx":5,"ly":6}]"#
    );

    pad.clear();
    assert_eq!(std::fs::read_to_string(&field).unwrap(), "");
}
