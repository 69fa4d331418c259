use eframe_kaleido::command::DrawCommand;
use eframe_kaleido::{BrushStyle, CommandBuffer, Engine, Frame, Point};

const TOLERANCE: f64 = 1e-6;

fn engine(sections: u32) -> Engine {
    let mut engine = Engine::new(sections, (800.0, 800.0), BrushStyle::default());
    engine.tick(); // drop the init background so pending holds only stroke output
    engine
}

/// Collects (start, control, end) triples from a buffer's path commands.
fn segments(buffer: &CommandBuffer) -> Vec<(Point, Point, Point)> {
    let mut out = Vec::new();
    let mut cursor = Point::ZERO;
    for command in buffer.commands() {
        match *command {
            DrawCommand::MoveTo(p) => cursor = p,
            DrawCommand::QuadTo { control, to } => {
                out.push((cursor, control, to));
                cursor = to;
            }
            _ => {}
        }
    }
    out
}

fn approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

#[test]
fn segment_count_is_moves_times_sections_plus_release() {
    for sections in [1u32, 3, 4, 8] {
        let mut engine = engine(sections);
        engine.pointer_down(Point::new(200.0, 200.0));

        let moves = 7;
        for i in 0..moves {
            engine.pointer_move(Point::new(200.0 + i as f64 * 5.0, 210.0));
        }
        assert_eq!(
            engine.pending().segment_count(),
            moves * sections as usize,
            "{sections} sections, before release"
        );

        engine.pointer_up(Point::new(300.0, 250.0));
        assert_eq!(
            engine.pending().segment_count(),
            (moves + 1) * sections as usize,
            "{sections} sections, after release"
        );
    }
}

#[test]
fn release_without_press_changes_nothing() {
    let mut engine = engine(6);
    let before = engine.pending().commands().len();
    engine.pointer_up(Point::new(100.0, 100.0));
    assert_eq!(engine.pending().commands().len(), before);
    assert!(!engine.is_drawing());
}

#[test]
fn four_section_stroke_mirrors_about_canvas_center() {
    let mut engine = engine(4);
    engine.pointer_down(Point::new(400.0, 300.0));
    engine.pointer_move(Point::new(400.0, 500.0));

    let segments = segments(engine.pending());
    assert_eq!(segments.len(), 4);

    // Rotating copy i back by -i*90 about the center must recover copy 0.
    let center = Point::new(400.0, 400.0);
    let (start0, control0, end0) = segments[0];
    for (i, &(start, control, end)) in segments.iter().enumerate() {
        let back = Frame::new(center, -(i as f64) * 90.0);
        assert!(approx_eq(back.place(start), start0), "copy {i} start");
        assert!(approx_eq(back.place(control), control0), "copy {i} control");
        assert!(approx_eq(back.place(end), end0), "copy {i} end");
    }
}

#[test]
fn smoothing_runs_through_midpoints() {
    let mut engine = engine(1);
    let a = Point::new(100.0, 100.0);
    let b = Point::new(120.0, 100.0);
    let c = Point::new(120.0, 140.0);

    engine.pointer_down(a);
    engine.pointer_move(b);
    engine.pointer_move(c);

    let segments = segments(engine.pending());
    assert_eq!(segments.len(), 2);

    // First segment: from the down point through it to midpoint(a, b).
    assert!(approx_eq(segments[0].0, a));
    assert!(approx_eq(segments[0].1, a));
    assert!(approx_eq(segments[0].2, Point::midpoint(a, b)));

    // Second: from midpoint(a, b) with the raw sample b as control.
    assert!(approx_eq(segments[1].0, Point::midpoint(a, b)));
    assert!(approx_eq(segments[1].1, b));
    assert!(approx_eq(segments[1].2, Point::midpoint(b, c)));

    // Consecutive segments share an endpoint: the curve is continuous.
    assert!(approx_eq(segments[0].2, segments[1].0));
}

#[test]
fn final_segment_reaches_the_release_point() {
    let mut engine = engine(1);
    let a = Point::new(50.0, 50.0);
    let b = Point::new(60.0, 50.0);
    let release = Point::new(70.0, 60.0);

    engine.pointer_down(a);
    engine.pointer_move(b);
    engine.pointer_up(release);

    let segments = segments(engine.pending());
    let last = segments.last().copied().expect("release segment");
    assert!(approx_eq(last.0, Point::midpoint(a, b)));
    assert!(approx_eq(last.1, b));
    assert!(approx_eq(last.2, release));
    assert!(!engine.is_drawing());
}
