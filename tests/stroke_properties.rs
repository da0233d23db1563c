//! Property-based tests for stroke geometry and canvas history.
//!
//! Uses proptest to validate:
//! - Ribbons have two boundary points per sample on well-behaved paths
//! - Single-sample strokes reduce to one round cap
//! - Undo restores earlier stroke lists
//! - Clearing always composites to the bare background
//! - Every brush, soft wash included, renders identically frame after frame

use art_canvas::stroke::{CapShape, StrokeGeometry};
use art_canvas::{BrushKind, CanvasState, Color, FrameBuffer, Point};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const W: usize = 40;
const H: usize = 30;

fn canvas(seed: u64) -> CanvasState {
    CanvasState::with_rng(W, H, Color::WHITE, StdRng::seed_from_u64(seed))
}

/// Paths whose x strictly increases, so no tangent can vanish.
fn monotone_path() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((0.5f32..12.0, -20.0f32..20.0), 2..30).prop_map(|steps| {
        let mut x = -5.0;
        steps
            .into_iter()
            .map(|(dx, y)| {
                x += dx;
                (x, y + H as f32 / 2.0)
            })
            .collect()
    })
}

fn any_brush() -> impl Strategy<Value = BrushKind> {
    prop::sample::select(BrushKind::ALL.to_vec())
}

fn draw(canvas: &mut CanvasState, kind: BrushKind, width: f32, path: &[(f32, f32)]) -> Result<(), TestCaseError> {
    let h = canvas.begin_stroke(kind, width, Color::BLACK);
    for (t, (x, y)) in path.iter().enumerate() {
        canvas.append_sample(h, *x, *y, t as u64 * 16).map_err(|e| TestCaseError::fail(e.to_string()))?;
    }
    canvas.seal_stroke(h).map_err(|e| TestCaseError::fail(e.to_string()))
}

fn background() -> FrameBuffer {
    let mut fb = FrameBuffer::new(W, H);
    fb.fill(Color::WHITE.packed());
    fb
}

proptest! {
    /// Property: N well-separated samples give a 2N-point ribbon polygon
    #[test]
    fn prop_ribbon_has_two_points_per_sample(path in monotone_path(), width in 1.0f32..40.0) {
        let mut canvas = canvas(0);
        draw(&mut canvas, BrushKind::Pen, width, &path)?;
        let stroke = &canvas.strokes()[0];
        prop_assert_eq!(stroke.ribbon().polygon().len(), 2 * path.len());
    }

    /// Property: every offset point sits exactly half a width from its sample
    #[test]
    fn prop_offsets_are_half_width_away(path in monotone_path(), width in 1.0f32..40.0) {
        let mut canvas = canvas(0);
        draw(&mut canvas, BrushKind::Pen, width, &path)?;
        let ribbon = canvas.strokes()[0].ribbon();
        for ((x, y), (l, r)) in path.iter().zip(ribbon.left.iter().zip(&ribbon.right)) {
            let sample = Point::new(*x, *y);
            prop_assert!((sample.distance(*l) - width / 2.0).abs() < 1e-3);
            prop_assert!((sample.distance(*r) - width / 2.0).abs() < 1e-3);
        }
    }

    /// Property: a straight horizontal stroke is bounded by y = y0 ± width/2
    #[test]
    fn prop_horizontal_ribbon_on_offset_lines(
        y0 in -50.0f32..50.0,
        width in 1.0f32..40.0,
        n in 2usize..20,
    ) {
        let path: Vec<(f32, f32)> = (0..n).map(|i| (i as f32 * 10.0, y0)).collect();
        let mut canvas = canvas(0);
        draw(&mut canvas, BrushKind::Pen, width, &path)?;
        let ribbon = canvas.strokes()[0].ribbon();
        prop_assert!(ribbon.left.iter().all(|p| (p.y - (y0 + width / 2.0)).abs() < 1e-4));
        prop_assert!(ribbon.right.iter().all(|p| (p.y - (y0 - width / 2.0)).abs() < 1e-4));
    }

    /// Property: one sample renders as a single round cap of radius width/2
    #[test]
    fn prop_single_sample_is_one_cap(x in -10.0f32..50.0, y in -10.0f32..40.0, width in 1.0f32..50.0) {
        let mut canvas = canvas(0);
        draw(&mut canvas, BrushKind::Pen, width, &[(x, y)])?;
        let StrokeGeometry { polygon, caps } = canvas.strokes()[0].geometry();
        prop_assert!(polygon.is_none());
        prop_assert_eq!(caps.len(), 1);
        prop_assert_eq!(caps[0].center, Point::new(x, y));
        prop_assert_eq!(caps[0].radius, width / 2.0);
        prop_assert_eq!(caps[0].shape, CapShape::Round);
    }

    /// Property: undoing k strokes restores the list from before they were sealed
    #[test]
    fn prop_undo_restores_history(
        before in prop::collection::vec((any_brush(), monotone_path()), 0..4),
        after in prop::collection::vec((any_brush(), monotone_path()), 1..5),
    ) {
        let mut canvas = canvas(1);
        for (kind, path) in &before {
            draw(&mut canvas, *kind, 3.0, path)?;
        }
        let snapshot = canvas.strokes().to_vec();
        for (kind, path) in &after {
            draw(&mut canvas, *kind, 3.0, path)?;
        }
        for _ in 0..after.len() {
            prop_assert!(canvas.undo_last().is_some());
        }
        prop_assert_eq!(canvas.strokes(), snapshot.as_slice());
    }

    /// Property: clear wipes every trace of earlier history
    #[test]
    fn prop_clear_renders_background(
        strokes in prop::collection::vec((any_brush(), monotone_path(), 1.0f32..20.0), 0..5),
        seed in any::<u64>(),
    ) {
        let mut canvas = canvas(seed);
        for (kind, path, width) in &strokes {
            draw(&mut canvas, *kind, *width, path)?;
        }
        canvas.begin_stroke(BrushKind::Pen, 5.0, Color::BLACK);
        canvas.clear();
        let mut fb = FrameBuffer::new(W, H);
        canvas.render_frame(&mut fb);
        prop_assert_eq!(fb, background());
    }

    /// Property: a fixed stroke list composites the same pixels every frame
    #[test]
    fn prop_render_is_idempotent(
        strokes in prop::collection::vec((any_brush(), monotone_path(), 1.0f32..20.0), 1..5),
        seed in any::<u64>(),
    ) {
        let mut canvas = canvas(seed);
        for (kind, path, width) in &strokes {
            draw(&mut canvas, *kind, *width, path)?;
        }
        let mut first = FrameBuffer::new(W, H);
        let mut second = FrameBuffer::new(W, H);
        canvas.render_frame(&mut first);
        canvas.render_frame(&mut second);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn soft_brush_varies_only_within_its_footprint() {
    // Canvases seeded differently give the stroke different spreads, but
    // never outside the area the wash and its droplets can reach.
    let path = [(4.0, 15.0), (20.0, 15.0), (36.0, 15.0)];
    let render = |seed| {
        let mut canvas = canvas(seed);
        let h = canvas.begin_stroke(BrushKind::Soft, 6.0, Color::BLACK);
        for (t, (x, y)) in path.iter().enumerate() {
            canvas.append_sample(h, *x, *y, t as u64).unwrap();
        }
        canvas.seal_stroke(h).unwrap();
        let mut fb = FrameBuffer::new(W, H);
        canvas.render_frame(&mut fb);
        fb
    };
    let (a, b) = (render(11), render(12));
    // wash radius 3 plus spread jitter 1.2 and droplet radius up to 0.8 w
    let reach = 3.0 + 1.2 + 4.8 + 1.0;
    for y in 0..H {
        for x in 0..W {
            let far = (y as f32 + 0.5 - 15.0).abs() > reach;
            if far {
                assert_eq!(a.get(x, y), Some(Color::WHITE.packed()), "({x},{y})");
                assert_eq!(b.get(x, y), Some(Color::WHITE.packed()), "({x},{y})");
            }
        }
    }
    assert_ne!(a, background());
    assert_ne!(b, background());
}
