//! Pointer and touch input, normalized into canvas operations.

use tracing::warn;

use crate::canvas::CanvasState;
use crate::color::Color;
use crate::error::Result;
use crate::stroke::{BrushKind, StrokeHandle};
use crate::types::Point;

/// Brush width range offered by the size control.
pub const MIN_BRUSH_WIDTH: f32 = 1.0;
pub const MAX_BRUSH_WIDTH: f32 = 50.0;

/// Pointer event in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Pointer left the drawing area; ends the stroke like `Up`.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerEvent {
    /// Touch maps to the same down/move/up sequence using only the first contact.
    /// A start or move without contacts carries no position and is dropped.
    pub fn from_touch(phase: TouchPhase, contacts: &[Point]) -> Option<Self> {
        match phase {
            TouchPhase::Start => contacts.first().map(|p| PointerEvent::Down(*p)),
            TouchPhase::Move => contacts.first().map(|p| PointerEvent::Move(*p)),
            TouchPhase::End | TouchPhase::Cancel => Some(PointerEvent::Up),
        }
    }
}

/// Maps displayed coordinates onto the backing surface, which may be a different size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub display_width: f32,
    pub display_height: f32,
    pub surface_width: f32,
    pub surface_height: f32,
}

impl Viewport {
    pub fn new(display: (usize, usize), surface: (usize, usize)) -> Self {
        Self {
            display_width: display.0 as f32,
            display_height: display.1 as f32,
            surface_width: surface.0 as f32,
            surface_height: surface.1 as f32,
        }
    }

    /// Identity mapping for a surface shown at its own size.
    pub fn unscaled(width: usize, height: usize) -> Self {
        Self::new((width, height), (width, height))
    }

    pub fn to_canvas(&self, p: Point) -> Point {
        let scale = |surface: f32, display: f32| if display > 0.0 { surface / display } else { 1.0 };
        Point::new(
            p.x * scale(self.surface_width, self.display_width),
            p.y * scale(self.surface_height, self.display_height),
        )
    }
}

/// Current tool settings used for the next stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub kind: BrushKind,
    pub width: f32,
    pub color: Color,
}

impl BrushSettings {
    pub fn new(kind: BrushKind, width: f32, color: Color) -> Self {
        Self { kind, width: clamp_width(width), color }
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = clamp_width(width);
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::new(BrushKind::Pen, 5.0, Color::BLACK)
    }
}

fn clamp_width(width: f32) -> f32 {
    // NaN falls to the minimum
    width.max(MIN_BRUSH_WIDTH).min(MAX_BRUSH_WIDTH)
}

/// Turns pointer events into strokes on a canvas. Every event is handled
/// synchronously: at most one sample is appended per call.
#[derive(Debug, Clone)]
pub struct InputCapture {
    pub viewport: Viewport,
    pub brush: BrushSettings,
    active: Option<StrokeHandle>,
}

impl InputCapture {
    pub fn new(viewport: Viewport, brush: BrushSettings) -> Self {
        Self { viewport, brush, active: None }
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Apply one event stamped `t` milliseconds after capture start.
    pub fn handle(&mut self, canvas: &mut CanvasState, event: PointerEvent, t: u64) -> Result<()> {
        match event {
            PointerEvent::Down(p) => {
                let handle = canvas.begin_stroke(self.brush.kind, self.brush.width, self.brush.color);
                self.active = Some(handle);
                let p = self.viewport.to_canvas(p);
                canvas.append_sample(handle, p.x, p.y, t)
            }
            PointerEvent::Move(p) => {
                // hover without a pressed button draws nothing
                let Some(handle) = self.active else {
                    return Ok(());
                };
                let p = self.viewport.to_canvas(p);
                canvas.append_sample(handle, p.x, p.y, t).inspect_err(|e| {
                    warn!("dropping sample for stroke {handle}: {e}");
                    self.active = None;
                })
            }
            PointerEvent::Up | PointerEvent::Leave => match self.active.take() {
                Some(handle) => canvas.seal_stroke(handle),
                None => Ok(()),
            },
        }
    }

    /// Forget the active stroke, e.g. after the canvas was cleared under it.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::Error;

    fn canvas() -> CanvasState {
        CanvasState::with_rng(100, 100, Color::WHITE, StdRng::seed_from_u64(1))
    }

    #[test]
    fn down_move_up_builds_one_stroke() {
        let mut canvas = canvas();
        let mut input = InputCapture::new(Viewport::unscaled(100, 100), BrushSettings::default());
        input.handle(&mut canvas, PointerEvent::Down(Point::new(1.0, 2.0)), 0).unwrap();
        input.handle(&mut canvas, PointerEvent::Move(Point::new(3.0, 4.0)), 16).unwrap();
        assert!(input.is_drawing());
        input.handle(&mut canvas, PointerEvent::Up, 32).unwrap();
        assert!(!input.is_drawing());

        let stroke = &canvas.strokes()[0];
        assert_eq!(stroke.samples().len(), 2);
        assert_eq!(stroke.samples()[1].t, 16);
        assert_eq!(stroke.style().kind, BrushKind::Pen);
    }

    #[test]
    fn hover_and_stray_up_are_ignored() {
        let mut canvas = canvas();
        let mut input = InputCapture::new(Viewport::unscaled(100, 100), BrushSettings::default());
        input.handle(&mut canvas, PointerEvent::Move(Point::new(3.0, 4.0)), 0).unwrap();
        input.handle(&mut canvas, PointerEvent::Leave, 1).unwrap();
        assert!(canvas.strokes().is_empty());
        assert!(canvas.current().is_none());
    }

    #[test]
    fn leave_seals_like_up() {
        let mut canvas = canvas();
        let mut input = InputCapture::new(Viewport::unscaled(100, 100), BrushSettings::default());
        input.handle(&mut canvas, PointerEvent::Down(Point::new(1.0, 2.0)), 0).unwrap();
        input.handle(&mut canvas, PointerEvent::Leave, 5).unwrap();
        assert_eq!(canvas.strokes().len(), 1);
    }

    #[test]
    fn display_scaling_maps_to_surface() {
        let vp = Viewport::new((400, 300), (800, 600));
        assert_eq!(vp.to_canvas(Point::new(100.0, 150.0)), Point::new(200.0, 300.0));
        let degenerate = Viewport::new((0, 0), (800, 600));
        assert_eq!(degenerate.to_canvas(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn touch_uses_first_contact_only() {
        let contacts = [Point::new(5.0, 6.0), Point::new(50.0, 60.0)];
        assert_eq!(PointerEvent::from_touch(TouchPhase::Start, &contacts), Some(PointerEvent::Down(contacts[0])));
        assert_eq!(PointerEvent::from_touch(TouchPhase::Move, &contacts), Some(PointerEvent::Move(contacts[0])));
        assert_eq!(PointerEvent::from_touch(TouchPhase::End, &[]), Some(PointerEvent::Up));
        assert_eq!(PointerEvent::from_touch(TouchPhase::Cancel, &contacts), Some(PointerEvent::Up));
        assert_eq!(PointerEvent::from_touch(TouchPhase::Move, &[]), None);
    }

    #[test]
    fn brush_width_is_clamped() {
        let mut brush = BrushSettings::new(BrushKind::Soft, 500.0, Color::BLACK);
        assert_eq!(brush.width, MAX_BRUSH_WIDTH);
        brush.set_width(0.0);
        assert_eq!(brush.width, MIN_BRUSH_WIDTH);
        brush.set_width(f32::NAN);
        assert_eq!(brush.width, MIN_BRUSH_WIDTH);
    }

    #[test]
    fn clear_mid_stroke_drops_the_gesture() {
        let mut canvas = canvas();
        let mut input = InputCapture::new(Viewport::unscaled(100, 100), BrushSettings::default());
        input.handle(&mut canvas, PointerEvent::Down(Point::new(1.0, 2.0)), 0).unwrap();
        canvas.clear();
        let err = input.handle(&mut canvas, PointerEvent::Move(Point::new(2.0, 2.0)), 1).unwrap_err();
        assert!(matches!(err, Error::StrokeClosed(_)));
        assert!(!input.is_drawing());
        input.handle(&mut canvas, PointerEvent::Up, 2).unwrap();
    }
}
