// Window + pointer/keyboard polling for the drawing app.
// minifb only exposes polled state, so pointer edges (press, drag, release,
// leaving the window) are reconstructed here frame by frame.

use art_canvas::color::Color;
use art_canvas::error::Error;
use art_canvas::gamma::GammaLut;
use art_canvas::input::{BrushSettings, PointerEvent};
use art_canvas::raster::{fill_disc, paint};
use art_canvas::stroke::BrushKind;
use art_canvas::types::{FrameBuffer, Mask, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointer {
    Idle,
    Drawing,
    // left the window mid-stroke; waits for the button to be released
    Suspended,
}

pub struct Drawer {
    window: Window,
    pointer: Pointer,
    last_pos: Option<(f32, f32)>,
    lut: GammaLut,
}

impl Drawer {
    /// Open a resizable window showing a `width` x `height` surface.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window =
            Window::new(title, width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, pointer: Pointer::Idle, last_pos: None, lut: GammaLut::new() })
    }

    /// Push the composited frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current window size; differs from the surface once the user resizes.
    pub fn display_size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Pointer edge since the previous frame, in window coordinates.
    pub fn poll_pointer(&mut self) -> Option<PointerEvent> {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pos = self.window.get_mouse_pos(MouseMode::Discard);

        let (next, event) = match (self.pointer, pos, down) {
            (Pointer::Drawing, None, _) => (Pointer::Suspended, Some(PointerEvent::Leave)),
            (Pointer::Drawing, Some(_), false) => (Pointer::Idle, Some(PointerEvent::Up)),
            (Pointer::Drawing, Some((x, y)), true) if self.last_pos != Some((x, y)) => {
                (Pointer::Drawing, Some(PointerEvent::Move(Point::new(x, y))))
            }
            (Pointer::Idle, Some((x, y)), true) => (Pointer::Drawing, Some(PointerEvent::Down(Point::new(x, y)))),
            (Pointer::Suspended, _, false) => (Pointer::Idle, None),
            (state, _, _) => (state, None),
        };
        self.pointer = next;
        self.last_pos = pos;
        event
    }

    fn command_held(&self) -> bool {
        [Key::LeftCtrl, Key::RightCtrl, Key::LeftSuper, Key::RightSuper]
            .into_iter()
            .any(|k| self.window.is_key_down(k))
    }

    /// Ctrl/Cmd + Z without Shift.
    pub fn undo_pressed(&self) -> bool {
        let shift = self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift);
        self.command_held() && !shift && self.window.is_key_pressed(Key::Z, KeyRepeat::No)
    }

    /// Plain C clears the canvas; Ctrl/Cmd+C does not.
    pub fn clear_pressed(&self) -> bool {
        plain_shortcut(self.window.is_key_pressed(Key::C, KeyRepeat::No), self.command_held())
    }

    /// S saves the artwork.
    pub fn save_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// Tab cycles through the palette.
    pub fn next_color_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Tab, KeyRepeat::No)
    }

    /// 1-4 pick pen, soft, highlighter, eraser.
    pub fn brush_selected(&self) -> Option<BrushKind> {
        [Key::Key1, Key::Key2, Key::Key3, Key::Key4]
            .into_iter()
            .zip(BrushKind::ALL)
            .find(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .map(|(_, kind)| kind)
    }

    /// `[` shrinks, `]` grows the brush; held keys repeat.
    pub fn width_step(&self) -> Option<f32> {
        if self.window.is_key_pressed(Key::LeftBracket, KeyRepeat::Yes) {
            Some(-1.0)
        } else if self.window.is_key_pressed(Key::RightBracket, KeyRepeat::Yes) {
            Some(1.0)
        } else {
            None
        }
    }

    /// Corner swatch showing the next stroke's color and size.
    pub fn draw_brush_preview(&self, fb: &mut FrameBuffer, brush: &BrushSettings, background: Color) {
        let mut mask = Mask::for_surface(fb);
        let radius = brush.kind.ribbon_width(brush.width) * 0.5;
        let center = Point::new(radius + 8.0, fb.height as f32 - radius - 8.0);
        // ring in the opposite shade so a white swatch still shows on white
        let ring = if background.packed() > 0x80_80_80 { Color::BLACK } else { Color::WHITE };
        fill_disc(&mut mask, center, radius + 1.5);
        paint(fb, &mask, ring, 1.0, &self.lut);
        mask.clear();
        fill_disc(&mut mask, center, radius);
        let fill = if brush.kind == BrushKind::Eraser { background } else { brush.color };
        paint(fb, &mask, fill, 1.0, &self.lut);
    }
}

/// Single-letter tools fire only without Ctrl/Super, leaving those chords to the system.
fn plain_shortcut(pressed: bool, command_held: bool) -> bool {
    pressed && !command_held
}
