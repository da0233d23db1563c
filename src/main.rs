// Freehand drawing window.
// • Hold Left Mouse to draw with the current brush.
// • 1 pen, 2 soft wash, 3 highlighter, 4 eraser. [ and ] change the width.
// • Tab cycles the palette color. Ctrl/Cmd+Z undoes the last stroke.
// • C clears, S saves the artwork as PNG, ESC quits.

mod draw;

use std::time::{Duration, Instant};

use art_canvas::canvas::CanvasState;
use art_canvas::config::Config;
use art_canvas::error::Error;
use art_canvas::input::{BrushSettings, InputCapture, Viewport};
use art_canvas::types::FrameBuffer;
use draw::Drawer;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::load()?;
    let mut canvas = CanvasState::from_config(&config);
    let (w, h) = (canvas.width(), canvas.height());
    let mut drawer = Drawer::new("Art Canvas", w, h)?;

    // the surface we composite into and present every frame
    let mut screen = FrameBuffer::new(w, h);
    let mut input = InputCapture::new(
        Viewport::new(drawer.display_size(), (w, h)),
        BrushSettings::new(config.brush_kind, config.brush_width, config.brush_color),
    );

    info!(width = w, height = h, "canvas ready");

    let start = Instant::now();
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        // tools
        if let Some(kind) = drawer.brush_selected() {
            input.brush.kind = kind;
            info!(brush = %kind, "brush selected");
        }
        if let Some(step) = drawer.width_step() {
            input.brush.set_width(input.brush.width + step);
            debug!(width = input.brush.width, "brush width");
        }
        if drawer.next_color_pressed() {
            input.brush.color = input.brush.color.next_in_palette();
            info!(color = %input.brush.color, "color selected");
        }

        // history
        if drawer.undo_pressed() {
            canvas.undo_last();
        } else if drawer.clear_pressed() {
            canvas.clear();
            input.reset();
        }

        // pointer; the window may have been resized since the last frame
        input.viewport = Viewport::new(drawer.display_size(), (w, h));
        if let Some(event) = drawer.poll_pointer() {
            let t = start.elapsed().as_millis() as u64;
            if let Err(e) = input.handle(&mut canvas, event, t) {
                warn!("input rejected: {e}");
            }
        }

        if drawer.save_pressed() {
            match canvas.validate_content().and_then(|()| canvas.export_png(&config.export_path)) {
                Ok(()) => info!(path = %config.export_path.display(), "artwork ready for scoring"),
                Err(e) => warn!("not saved: {e}"),
            }
        }

        canvas.render_frame(&mut screen);
        drawer.draw_brush_preview(&mut screen, &input.brush, canvas.background());
        drawer.present(&screen)?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(fps = frames_this_second as f32 / secs, strokes = canvas.strokes().len(), "frame stats");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
