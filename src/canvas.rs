//! Caller-owned drawing state: the sealed stroke list, at most one open stroke,
//! and everything needed to composite them.

use std::io::Cursor;
use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, ImageFormat, RgbImage};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::brush::RenderContext;
use crate::color::Color;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::gamma::GammaLut;
use crate::stroke::{BrushKind, Stroke, StrokeHandle, StrokeStyle};
use crate::types::{FrameBuffer, Sample};

/// Narrowest stroke a canvas accepts.
pub const MIN_WIDTH: f32 = 1.0;

pub struct CanvasState {
    width: usize,
    height: usize,
    background: Color,
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
    next_handle: u64,
    lut: GammaLut,
    rng: Box<dyn RngCore>,
}

impl CanvasState {
    /// Empty canvas with an entropy-seeded random source.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self::with_rng(width, height, background, StdRng::from_entropy())
    }

    /// Empty canvas whose strokes take their random seeds from `rng`.
    pub fn with_rng(width: usize, height: usize, background: Color, rng: impl RngCore + 'static) -> Self {
        Self {
            width,
            height,
            background,
            strokes: Vec::new(),
            current: None,
            next_handle: 0,
            lut: GammaLut::new(),
            rng: Box::new(rng),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.seed {
            Some(seed) => Self::with_rng(config.width, config.height, config.background, StdRng::seed_from_u64(seed)),
            None => Self::new(config.width, config.height, config.background),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Sealed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    /// Start a new open stroke. An already-open stroke is sealed first.
    pub fn begin_stroke(&mut self, kind: BrushKind, width: f32, color: Color) -> StrokeHandle {
        if let Some(open) = self.current.as_ref().map(Stroke::handle) {
            debug!(stroke = %open, "sealing open stroke before starting a new one");
            self.seal_current();
        }
        let handle = StrokeHandle(self.next_handle);
        self.next_handle += 1;
        let style = StrokeStyle::new(kind, width.max(MIN_WIDTH), color);
        let seed = self.rng.next_u64();
        debug!(stroke = %handle, brush = %kind, width = style.width, color = %color, "begin stroke");
        self.current = Some(Stroke::new(handle, style, seed));
        handle
    }

    /// Append one sample to the open stroke named by `handle`.
    pub fn append_sample(&mut self, handle: StrokeHandle, x: f32, y: f32, t: u64) -> Result<()> {
        let stroke = self.open_stroke(handle)?;
        stroke.push(Sample::new(x, y, t))
    }

    /// Seal the open stroke and move it onto the render list.
    pub fn seal_stroke(&mut self, handle: StrokeHandle) -> Result<()> {
        self.open_stroke(handle)?;
        self.seal_current();
        Ok(())
    }

    /// Remove the most recently sealed stroke. No-op on an empty list.
    pub fn undo_last(&mut self) -> Option<Stroke> {
        let undone = self.strokes.pop();
        if let Some(stroke) = &undone {
            info!(stroke = %stroke.handle(), remaining = self.strokes.len(), "undo");
        }
        undone
    }

    /// Drop every sealed stroke and any open one.
    pub fn clear(&mut self) {
        info!(strokes = self.strokes.len(), open = self.current.is_some(), "clear canvas");
        self.strokes.clear();
        self.current = None;
    }

    /// Background, then sealed strokes in order, then the open stroke on top.
    pub fn render_frame(&self, surface: &mut FrameBuffer) {
        surface.fill(self.background.packed());
        let mut ctx = RenderContext::new(surface, self.background, &self.lut);
        for stroke in self.strokes.iter().chain(self.current.as_ref()) {
            stroke.render(surface, &mut ctx);
        }
    }

    /// Composite at canvas size and encode as PNG. Matches what `render_frame` shows.
    pub fn export_raster(&self) -> Result<Vec<u8>> {
        let surface = self.snapshot();
        let bytes = encode_png(&surface)?;
        info!(bytes = bytes.len(), strokes = self.strokes.len(), "exported raster");
        Ok(bytes)
    }

    /// `export_raster` written to `path`.
    pub fn export_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.export_raster()?;
        std::fs::write(path.as_ref(), bytes)?;
        info!(path = %path.as_ref().display(), "saved artwork");
        Ok(())
    }

    /// True when any composited pixel differs from the background.
    pub fn has_content(&self) -> bool {
        let background = self.background.packed();
        self.snapshot().pixels.iter().any(|p| *p != background)
    }

    /// Refuse to hand an empty canvas to the scorer.
    pub fn validate_content(&self) -> Result<()> {
        if self.has_content() { Ok(()) } else { Err(Error::EmptyCanvas) }
    }

    fn snapshot(&self) -> FrameBuffer {
        let mut surface = FrameBuffer::new(self.width, self.height);
        self.render_frame(&mut surface);
        surface
    }

    fn open_stroke(&mut self, handle: StrokeHandle) -> Result<&mut Stroke> {
        match self.current.as_mut() {
            Some(stroke) if stroke.handle() == handle => Ok(stroke),
            _ if handle.0 < self.next_handle => Err(Error::StrokeClosed(handle)),
            _ => Err(Error::UnknownStroke(handle)),
        }
    }

    fn seal_current(&mut self) {
        if let Some(mut stroke) = self.current.take() {
            stroke.seal();
            debug!(stroke = %stroke.handle(), samples = stroke.samples().len(), "seal stroke");
            self.strokes.push(stroke);
        }
    }
}

/// Encode a 0x00RRGGBB surface as PNG bytes.
pub fn encode_png(fb: &FrameBuffer) -> Result<Vec<u8>> {
    let rgb: Vec<u8> = fb
        .pixels
        .iter()
        .flat_map(|px| {
            let c = Color::from_packed(*px);
            [c.r, c.g, c.b]
        })
        .collect();
    let img = RgbImage::from_raw(fb.width as u32, fb.height as u32, rgb).ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
    })?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
