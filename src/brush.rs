// Per-brush rendering of a stroke onto a surface.
// Strokes are never mutated here; everything a brush needs beyond the stroke
// itself (background color, gamma table, scratch mask) comes in through
// RenderContext. Random effects draw from a generator seeded by the stroke, so
// a stroke renders the same pixels every frame.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::gamma::GammaLut;
use crate::raster::{fill_disc, fill_polygon, fill_segment, fill_square, paint};
use crate::stroke::{BrushKind, CapShape, Stroke, StrokeGeometry};
use crate::types::{FrameBuffer, Mask, Point};

pub const HIGHLIGHTER_ALPHA: f32 = 0.5;

// Soft brush: alpha and width ease from the first value to the last over SOFT_RAMP samples.
pub const SOFT_ALPHA_START: f32 = 0.7;
pub const SOFT_ALPHA_END: f32 = 0.2;
pub const SOFT_WIDTH_FALLOFF: f32 = 0.3;
pub const SOFT_RAMP: f32 = 24.0;

// Spread droplets along long soft segments.
const SPREAD_MIN_SEGMENT: f32 = 4.0;
const SPREAD_SPACING: f32 = 3.0;
const SPREAD_JITTER: f32 = 0.4;
const SPREAD_ALPHA: f32 = 0.12;

pub struct RenderContext<'a> {
    pub background: Color,
    pub lut: &'a GammaLut,
    scratch: Mask,
}

impl<'a> RenderContext<'a> {
    pub fn new(fb: &FrameBuffer, background: Color, lut: &'a GammaLut) -> Self {
        Self { background, lut, scratch: Mask::for_surface(fb) }
    }
}

/// Progress along a soft stroke for the segment ending at sample `i`, capped at 1.
pub fn soft_progress(i: usize) -> f32 {
    (i as f32 / SOFT_RAMP).min(1.0)
}

pub fn soft_alpha(i: usize) -> f32 {
    SOFT_ALPHA_START - (SOFT_ALPHA_START - SOFT_ALPHA_END) * soft_progress(i)
}

pub fn soft_width(width: f32, i: usize) -> f32 {
    width * (1.0 - SOFT_WIDTH_FALLOFF * soft_progress(i))
}

impl Stroke {
    /// Draw this stroke onto `fb`.
    pub fn render(&self, fb: &mut FrameBuffer, ctx: &mut RenderContext<'_>) {
        if self.samples().is_empty() {
            return;
        }
        let style = *self.style();
        match style.kind {
            BrushKind::Pen => fill_geometry(fb, ctx, &self.geometry(), style.color, 1.0),
            BrushKind::Highlighter => fill_geometry(fb, ctx, &self.geometry(), style.color, HIGHLIGHTER_ALPHA),
            BrushKind::Eraser => {
                let background = ctx.background;
                fill_geometry(fb, ctx, &self.geometry(), background, 1.0)
            }
            BrushKind::Soft => render_soft(fb, ctx, &self.path(), style.width, style.color, self.seed()),
        }
    }
}

/// Ribbon and caps go into one mask so the union is blended exactly once.
fn fill_geometry(fb: &mut FrameBuffer, ctx: &mut RenderContext<'_>, geometry: &StrokeGeometry, color: Color, alpha: f32) {
    let mask = &mut ctx.scratch;
    mask.clear();
    if let Some(polygon) = &geometry.polygon {
        fill_polygon(mask, polygon);
    }
    for cap in &geometry.caps {
        match cap.shape {
            CapShape::Round => fill_disc(mask, cap.center, cap.radius),
            CapShape::Flat(dir) => fill_square(mask, cap.center, dir, cap.radius),
        }
    }
    paint(fb, mask, color, alpha, ctx.lut);
}

/// Segment-by-segment wash: each segment is blended on its own, fading and
/// thinning with its index, then sprinkled with spread droplets.
fn render_soft(fb: &mut FrameBuffer, ctx: &mut RenderContext<'_>, path: &[Point], width: f32, color: Color, seed: u64) {
    if let [only] = path {
        ctx.scratch.clear();
        fill_disc(&mut ctx.scratch, *only, width * 0.5);
        paint(fb, &ctx.scratch, color, soft_alpha(0), ctx.lut);
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    for (i, seg) in path.windows(2).enumerate() {
        let (a, b) = (seg[0], seg[1]);
        let index = i + 1;
        ctx.scratch.clear();
        fill_segment(&mut ctx.scratch, a, b, soft_width(width, index) * 0.5);
        paint(fb, &ctx.scratch, color, soft_alpha(index), ctx.lut);
        spread(fb, ctx, &mut rng, a, b, width, color);
    }
}

fn spread(
    fb: &mut FrameBuffer,
    ctx: &mut RenderContext<'_>,
    rng: &mut StdRng,
    a: Point,
    b: Point,
    width: f32,
    color: Color,
) {
    let distance = a.distance(b);
    if distance <= SPREAD_MIN_SEGMENT {
        return;
    }
    let drops = (distance / SPREAD_SPACING).floor() as usize;
    for k in 0..drops {
        let t = k as f32 / drops as f32;
        let jx = rng.gen_range(-0.5f32..0.5) * width * SPREAD_JITTER;
        let jy = rng.gen_range(-0.5f32..0.5) * width * SPREAD_JITTER;
        let center = Point::new(a.x + (b.x - a.x) * t + jx, a.y + (b.y - a.y) * t + jy);
        let radius = rng.gen_range(0.3f32..0.8) * width;
        let alpha = SPREAD_ALPHA * (1.0 - t) * rng.gen_range(0.2f32..1.0);

        ctx.scratch.clear();
        fill_disc(&mut ctx.scratch, center, radius);
        paint(fb, &ctx.scratch, color, alpha, ctx.lut);
    }
}
