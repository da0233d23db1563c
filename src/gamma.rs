// Table-driven sRGB <-> linear conversion for alpha compositing.
// Translucent brush marks are blended in linear light so soft edges and
// highlighter overlaps don't darken the way naive sRGB mixing does.

use crate::color::Color;

const LINEAR_STEPS: usize = 4096;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    to_linear: [f32; 256],
    // linear quantized to LINEAR_STEPS -> sRGB(0..255)
    to_srgb: [u8; LINEAR_STEPS],
}

impl GammaLut {
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; LINEAR_STEPS];
        let top = (LINEAR_STEPS - 1) as f32;
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / top;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * (LINEAR_STEPS - 1) as f32).round() as usize;
        self.to_srgb.get(idx).copied().unwrap_or(255)
    }

    /// Source-over of `src` onto the packed pixel `dst` with coverage `a`.
    pub fn blend(&self, dst: u32, src: Color, a: f32) -> u32 {
        if a <= 0.0 {
            return dst;
        }
        if a >= 1.0 {
            return src.packed();
        }
        let d = Color::from_packed(dst);
        let inv = 1.0 - a;
        let mix = |s: u8, d: u8| self.srgb(a * self.linear(s) + inv * self.linear(d));
        Color::rgb(mix(src.r, d.r), mix(src.g, d.g), mix(src.b, d.b)).packed()
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
