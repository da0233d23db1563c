// Software rasterization into a coverage Mask, then one blend into the FrameBuffer.
// Coverage is sampled at pixel centers (no anti-aliasing), so the same shapes
// always produce the same pixels.
use crate::color::Color;
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Mask, Point};

/// Fill a closed polygon with the nonzero winding rule.
/// Vertices may lie anywhere; rows and columns outside the mask are clipped.
pub fn fill_polygon(mask: &mut Mask, poly: &[Point]) {
    if poly.len() < 3 || mask.width == 0 || mask.height == 0 {
        return;
    }
    let (min_y, max_y) = poly
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }
    let y0 = (min_y - 0.5).ceil().max(0.0) as i32;
    let y1 = ((max_y - 0.5).floor() as i32).min(mask.height as i32 - 1);

    // (x, winding delta) per edge crossing; reused across rows
    let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(poly.len());
    for y in y0..=y1 {
        let yc = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in poly.iter().enumerate() {
            let b = &poly[(i + 1) % poly.len()];
            let dir = if a.y <= yc && b.y > yc {
                1
            } else if b.y <= yc && a.y > yc {
                -1
            } else {
                continue;
            };
            let t = (yc - a.y) / (b.y - a.y);
            crossings.push((a.x + t * (b.x - a.x), dir));
        }
        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }
            // pixels whose center lies in [start, end)
            let x0 = (pair[0].0 - 0.5).ceil().max(0.0) as i32;
            let x1 = ((pair[1].0 - 0.5).ceil() as i32).min(mask.width as i32);
            for x in x0..x1 {
                mask.cover(x, y, 1.0);
            }
        }
    }
}

/// Fill every pixel whose center lies within `radius` of `center`.
pub fn fill_disc(mask: &mut Mask, center: Point, radius: f32) {
    if radius <= 0.0 || !radius.is_finite() {
        return;
    }
    let r2 = radius * radius;
    let x0 = (center.x - radius - 0.5).floor().max(0.0) as i32;
    let y0 = (center.y - radius - 0.5).floor().max(0.0) as i32;
    let x1 = ((center.x + radius).ceil() as i32).min(mask.width as i32 - 1);
    let y1 = ((center.y + radius).ceil() as i32).min(mask.height as i32 - 1);
    for y in y0..=y1 {
        let dy = y as f32 + 0.5 - center.y;
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - center.x;
            if dx * dx + dy * dy <= r2 {
                mask.cover(x, y, 1.0);
            }
        }
    }
}

/// Thick line from `a` to `b` with round ends.
pub fn fill_segment(mask: &mut Mask, a: Point, b: Point, half_width: f32) {
    fill_disc(mask, a, half_width);
    fill_disc(mask, b, half_width);
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return;
    }
    let n = (-dy / len, dx / len);
    let quad = [
        a.offset(n, half_width),
        b.offset(n, half_width),
        b.offset(n, -half_width),
        a.offset(n, -half_width),
    ];
    fill_polygon(mask, &quad);
}

/// Square of side `2 * half` centered on `center`, aligned with unit direction `dir`.
pub fn fill_square(mask: &mut Mask, center: Point, dir: (f32, f32), half: f32) {
    let n = (-dir.1, dir.0);
    let corner = |s: f32, t: f32| center.offset(dir, s * half).offset(n, t * half);
    let square = [corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)];
    fill_polygon(mask, &square);
}

/// Blend `color` into the surface wherever the mask has coverage, scaled by `alpha`.
pub fn paint(fb: &mut FrameBuffer, mask: &Mask, color: Color, alpha: f32, lut: &GammaLut) {
    if alpha <= 0.0 || fb.width != mask.width || fb.height != mask.height {
        return;
    }
    let Some((x0, y0, x1, y1)) = mask.dirty() else {
        return;
    };
    for y in y0..=y1 {
        let row = y * fb.width;
        let (Some(pixels), Some(coverage)) =
            (fb.pixels.get_mut(row + x0..=row + x1), mask.alpha.get(row + x0..=row + x1))
        else {
            continue;
        };
        for (px, cov) in pixels.iter_mut().zip(coverage) {
            if *cov > 0.0 {
                *px = lut.blend(*px, color, alpha * cov);
            }
        }
    }
}
