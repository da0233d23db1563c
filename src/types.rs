// Core value types shared by geometry, raster and the canvas.

/// A position on the canvas surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `self + dir * k`
    #[inline]
    pub fn offset(self, dir: (f32, f32), k: f32) -> Point {
        Point::new(self.x + dir.0 * k, self.y + dir.1 * k)
    }
}

/// One captured input sample: canvas-local position plus milliseconds since capture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub t: u64,
}

impl Sample {
    pub const fn new(x: f32, y: f32, t: u64) -> Self {
        Self { x, y, t }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,     // surface width in pixels
    pub height: usize,    // surface height in pixels
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB, what minifb presents
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, packed: u32) {
        self.pixels.fill(packed);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// Coverage in [0,1] per pixel for one shape union; 0 = untouched, 1 = fully painted.
/// Rasterizing every part of a brush mark into one mask before blending keeps
/// overlapping parts (ribbon + caps) from stacking alpha.
#[derive(Debug, Clone)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>, // length = width * height
    // inclusive (x0, y0, x1, y1) of every pixel touched since the last clear
    dirty: Option<(usize, usize, usize, usize)>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height], dirty: None }
    }

    pub fn for_surface(fb: &FrameBuffer) -> Self {
        Self::new(fb.width, fb.height)
    }

    /// Reset to zero coverage, touching only the dirty rows.
    pub fn clear(&mut self) {
        if let Some((x0, y0, x1, y1)) = self.dirty.take() {
            for y in y0..=y1 {
                let row = y * self.width;
                if let Some(cells) = self.alpha.get_mut(row + x0..=row + x1) {
                    cells.fill(0.0);
                }
            }
        }
    }

    /// Raise coverage at (x,y) to at least `a`; out-of-bounds pixels are ignored.
    #[inline]
    pub fn cover(&mut self, x: i32, y: i32, a: f32) {
        if x < 0 || y < 0 || a <= 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(cell) = self.alpha.get_mut(y * self.width + x) {
            if a > *cell {
                *cell = a.min(1.0);
            }
        }
        self.dirty = Some(match self.dirty {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    /// Bounding box of touched pixels, `None` when nothing was covered.
    pub fn dirty(&self) -> Option<(usize, usize, usize, usize)> {
        self.dirty
    }

    pub fn is_empty(&self) -> bool {
        self.dirty.is_none()
    }
}
