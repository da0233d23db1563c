//! Strokes: one pointer-down to pointer-up gesture.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{self, Ribbon};
use crate::types::{Point, Sample};

/// Identifies a stroke issued by a [`crate::canvas::CanvasState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeHandle(pub(crate) u64);

impl fmt::Display for StrokeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of brushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrushKind {
    /// Solid opaque fill.
    #[default]
    Pen,
    /// Translucent wash that fades and thins along the stroke, with a random spread.
    Soft,
    /// Wide, half-transparent, flat-capped.
    Highlighter,
    /// Paints the background color over what's underneath.
    Eraser,
}

impl BrushKind {
    pub const ALL: [BrushKind; 4] = [BrushKind::Pen, BrushKind::Soft, BrushKind::Highlighter, BrushKind::Eraser];

    /// Width of the ribbon for a nominal brush width.
    pub fn ribbon_width(self, width: f32) -> f32 {
        match self {
            BrushKind::Highlighter => width * 2.0,
            BrushKind::Pen | BrushKind::Soft | BrushKind::Eraser => width,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Pen => "pen",
            BrushKind::Soft => "soft",
            BrushKind::Highlighter => "highlighter",
            BrushKind::Eraser => "eraser",
        }
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrushKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pen" => Ok(BrushKind::Pen),
            "soft" | "wash" | "watercolor" => Ok(BrushKind::Soft),
            "highlighter" => Ok(BrushKind::Highlighter),
            "eraser" => Ok(BrushKind::Eraser),
            other => Err(format!("unknown brush {other:?}")),
        }
    }
}

/// Style fixed when the stroke begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub kind: BrushKind,
    pub width: f32,
    pub color: Color,
}

impl StrokeStyle {
    pub fn new(kind: BrushKind, width: f32, color: Color) -> Self {
        Self { kind, width, color }
    }

    pub fn half_width(&self) -> f32 {
        self.kind.ribbon_width(self.width) * 0.5
    }
}

/// How an end of the stroke is closed off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapShape {
    Round,
    /// Square aligned with the unit direction of travel.
    Flat((f32, f32)),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cap {
    pub center: Point,
    pub radius: f32,
    pub shape: CapShape,
}

/// Everything a filled brush draws: the ribbon outline (if it encloses
/// anything) and the caps.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeGeometry {
    pub polygon: Option<Vec<Point>>,
    pub caps: Vec<Cap>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    handle: StrokeHandle,
    style: StrokeStyle,
    samples: Vec<Sample>,
    ribbon: Ribbon,
    sealed: bool,
    // fixes every random choice the brush makes, so each render matches the last
    seed: u64,
}

impl Stroke {
    pub fn new(handle: StrokeHandle, style: StrokeStyle, seed: u64) -> Self {
        Self { handle, style, samples: Vec::new(), ribbon: Ribbon::default(), sealed: false, seed }
    }

    pub fn handle(&self) -> StrokeHandle {
        self.handle
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn ribbon(&self) -> &Ribbon {
        &self.ribbon
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn path(&self) -> Vec<Point> {
        self.samples.iter().map(Sample::point).collect()
    }

    /// Append one sample and rebuild the ribbon from the whole path.
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if self.sealed {
            return Err(Error::StrokeClosed(self.handle));
        }
        self.samples.push(sample);
        self.ribbon = Ribbon::from_path(&self.path(), self.style.half_width());
        Ok(())
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    /// Ribbon polygon plus caps for the filled brushes.
    pub fn geometry(&self) -> StrokeGeometry {
        let path = self.path();
        let radius = self.style.half_width();
        let polygon = (!self.ribbon.is_degenerate()).then(|| self.ribbon.polygon());

        let centers = geometry::cap_centers(&path);
        let caps = match self.style.kind {
            BrushKind::Highlighter => {
                let (start_dir, end_dir) = geometry::end_directions(&path);
                centers
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        let dir = if i == 0 { start_dir } else { end_dir };
                        Cap { center: *c, radius, shape: CapShape::Flat(dir.unwrap_or((1.0, 0.0))) }
                    })
                    .collect()
            }
            _ => centers.iter().map(|c| Cap { center: *c, radius, shape: CapShape::Round }).collect(),
        };

        StrokeGeometry { polygon, caps }
    }
}
