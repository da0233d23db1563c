//! Freehand drawing canvas: pointer samples become tangent-offset ribbon
//! strokes, composited every frame by one of a closed set of brushes.

pub mod brush;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod gamma;
pub mod geometry;
pub mod input;
pub mod raster;
pub mod stroke;
pub mod types;

pub use canvas::CanvasState;
pub use color::Color;
pub use error::{Error, Result};
pub use stroke::{BrushKind, Stroke, StrokeHandle};
pub use types::{FrameBuffer, Point, Sample};
