// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

use crate::stroke::StrokeHandle;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// The handle names a stroke that was sealed, undone, or discarded by a clear.
    #[error("Stroke {0} is no longer open")]
    StrokeClosed(StrokeHandle),

    /// The handle was never issued by this canvas.
    #[error("Unknown stroke {0}")]
    UnknownStroke(StrokeHandle),

    #[error("Invalid color {0:?}")]
    InvalidColor(String),

    #[error("Canvas has nothing drawn on it")]
    EmptyCanvas,

    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {key}: {reason}")]
    Config { key: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
