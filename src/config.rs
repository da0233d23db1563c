use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::stroke::BrushKind;

/// Largest canvas side accepted from the environment.
pub const MAX_DIMENSION: usize = 8192;

pub struct Config {
    pub width: usize,
    pub height: usize,
    pub brush_kind: BrushKind,
    pub brush_width: f32,
    pub brush_color: Color,
    pub background: Color,
    pub export_path: PathBuf,
    pub seed: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` reads the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            width: dimension(&lookup, "CANVAS_WIDTH", "800")?,
            height: dimension(&lookup, "CANVAS_HEIGHT", "600")?,
            brush_kind: try_load(&lookup, "BRUSH_KIND", "pen")?,
            brush_width: try_load(&lookup, "BRUSH_WIDTH", "5")?,
            brush_color: try_load(&lookup, "BRUSH_COLOR", "#000000")?,
            background: try_load(&lookup, "CANVAS_BACKGROUND", "#ffffff")?,
            export_path: try_load(&lookup, "EXPORT_PATH", "artwork.png")?,
            seed: lookup("CANVAS_SEED").map(|raw| parse("CANVAS_SEED", &raw)).transpose()?,
        })
    }
}

fn try_load<T: FromStr>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse(key, &raw)
}

fn dimension(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<usize> {
    let value: usize = try_load(lookup, key, default)?;
    if (1..=MAX_DIMENSION).contains(&value) {
        Ok(value)
    } else {
        warn!("Invalid {key} value: {value} outside 1..={MAX_DIMENSION}");
        Err(Error::Config { key: key.to_string(), reason: format!("{value} is outside 1..={MAX_DIMENSION}") })
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        Error::Config { key: key.to_string(), reason: e.to_string() }
    })
}
