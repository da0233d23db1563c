use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Swatches offered by the toolbar, in toolbar order.
    pub const PALETTE: [Color; 9] = [
        Color::rgb(0x00, 0x00, 0x00),
        Color::rgb(0xE7, 0x4C, 0x3C),
        Color::rgb(0xF3, 0x9C, 0x12),
        Color::rgb(0xF1, 0xC4, 0x0F),
        Color::rgb(0x27, 0xAE, 0x60),
        Color::rgb(0x34, 0x98, 0xDB),
        Color::rgb(0x9B, 0x59, 0xB6),
        Color::rgb(0x8B, 0x45, 0x13),
        Color::rgb(0xFF, 0xFF, 0xFF),
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB.
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_packed(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }

    /// Next palette swatch after `self`; colors outside the palette start over at the first one.
    pub fn next_in_palette(self) -> Color {
        let pos = Self::PALETTE.iter().position(|c| *c == self);
        let next = pos.map_or(0, |i| (i + 1) % Self::PALETTE.len());
        Self::PALETTE[next]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            6 => Ok(Color::from_packed(value)),
            3 => {
                // #abc -> #aabbcc
                let expand = |nibble: u32| ((nibble & 0xF) * 0x11) as u8;
                Ok(Color::rgb(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            _ => Err(invalid()),
        }
    }
}
