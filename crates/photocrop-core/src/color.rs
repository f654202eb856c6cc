//! Solid colors used for the background fill and preview decorations.
//!
//! Colors arrive from the page as CSS hex strings (`#rrggbb` or `#rgb`), the
//! format an `<input type="color">` produces.

use std::fmt;
use std::str::FromStr;

use image::{Rgb, Rgba};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned for color text that is not a hex triplet.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid color '{input}': {reason}")]
pub struct ColorError {
    pub input: String,
    pub reason: String,
}

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// Cyan accent used for the crop border and handle (`#06b6d4`).
    pub const ACCENT: Color = Color::new(0x06, 0xb6, 0xd4);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn parse_hex(input: &str) -> Result<Self, ColorError> {
        let parsed: Srgb<u8> = input.trim().parse().map_err(|e| ColorError {
            input: input.to_string(),
            reason: format!("{e}"),
        })?;
        Ok(Self::new(parsed.red, parsed.green, parsed.blue))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    /// RGBA pixel with the given opacity (0.0 to 1.0).
    pub fn to_rgba(self, alpha: f32) -> Rgba<u8> {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([self.r, self.g, self.b, a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
