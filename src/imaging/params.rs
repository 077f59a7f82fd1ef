//! Parameter types for sheet rendering.
//!
//! These structs describe *what* to draw, not *how*. They are the interface
//! between [`operations`](super::operations), which turns an arrangement into
//! concrete rectangles, and the [`backend`](super::backend), which decodes,
//! composites, and encodes. Tests swap in a mock backend and inspect the
//! parameters directly.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 90). Clamped on construction.
//! - [`Color`]: background fill for transparent photo pixels, parsed from `#rrggbb` or `#rgb`.
//! - [`RasterSheetParams`]: page canvas in pixels plus one rounded rectangle per copy.
//! - [`DocumentSheetParams`]: page in points plus one document rectangle per copy.

use crate::export::DocumentRect;
use crate::units::Points;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("colour '{0}' must be #rgb or #rrggbb")]
    Format(String),
}

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError::Format(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize, len: usize| -> Result<u8, ColorError> {
            let part = &hex[i * len..(i + 1) * len];
            let value = u8::from_str_radix(part, 16).map_err(|_| err())?;
            // #abc expands each digit: a → aa
            Ok(if len == 1 { value * 17 } else { value })
        };
        let len = match hex.len() {
            3 => 1,
            6 => 2,
            _ => return Err(err()),
        };
        Ok(Color {
            r: channel(0, len)?,
            g: channel(1, len)?,
            b: channel(2, len)?,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A copy's position on the raster canvas, rounded to whole pixels.
///
/// Positions may be negative when the block overhangs the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRect {
    pub x: i64,
    pub y: i64,
}

/// Parameters for compositing a sheet image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSheetParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Size every copy is cropped to.
    pub photo_width: u32,
    pub photo_height: u32,
    pub positions: Vec<RasterRect>,
    pub background: Color,
    pub quality: Quality,
}

/// Parameters for assembling a printable document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSheetParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub page_width: Points,
    pub page_height: Points,
    /// Pixel size of the embedded photo raster.
    pub image_width: u32,
    pub image_height: u32,
    pub rects: Vec<DocumentRect>,
    pub background: Color,
    /// Identical pages to emit.
    pub sheets: u32,
}
