//! Page and photo size presets.
//!
//! A [`PhysicalSize`] is always millimetres. A page preset resolves to a
//! [`PageSizeDescriptor`] that carries the same rectangle in both pixel and
//! point space, so the layout code and the document export never convert
//! millimetres themselves.
//!
//! ## Page presets
//!
//! | Name | Size (mm) |
//! |---|---|
//! | `A3` | 297 × 420 |
//! | `A4` | 210 × 297 |
//! | `A5` | 148 × 210 |
//! | `Letter` | 215.9 × 279.4 |
//! | `4x6` | 102 × 152 |
//! | `5x7` | 127 × 178 |
//! | `Custom` | user-defined (default 100 × 150) |

use crate::units::{Pixels, Points, Resolution};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("unknown page size '{0}' (expected one of: {names})", names = PagePreset::names().join(", "))]
    UnknownPreset(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseSizeError {
    #[error("size '{0}' must look like WIDTHxHEIGHT in millimetres, e.g. 35x45")]
    Format(String),
    #[error("'{0}' is not a number")]
    Number(String),
}

/// A width × height in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
}

impl PhysicalSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl fmt::Display for PhysicalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.width, self.height)
    }
}

/// Parses `35x45`, `35 x 45`, `35.5X45`.
impl FromStr for PhysicalSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (w, h) = lower
            .split_once('x')
            .ok_or_else(|| ParseSizeError::Format(s.to_string()))?;
        let parse = |part: &str| -> Result<f64, ParseSizeError> {
            let part = part.trim().trim_end_matches("mm").trim();
            part.parse::<f64>()
                .map_err(|_| ParseSizeError::Number(part.to_string()))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: Pixels,
    pub height: Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSize {
    pub width: Points,
    pub height: Points,
}

/// A page resolved into both coordinate spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSizeDescriptor {
    pub name: String,
    pub pixel_size: PixelSize,
    pub point_size: PointSize,
}

impl PageSizeDescriptor {
    /// Derive a descriptor from millimetres. Deterministic for a given resolution.
    pub fn from_physical(name: impl Into<String>, size: PhysicalSize, res: &Resolution) -> Self {
        Self {
            name: name.into(),
            pixel_size: PixelSize {
                width: res.pixels(size.width),
                height: res.pixels(size.height),
            },
            point_size: PointSize {
                width: res.points(size.width),
                height: res.points(size.height),
            },
        }
    }
}

/// The named page sizes offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PagePreset {
    A3,
    A4,
    A5,
    Letter,
    #[serde(rename = "4x6")]
    Photo4x6,
    #[serde(rename = "5x7")]
    Photo5x7,
    Custom,
}

impl PagePreset {
    pub const ALL: [PagePreset; 7] = [
        PagePreset::A3,
        PagePreset::A4,
        PagePreset::A5,
        PagePreset::Letter,
        PagePreset::Photo4x6,
        PagePreset::Photo5x7,
        PagePreset::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PagePreset::A3 => "A3",
            PagePreset::A4 => "A4",
            PagePreset::A5 => "A5",
            PagePreset::Letter => "Letter",
            PagePreset::Photo4x6 => "4x6",
            PagePreset::Photo5x7 => "5x7",
            PagePreset::Custom => "Custom",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }

    /// Fixed millimetre size; `None` for [`PagePreset::Custom`].
    pub fn fixed_size(self) -> Option<PhysicalSize> {
        match self {
            PagePreset::A3 => Some(PhysicalSize::new(297.0, 420.0)),
            PagePreset::A4 => Some(PhysicalSize::new(210.0, 297.0)),
            PagePreset::A5 => Some(PhysicalSize::new(148.0, 210.0)),
            PagePreset::Letter => Some(PhysicalSize::new(215.9, 279.4)),
            PagePreset::Photo4x6 => Some(PhysicalSize::new(102.0, 152.0)),
            PagePreset::Photo5x7 => Some(PhysicalSize::new(127.0, 178.0)),
            PagePreset::Custom => None,
        }
    }
}

impl fmt::Display for PagePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PagePreset {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PageError::UnknownPreset(s.to_string()))
    }
}

/// Fixed presets plus the one user-editable custom page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRegistry {
    custom: PhysicalSize,
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new(PhysicalSize::new(100.0, 150.0))
    }
}

impl PageRegistry {
    pub fn new(custom: PhysicalSize) -> Self {
        Self { custom }
    }

    pub fn custom(&self) -> PhysicalSize {
        self.custom
    }

    /// Replace the custom size. Descriptors resolved afterwards reflect it.
    pub fn set_custom(&mut self, size: PhysicalSize) {
        self.custom = size;
    }

    pub fn physical(&self, preset: PagePreset) -> PhysicalSize {
        preset.fixed_size().unwrap_or(self.custom)
    }

    pub fn resolve(&self, preset: PagePreset, res: &Resolution) -> PageSizeDescriptor {
        PageSizeDescriptor::from_physical(preset.name(), self.physical(preset), res)
    }

    pub fn resolve_name(&self, name: &str, res: &Resolution) -> Result<PageSizeDescriptor, PageError> {
        Ok(self.resolve(name.parse()?, res))
    }

    /// Every preset, in declaration order.
    pub fn all(&self, res: &Resolution) -> Vec<(PagePreset, PageSizeDescriptor)> {
        PagePreset::ALL
            .into_iter()
            .map(|p| (p, self.resolve(p, res)))
            .collect()
    }
}

/// Common document photo sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoPreset {
    pub name: &'static str,
    pub description: &'static str,
    width_mm: u32,
    height_mm: u32,
}

impl PhotoPreset {
    pub fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.width_mm as f64, self.height_mm as f64)
    }

    pub fn find(name: &str) -> Option<&'static PhotoPreset> {
        PHOTO_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

pub const PHOTO_PRESETS: &[PhotoPreset] = &[
    PhotoPreset {
        name: "passport",
        description: "Passport (35 x 45 mm)",
        width_mm: 35,
        height_mm: 45,
    },
    PhotoPreset {
        name: "visa",
        description: "US visa, 2 x 2 in (51 x 51 mm)",
        width_mm: 51,
        height_mm: 51,
    },
    PhotoPreset {
        name: "one-inch",
        description: "One-inch ID (25 x 35 mm)",
        width_mm: 25,
        height_mm: 35,
    },
    PhotoPreset {
        name: "two-inch",
        description: "Two-inch ID (35 x 49 mm)",
        width_mm: 35,
        height_mm: 49,
    },
    PhotoPreset {
        name: "id-card",
        description: "ID card (30 x 40 mm)",
        width_mm: 30,
        height_mm: 40,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_resolves_in_both_spaces() {
        let page = PageRegistry::default().resolve(PagePreset::A4, &Resolution::default());
        assert_eq!(page.name, "A4");
        assert!((page.pixel_size.width.get() - 2480.315).abs() < 1e-3);
        assert!((page.pixel_size.height.get() - 3507.874).abs() < 1e-3);
        assert!((page.point_size.width.get() - 595.276).abs() < 1e-3);
        assert!((page.point_size.height.get() - 841.89).abs() < 1e-3);
    }

    #[test]
    fn preset_names_parse_case_insensitively() {
        assert_eq!("a4".parse::<PagePreset>().unwrap(), PagePreset::A4);
        assert_eq!("LETTER".parse::<PagePreset>().unwrap(), PagePreset::Letter);
        assert_eq!("4X6".parse::<PagePreset>().unwrap(), PagePreset::Photo4x6);
        assert_eq!(" custom ".parse::<PagePreset>().unwrap(), PagePreset::Custom);
    }

    #[test]
    fn unknown_preset_is_error() {
        let err = "B5".parse::<PagePreset>().unwrap_err();
        assert_eq!(err, PageError::UnknownPreset("B5".into()));
        assert!(err.to_string().contains("A4"));
    }

    #[test]
    fn custom_page_tracks_updates() {
        let res = Resolution::default();
        let mut registry = PageRegistry::default();
        let before = registry.resolve(PagePreset::Custom, &res);

        registry.set_custom(PhysicalSize::new(50.8, 25.4));
        let after = registry.resolve(PagePreset::Custom, &res);

        assert_ne!(before, after);
        assert!((after.pixel_size.width.get() - 600.0).abs() < 1e-9);
        assert!((after.point_size.height.get() - 72.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_presets_ignore_custom() {
        let res = Resolution::default();
        let mut registry = PageRegistry::default();
        let a4 = registry.resolve(PagePreset::A4, &res);
        registry.set_custom(PhysicalSize::new(10.0, 10.0));
        assert_eq!(registry.resolve(PagePreset::A4, &res), a4);
    }

    #[test]
    fn all_lists_every_preset_in_order() {
        let all = PageRegistry::default().all(&Resolution::default());
        let names: Vec<&str> = all.iter().map(|(_, d)| d.name.as_str()).collect();
        assert_eq!(names, vec!["A3", "A4", "A5", "Letter", "4x6", "5x7", "Custom"]);
    }

    #[test]
    fn resolve_name_reports_unknown() {
        let registry = PageRegistry::default();
        assert!(registry.resolve_name("A4", &Resolution::default()).is_ok());
        assert!(registry.resolve_name("tabloid", &Resolution::default()).is_err());
    }

    #[test]
    fn parse_physical_size() {
        assert_eq!("35x45".parse::<PhysicalSize>().unwrap(), PhysicalSize::new(35.0, 45.0));
        assert_eq!(
            " 35.5 X 45mm ".parse::<PhysicalSize>().unwrap(),
            PhysicalSize::new(35.5, 45.0)
        );
    }

    #[test]
    fn parse_physical_size_errors() {
        assert!(matches!("35".parse::<PhysicalSize>(), Err(ParseSizeError::Format(_))));
        assert!(matches!("axb".parse::<PhysicalSize>(), Err(ParseSizeError::Number(_))));
    }

    #[test]
    fn physical_size_validity() {
        assert!(PhysicalSize::new(35.0, 45.0).is_valid());
        assert!(!PhysicalSize::new(0.0, 45.0).is_valid());
        assert!(!PhysicalSize::new(35.0, -1.0).is_valid());
        assert!(!PhysicalSize::new(f64::NAN, 45.0).is_valid());
    }

    #[test]
    fn photo_presets_lookup() {
        let passport = PhotoPreset::find("Passport").unwrap();
        assert_eq!(passport.size(), PhysicalSize::new(35.0, 45.0));
        assert_eq!(PhotoPreset::find("visa").unwrap().size(), PhysicalSize::new(51.0, 51.0));
        assert!(PhotoPreset::find("stamp").is_none());
    }
}
