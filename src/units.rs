//! Physical-to-device unit conversion.
//!
//! Two coordinate spaces exist downstream of a millimetre measurement:
//!
//! | Space | Unit | Origin | Used by |
//! |---|---|---|---|
//! | Preview / raster | [`Pixels`] | top-left, y down | arrangement, preview, raster export |
//! | Document | [`Points`] | bottom-left, y up | PDF export |
//!
//! Both are distinct newtypes so a pixel value can never be handed to code
//! expecting points. The densities come from an explicit [`Resolution`];
//! nothing in the crate reads a global DPI.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

macro_rules! unit {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);

            pub fn get(self) -> f64 {
                self.0
            }

            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        /// Ratio of two lengths in the same space.
        impl Div for $name {
            type Output = f64;
            fn div(self, rhs: Self) -> f64 {
                self.0 / rhs.0
            }
        }
    };
}

unit! {
    /// A length in preview/raster pixel space.
    Pixels
}

unit! {
    /// A length in document point space (1/72 in at the default density).
    Points
}

/// Output densities for the two coordinate spaces.
///
/// Fixed for the lifetime of a run and not user-configurable. The binary
/// uses [`Resolution::default`]; library callers may inject another value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Pixels per inch used for the preview and raster export.
    pub screen_dpi: f64,
    /// Points per inch used for the document export.
    pub document_dpi: f64,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            screen_dpi: 300.0,
            document_dpi: 72.0,
        }
    }
}

impl Resolution {
    pub fn pixels(&self, mm: f64) -> Pixels {
        mm_to_pixels(mm, self.screen_dpi)
    }

    pub fn points(&self, mm: f64) -> Points {
        mm_to_points(mm, self.document_dpi)
    }
}

/// Convert millimetres to pixels at `screen_dpi`.
///
/// Total over all inputs: zero or negative millimetres give non-positive pixels.
///
/// ```
/// # use idsheet::units::{mm_to_pixels, Pixels};
/// assert_eq!(mm_to_pixels(25.4, 300.0), Pixels(300.0));
/// ```
pub fn mm_to_pixels(mm: f64, screen_dpi: f64) -> Pixels {
    Pixels(mm / MM_PER_INCH * screen_dpi)
}

/// Convert millimetres to document points at `document_dpi`.
pub fn mm_to_points(mm: f64, document_dpi: f64) -> Points {
    Points(mm / MM_PER_INCH * document_dpi)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn one_inch_is_screen_dpi_pixels() {
        assert!((mm_to_pixels(25.4, 300.0).get() - 300.0).abs() < EPS);
        assert!((mm_to_pixels(25.4, 96.0).get() - 96.0).abs() < EPS);
    }

    #[test]
    fn one_inch_is_document_dpi_points() {
        assert!((mm_to_points(25.4, 72.0).get() - 72.0).abs() < EPS);
    }

    #[test]
    fn a4_width_in_both_spaces() {
        // 210mm = 8.2677in
        assert!((mm_to_pixels(210.0, 300.0).get() - 2480.314_96).abs() < 1e-4);
        assert!((mm_to_points(210.0, 72.0).get() - 595.275_59).abs() < 1e-4);
    }

    #[test]
    fn non_positive_input_is_not_rejected() {
        assert_eq!(mm_to_pixels(0.0, 300.0), Pixels(0.0));
        assert!(mm_to_pixels(-10.0, 300.0).get() < 0.0);
    }

    #[test]
    fn resolution_defaults() {
        let res = Resolution::default();
        assert_eq!(res.screen_dpi, 300.0);
        assert_eq!(res.document_dpi, 72.0);
        assert!((res.points(25.4).get() - 72.0).abs() < EPS);
    }

    #[test]
    fn alternate_resolution_is_injectable() {
        let res = Resolution {
            screen_dpi: 150.0,
            document_dpi: 144.0,
        };
        assert!((res.pixels(50.8).get() - 300.0).abs() < EPS);
        assert!((res.points(50.8).get() - 288.0).abs() < EPS);
    }

    #[test]
    fn unit_arithmetic() {
        let a = Pixels(10.0);
        let b = Pixels(4.0);
        assert_eq!(a + b, Pixels(14.0));
        assert_eq!(a - b, Pixels(6.0));
        assert_eq!(a * 2.0, Pixels(20.0));
        assert_eq!(a / 2.0, Pixels(5.0));
        assert_eq!(a / b, 2.5);
        assert_eq!(a.max(b), a);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn units_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&Points(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }
}
