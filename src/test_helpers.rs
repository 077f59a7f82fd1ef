//! Shared test utilities for arrangement checks.
//!
//! Geometry assertions that every non-empty grid arrangement must satisfy,
//! used by the layout, export, and preview tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let page = a4();
//! let arr = compute_arrangement(&page, passport(), &Resolution::default());
//!
//! assert_contained(&arr, &page);
//! assert_no_overlap(&arr);
//! assert_centered(&arr, &page);
//! ```

use crate::arrangement::{Arrangement, PlacedPhoto};
use crate::pages::{PagePreset, PageRegistry, PageSizeDescriptor, PhysicalSize};
use crate::units::Resolution;

/// Slack for float comparisons, in pixels.
pub const EPS: f64 = 1e-6;

// =========================================================================
// Fixtures
// =========================================================================

pub fn a4() -> PageSizeDescriptor {
    PageRegistry::default().resolve(PagePreset::A4, &Resolution::default())
}

pub fn passport() -> PhysicalSize {
    PhysicalSize::new(35.0, 45.0)
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert every cell lies within the page bounds.
pub fn assert_contained(arr: &Arrangement, page: &PageSizeDescriptor) {
    let w = page.pixel_size.width.get();
    let h = page.pixel_size.height.get();
    for (i, cell) in arr.cells.iter().enumerate() {
        assert!(
            cell.x.get() >= -EPS && cell.y.get() >= -EPS,
            "cell {i} starts outside {}: {cell:?}",
            page.name
        );
        assert!(
            cell.right().get() <= w + EPS && cell.bottom().get() <= h + EPS,
            "cell {i} ends outside {} ({w} x {h}): {cell:?}",
            page.name
        );
    }
}

fn overlaps(a: &PlacedPhoto, b: &PlacedPhoto) -> bool {
    a.x.get() < b.right().get() - EPS
        && b.x.get() < a.right().get() - EPS
        && a.y.get() < b.bottom().get() - EPS
        && b.y.get() < a.bottom().get() - EPS
}

/// Assert no two cells share interior area.
pub fn assert_no_overlap(arr: &Arrangement) {
    for (i, a) in arr.cells.iter().enumerate() {
        for (j, b) in arr.cells.iter().enumerate().skip(i + 1) {
            assert!(!overlaps(a, b), "cells {i} and {j} overlap: {a:?} / {b:?}");
        }
    }
}

/// Assert the bounding box of all cells is centred on the page.
pub fn assert_centered(arr: &Arrangement, page: &PageSizeDescriptor) {
    assert!(!arr.cells.is_empty(), "nothing to centre on {}", page.name);

    let left = arr.cells.iter().map(|c| c.x.get()).fold(f64::INFINITY, f64::min);
    let top = arr.cells.iter().map(|c| c.y.get()).fold(f64::INFINITY, f64::min);
    let right = arr.cells.iter().map(|c| c.right().get()).fold(f64::NEG_INFINITY, f64::max);
    let bottom = arr.cells.iter().map(|c| c.bottom().get()).fold(f64::NEG_INFINITY, f64::max);

    let margin_right = page.pixel_size.width.get() - right;
    let margin_bottom = page.pixel_size.height.get() - bottom;
    assert!(
        (left - margin_right).abs() < EPS,
        "horizontal margins differ on {}: {left} vs {margin_right}",
        page.name
    );
    assert!(
        (top - margin_bottom).abs() < EPS,
        "vertical margins differ on {}: {top} vs {margin_bottom}",
        page.name
    );
}
