//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Pages
//!
//! ```text
//! Pages
//! 001 A3 (grid)
//!     297 x 420 mm
//!     3508 x 4961 px, 841.9 x 1190.6 pt
//! 002 A4 (grid)
//!     ...
//!
//! Photo sizes
//!     passport      Passport (35 x 45 mm)
//! ```
//!
//! ## Layout
//!
//! ```text
//! A4 (grid)
//!     Photo: 35 x 45 mm
//!     5 x 5 = 25 photos
//!     Padding: 74.4 px, spacing: 33.1 px
//!     001 (140.6, 359.1) 413.4 x 531.5 px
//!     ...
//! ```
//!
//! ## Fit
//!
//! ```text
//! Fit for 35 x 45 mm
//! 001 A3: 7 x 8 = 56 photos
//! 002 A4: 5 x 5 = 25 photos
//! ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::arrangement::{Arrangement, PackingStrategy, classify_page};
use crate::export::{DocumentRect, document_rects};
use crate::pages::{PHOTO_PRESETS, PageRegistry, PageSizeDescriptor, PhysicalSize};
use crate::preview::{NormalizedRect, normalized_rects};
use crate::units::Resolution;
use serde::Serialize;

/// Shown wherever an arrangement holds no photos.
pub const DOES_NOT_FIT: &str = "photo does not fit on page at this size";

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn strategy_label(strategy: PackingStrategy) -> &'static str {
    match strategy {
        PackingStrategy::PhotoPrint => "photo print",
        PackingStrategy::Grid => "grid",
    }
}

/// `5 x 5 = 25 photos`, or the does-not-fit message.
fn count_summary(arrangement: &Arrangement) -> String {
    if arrangement.is_empty() {
        return DOES_NOT_FIT.to_string();
    }
    let n = arrangement.photos_per_page();
    format!(
        "{} x {} = {} {}",
        arrangement.photos_per_row,
        arrangement.photos_per_col,
        n,
        if n == 1 { "photo" } else { "photos" }
    )
}

// ============================================================================
// pages
// ============================================================================

/// List every page preset with its sizes in all three units, then the
/// photo size presets.
pub fn format_pages(registry: &PageRegistry, res: &Resolution) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    for (i, (preset, desc)) in registry.all(res).iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            desc.name,
            strategy_label(classify_page(desc, res))
        ));
        lines.push(format!("{}{}", indent(1), registry.physical(*preset)));
        lines.push(format!(
            "{}{:.0} x {:.0} px, {:.1} x {:.1} pt",
            indent(1),
            desc.pixel_size.width.get(),
            desc.pixel_size.height.get(),
            desc.point_size.width.get(),
            desc.point_size.height.get()
        ));
    }

    lines.push(String::new());
    lines.push("Photo sizes".to_string());
    for preset in PHOTO_PRESETS {
        lines.push(format!("{}{:<13} {}", indent(1), preset.name, preset.description));
    }

    lines
}

/// Print page presets to stdout.
pub fn print_pages(registry: &PageRegistry, res: &Resolution) {
    for line in format_pages(registry, res) {
        println!("{}", line);
    }
}

// ============================================================================
// layout
// ============================================================================

/// Describe one arrangement: header, counts, gaps, then one line per cell.
pub fn format_layout(
    page: &PageSizeDescriptor,
    photo: PhysicalSize,
    arrangement: &Arrangement,
) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", page.name, strategy_label(arrangement.strategy)),
        format!("{}Photo: {}", indent(1), photo),
        format!("{}{}", indent(1), count_summary(arrangement)),
    ];

    if arrangement.is_empty() {
        return lines;
    }

    lines.push(format!(
        "{}Padding: {:.1} px, spacing: {:.1} px",
        indent(1),
        arrangement.padding.get(),
        arrangement.spacing.get()
    ));
    for (i, cell) in arrangement.cells.iter().enumerate() {
        lines.push(format!(
            "{}{} ({:.1}, {:.1}) {:.1} x {:.1} px",
            indent(1),
            format_index(i + 1),
            cell.x.get(),
            cell.y.get(),
            cell.width.get(),
            cell.height.get()
        ));
    }

    lines
}

/// Print a single arrangement to stdout.
pub fn print_layout(page: &PageSizeDescriptor, photo: PhysicalSize, arrangement: &Arrangement) {
    for line in format_layout(page, photo, arrangement) {
        println!("{}", line);
    }
}

/// Machine-readable layout: the arrangement plus both projections.
///
/// Serialised by `layout --json`.
#[derive(Debug, Serialize)]
pub struct LayoutReport<'a> {
    pub page: &'a PageSizeDescriptor,
    pub photo: PhysicalSize,
    pub arrangement: &'a Arrangement,
    pub document_rects: Vec<DocumentRect>,
    pub normalized_rects: Vec<NormalizedRect>,
}

impl<'a> LayoutReport<'a> {
    pub fn new(page: &'a PageSizeDescriptor, photo: PhysicalSize, arrangement: &'a Arrangement) -> Self {
        Self {
            page,
            photo,
            arrangement,
            document_rects: document_rects(arrangement, page),
            normalized_rects: normalized_rects(arrangement, page),
        }
    }
}

// ============================================================================
// fit
// ============================================================================

/// One line per page showing how many copies of `photo` it holds.
pub fn format_fit(photo: PhysicalSize, results: &[(PageSizeDescriptor, Arrangement)]) -> Vec<String> {
    let mut lines = vec![format!("Fit for {}", photo)];
    for (i, (page, arrangement)) in results.iter().enumerate() {
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            page.name,
            count_summary(arrangement)
        ));
    }
    lines
}

/// Print page comparison to stdout.
pub fn print_fit(photo: PhysicalSize, results: &[(PageSizeDescriptor, Arrangement)]) {
    for line in format_fit(photo, results) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::{compare_pages, compute_arrangement};
    use crate::pages::PagePreset;
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    // =========================================================================
    // pages
    // =========================================================================

    #[test]
    fn pages_lists_every_preset_in_order() {
        let lines = format_pages(&PageRegistry::default(), &Resolution::default());
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 A3 (grid)");
        assert_eq!(lines[2], "    297 x 420 mm");
        assert!(lines.contains(&"002 A4 (grid)".to_string()));
        assert!(lines.contains(&"    2480 x 3508 px, 595.3 x 841.9 pt".to_string()));
        assert!(lines.contains(&"005 4x6 (photo print)".to_string()));
        let headers = lines.iter().filter(|l| l.starts_with('0')).count();
        assert_eq!(headers, PagePreset::ALL.len());
    }

    #[test]
    fn pages_shows_custom_size_from_registry() {
        let registry = PageRegistry::new(PhysicalSize::new(89.0, 127.0));
        let lines = format_pages(&registry, &Resolution::default());
        let custom = lines.iter().position(|l| l == "007 Custom (grid)").unwrap();
        assert_eq!(lines[custom + 1], "    89 x 127 mm");
    }

    #[test]
    fn pages_lists_photo_presets() {
        let lines = format_pages(&PageRegistry::default(), &Resolution::default());
        let start = lines.iter().position(|l| l == "Photo sizes").unwrap();
        assert_eq!(lines.len() - start - 1, PHOTO_PRESETS.len());
        assert!(lines[start + 1].trim_start().starts_with("passport"));
    }

    // =========================================================================
    // layout
    // =========================================================================

    #[test]
    fn layout_lists_every_cell() {
        let page = a4();
        let arr = compute_arrangement(&page, passport(), &Resolution::default());
        let lines = format_layout(&page, passport(), &arr);

        assert_eq!(lines[0], "A4 (grid)");
        assert_eq!(lines[1], "    Photo: 35 x 45 mm");
        assert_eq!(lines[2], "    5 x 5 = 25 photos");
        assert!(lines[3].starts_with("    Padding: "));
        assert_eq!(lines.len(), 4 + 25);
        assert!(lines[4].starts_with("    001 ("));
        assert!(lines[28].starts_with("    025 ("));
    }

    #[test]
    fn layout_of_empty_arrangement_says_so() {
        let page = a4();
        let huge = PhysicalSize::new(500.0, 500.0);
        let arr = compute_arrangement(&page, huge, &Resolution::default());
        let lines = format_layout(&page, huge, &arr);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], format!("    {DOES_NOT_FIT}"));
    }

    #[test]
    fn single_photo_is_singular() {
        let res = Resolution::default();
        let tight = PageSizeDescriptor::from_physical("Custom", PhysicalSize::new(45.0, 57.0), &res);
        let arr = compute_arrangement(&tight, passport(), &res);
        assert_eq!(count_summary(&arr), "1 x 1 = 1 photo");
    }

    #[test]
    fn layout_report_serializes_all_projections() {
        let page = a4();
        let arr = compute_arrangement(&page, passport(), &Resolution::default());
        let json = serde_json::to_value(LayoutReport::new(&page, passport(), &arr)).unwrap();

        assert_eq!(json["page"]["name"], "A4");
        assert_eq!(json["photo"]["width"], 35.0);
        assert_eq!(json["arrangement"]["strategy"], "grid");
        assert_eq!(json["arrangement"]["cells"].as_array().unwrap().len(), 25);
        assert_eq!(json["document_rects"].as_array().unwrap().len(), 25);
        assert_eq!(json["normalized_rects"].as_array().unwrap().len(), 25);
        let left = json["normalized_rects"][0]["left"].as_f64().unwrap();
        assert!(left > 0.0 && left < 1.0);
    }

    // =========================================================================
    // fit
    // =========================================================================

    #[test]
    fn fit_has_one_line_per_page() {
        let res = Resolution::default();
        let results = compare_pages(&PageRegistry::default(), passport(), &res);
        let lines = format_fit(passport(), &results);

        assert_eq!(lines[0], "Fit for 35 x 45 mm");
        assert_eq!(lines.len(), 1 + PagePreset::ALL.len());
        assert_eq!(lines[2], "002 A4: 5 x 5 = 25 photos");
    }

    #[test]
    fn fit_reports_pages_that_hold_nothing() {
        let res = Resolution::default();
        let photo = PhysicalSize::new(200.0, 250.0);
        let results = compare_pages(&PageRegistry::default(), photo, &res);
        let lines = format_fit(photo, &results);

        assert_eq!(lines[1], "001 A3: 1 x 1 = 1 photo");
        assert_eq!(lines[3], format!("003 A5: {DOES_NOT_FIT}"));
    }
}
