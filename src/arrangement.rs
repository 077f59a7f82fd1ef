//! Grid arrangement of identical photos on a page.
//!
//! Every copy has the same size, so placement reduces to tiling each axis
//! independently: pick a column and row count, then centre the resulting
//! block on the page so opposite margins match.
//!
//! ## Strategies
//!
//! [`classify_page`] picks a [`PackingStrategy`] from the page dimensions:
//!
//! - [`PackingStrategy::PhotoPrint`] for 4×6 in sheets (either orientation).
//!   Fixed 3 mm padding, always 3 columns, rows tried as 4, then 3, with 2 as
//!   the fallback when neither fits.
//! - [`PackingStrategy::Grid`] for everything else. Padding is the larger of
//!   2 mm or 3% of the page width; as many columns and rows as fit.
//!
//! Both use the same spacing rule: the larger of 2 mm or 8% of the photo's
//! shorter side.
//!
//! The result is pure pixel space. [`crate::export`] and [`crate::preview`]
//! map it into the document and preview spaces.

use crate::pages::{PageRegistry, PagePreset, PageSizeDescriptor, PhysicalSize};
use crate::units::{Pixels, Resolution};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimum gap between photos, and minimum grid padding.
const MIN_GAP_MM: f64 = 2.0;
/// Spacing as a fraction of the photo's shorter side.
const SPACING_RATIO: f64 = 0.08;
/// Grid padding as a fraction of the page width.
const GRID_PADDING_RATIO: f64 = 0.03;
/// Padding used on photographic print sheets.
const PRINT_PADDING_MM: f64 = 3.0;
/// Columns on a photographic print sheet.
const PRINT_COLUMNS: u32 = 3;
/// Row counts tried in order on a photographic print sheet.
const PRINT_ROW_TIERS: [u32; 2] = [4, 3];
/// Row count used when no tier fits.
const PRINT_FALLBACK_ROWS: u32 = 2;
/// Most cells a single arrangement will place.
pub const MAX_CELLS: u64 = 1_000_000;

/// How copies are packed onto a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingStrategy {
    /// Format-specific packing for 4×6 in photo paper.
    PhotoPrint,
    /// Generic floor-division grid.
    Grid,
}

/// One grid cell: top-left corner and size in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedPhoto {
    pub x: Pixels,
    pub y: Pixels,
    pub width: Pixels,
    pub height: Pixels,
}

impl PlacedPhoto {
    pub fn right(&self) -> Pixels {
        self.x + self.width
    }

    pub fn bottom(&self) -> Pixels {
        self.y + self.height
    }
}

/// Placed copies of one photo, row-major (top to bottom, left to right).
///
/// `cells.len() == photos_per_row * photos_per_col` always holds. An
/// arrangement with no cells means the photo does not fit on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub strategy: PackingStrategy,
    pub photos_per_row: u32,
    pub photos_per_col: u32,
    pub padding: Pixels,
    pub spacing: Pixels,
    pub cells: Vec<PlacedPhoto>,
}

impl Arrangement {
    pub fn photos_per_page(&self) -> u64 {
        u64::from(self.photos_per_row) * u64::from(self.photos_per_col)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Column/row decision before any positions are computed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridPlan {
    columns: u32,
    rows: u32,
    padding: Pixels,
    spacing: Pixels,
}

/// True for pages whose size rounds to 4×6 or 6×4 whole inches.
fn is_photo_print(page: &PageSizeDescriptor, res: &Resolution) -> bool {
    let w = (page.pixel_size.width.get() / res.screen_dpi).round();
    let h = (page.pixel_size.height.get() / res.screen_dpi).round();
    (w == 4.0 && h == 6.0) || (w == 6.0 && h == 4.0)
}

/// Choose the packing strategy for a page.
pub fn classify_page(page: &PageSizeDescriptor, res: &Resolution) -> PackingStrategy {
    if is_photo_print(page, res) {
        PackingStrategy::PhotoPrint
    } else {
        PackingStrategy::Grid
    }
}

/// Length of `count` photos laid end to end with `spacing` between them.
fn span(count: u32, photo: Pixels, spacing: Pixels) -> Pixels {
    if count == 0 {
        return Pixels::ZERO;
    }
    photo * count as f64 + spacing * (count - 1) as f64
}

/// How many `photo + spacing` strides fit in `usable`.
///
/// Negative or non-finite quotients saturate to zero.
fn strides(usable: Pixels, photo: Pixels, spacing: Pixels) -> u32 {
    (usable / (photo + spacing)).floor() as u32
}

impl PackingStrategy {
    fn plan(
        self,
        page: &PageSizeDescriptor,
        photo_w: Pixels,
        photo_h: Pixels,
        res: &Resolution,
    ) -> GridPlan {
        let spacing = res
            .pixels(MIN_GAP_MM)
            .max(photo_w.min(photo_h) * SPACING_RATIO);
        let page_w = page.pixel_size.width;
        let page_h = page.pixel_size.height;

        match self {
            PackingStrategy::PhotoPrint => {
                let padding = res.pixels(PRINT_PADDING_MM);
                let usable_w = page_w - padding * 2.0;
                let usable_h = page_h - padding * 2.0;
                let columns_fit = span(PRINT_COLUMNS, photo_w, spacing) <= usable_w;
                let rows = PRINT_ROW_TIERS
                    .into_iter()
                    .find(|&rows| columns_fit && span(rows, photo_h, spacing) <= usable_h)
                    .unwrap_or(PRINT_FALLBACK_ROWS);
                debug!(
                    "photo print sheet {}: {}x{} (columns fit: {})",
                    page.name, PRINT_COLUMNS, rows, columns_fit
                );
                GridPlan {
                    columns: PRINT_COLUMNS,
                    rows,
                    padding,
                    spacing,
                }
            }
            PackingStrategy::Grid => {
                let padding = res.pixels(MIN_GAP_MM).max(page_w * GRID_PADDING_RATIO);
                let usable_w = page_w - padding * 2.0;
                let usable_h = page_h - padding * 2.0;
                let plan = GridPlan {
                    columns: strides(usable_w, photo_w, spacing),
                    rows: strides(usable_h, photo_h, spacing),
                    padding,
                    spacing,
                };
                debug!(
                    "grid sheet {}: {}x{} (padding {:.1}px, spacing {:.1}px)",
                    page.name, plan.columns, plan.rows, padding.get(), spacing.get()
                );
                plan
            }
        }
    }
}

fn empty(strategy: PackingStrategy, plan: &GridPlan) -> Arrangement {
    Arrangement {
        strategy,
        photos_per_row: 0,
        photos_per_col: 0,
        padding: plan.padding,
        spacing: plan.spacing,
        cells: Vec::new(),
    }
}

/// Lay out as many copies of `photo` as the page's strategy allows.
///
/// Total over its inputs: a photo too large for the page yields an empty
/// arrangement, and invalid dimensions are not checked here. A grid of
/// more than [`MAX_CELLS`] copies is also returned empty.
pub fn compute_arrangement(
    page: &PageSizeDescriptor,
    photo: PhysicalSize,
    res: &Resolution,
) -> Arrangement {
    let photo_w = res.pixels(photo.width);
    let photo_h = res.pixels(photo.height);
    let strategy = classify_page(page, res);
    let plan = strategy.plan(page, photo_w, photo_h, res);

    if plan.columns == 0 || plan.rows == 0 {
        return empty(strategy, &plan);
    }
    let count = u64::from(plan.columns) * u64::from(plan.rows);
    if count > MAX_CELLS {
        warn!(
            "{}: {}x{} photos exceeds the limit of {} per page",
            page.name, plan.columns, plan.rows, MAX_CELLS
        );
        return empty(strategy, &plan);
    }

    // Centre the block on the whole page; offsets may go negative.
    let offset_x = (page.pixel_size.width - span(plan.columns, photo_w, plan.spacing)) / 2.0;
    let offset_y = (page.pixel_size.height - span(plan.rows, photo_h, plan.spacing)) / 2.0;

    let mut cells = Vec::with_capacity(count as usize);
    for row in 0..plan.rows {
        for col in 0..plan.columns {
            cells.push(PlacedPhoto {
                x: offset_x + (photo_w + plan.spacing) * col as f64,
                y: offset_y + (photo_h + plan.spacing) * row as f64,
                width: photo_w,
                height: photo_h,
            });
        }
    }

    Arrangement {
        strategy,
        photos_per_row: plan.columns,
        photos_per_col: plan.rows,
        padding: plan.padding,
        spacing: plan.spacing,
        cells,
    }
}

/// Arrange `photo` on every page preset, in preset order.
///
/// See [`rank_by_capacity`] for the order `fit` prints.
pub fn compare_pages(
    registry: &PageRegistry,
    photo: PhysicalSize,
    res: &Resolution,
) -> Vec<(PageSizeDescriptor, Arrangement)> {
    let pages: Vec<(PagePreset, PageSizeDescriptor)> = registry.all(res);
    pages
        .into_par_iter()
        .map(|(_, page)| {
            let arrangement = compute_arrangement(&page, photo, res);
            (page, arrangement)
        })
        .collect()
}

/// Sort comparison results by photos per page, most first.
///
/// The sort is stable, so pages holding the same count keep their
/// incoming (preset) order.
pub fn rank_by_capacity(
    mut results: Vec<(PageSizeDescriptor, Arrangement)>,
) -> Vec<(PageSizeDescriptor, Arrangement)> {
    results.sort_by_key(|(_, arr)| std::cmp::Reverse(arr.photos_per_page()));
    results
}
