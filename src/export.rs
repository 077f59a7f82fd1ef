//! Pixel space → document point space.
//!
//! Pixel cells have a top-left origin with y growing down. Document pages
//! (PDF) have a bottom-left origin with y growing up, so the vertical axis is
//! flipped here, per cell, at export time. The arrangement itself stays in
//! pixel space because the preview consumes it unflipped.

use crate::arrangement::{Arrangement, PlacedPhoto};
use crate::pages::PageSizeDescriptor;
use crate::units::Points;
use serde::{Deserialize, Serialize};

/// A rectangle on a document page: bottom-left corner and size, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentRect {
    pub x: Points,
    pub y: Points,
    pub width: Points,
    pub height: Points,
}

/// Map one pixel cell onto the page's point space.
pub fn to_document_rect(cell: &PlacedPhoto, page: &PageSizeDescriptor) -> DocumentRect {
    let px = &page.pixel_size;
    let pt = &page.point_size;

    DocumentRect {
        x: pt.width * (cell.x / px.width),
        y: pt.height - pt.height * (cell.bottom() / px.height),
        width: pt.width * (cell.width / px.width),
        height: pt.height * (cell.height / px.height),
    }
}

/// Inverse of [`to_document_rect`].
pub fn to_pixel_rect(rect: &DocumentRect, page: &PageSizeDescriptor) -> PlacedPhoto {
    let px = &page.pixel_size;
    let pt = &page.point_size;

    let height = px.height * (rect.height / pt.height);
    let top = px.height * ((pt.height - rect.y) / pt.height);
    PlacedPhoto {
        x: px.width * (rect.x / pt.width),
        y: top - height,
        width: px.width * (rect.width / pt.width),
        height,
    }
}

/// Every cell of `arrangement` in document space, same order.
pub fn document_rects(arrangement: &Arrangement, page: &PageSizeDescriptor) -> Vec<DocumentRect> {
    arrangement
        .cells
        .iter()
        .map(|cell| to_document_rect(cell, page))
        .collect()
}
