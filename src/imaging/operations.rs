//! High-level sheet export.
//!
//! These functions combine an arrangement with backend execution: they map
//! cells into the backend's coordinate space, build parameters, and call the
//! backend. The output extension picks the path: `.pdf` goes through the
//! document mapper, everything else is composited as a raster.

use super::backend::{BackendError, SheetBackend};
use super::calculations::{pixel_extent, raster_position};
use super::params::{Color, DocumentSheetParams, Quality, RasterSheetParams};
use crate::arrangement::Arrangement;
use crate::export::document_rects;
use crate::pages::PageSizeDescriptor;
use log::{debug, info};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("photo does not fit on page at this size")]
    NothingToPlace,
    #[error("unsupported output format '{0}' (use .png, .jpg or .pdf)")]
    UnsupportedFormat(String),
    #[error("source image {0} has no pixels")]
    EmptySource(String),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Output kinds, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Png,
    Jpeg,
    Pdf,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "png" => Ok(SheetFormat::Png),
            "jpg" | "jpeg" => Ok(SheetFormat::Jpeg),
            "pdf" => Ok(SheetFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }
}

/// Settings shared by both export paths.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub background: Color,
    pub quality: Quality,
    pub sheets: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            quality: Quality::default(),
            sheets: 1,
        }
    }
}

/// Plan a raster sheet without executing it.
pub fn plan_raster_sheet(
    source: &Path,
    output: &Path,
    page: &PageSizeDescriptor,
    arrangement: &Arrangement,
    settings: &ExportSettings,
) -> Result<RasterSheetParams> {
    let first = arrangement.cells.first().ok_or(ExportError::NothingToPlace)?;

    Ok(RasterSheetParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        canvas_width: pixel_extent(page.pixel_size.width),
        canvas_height: pixel_extent(page.pixel_size.height),
        photo_width: pixel_extent(first.width),
        photo_height: pixel_extent(first.height),
        positions: arrangement.cells.iter().map(raster_position).collect(),
        background: settings.background,
        quality: settings.quality,
    })
}

/// Plan a document sheet without executing it.
///
/// The embedded raster keeps the preview pixel density, so the printed photo
/// has the same detail as the raster export.
pub fn plan_document_sheet(
    source: &Path,
    output: &Path,
    page: &PageSizeDescriptor,
    arrangement: &Arrangement,
    settings: &ExportSettings,
) -> Result<DocumentSheetParams> {
    let first = arrangement.cells.first().ok_or(ExportError::NothingToPlace)?;

    Ok(DocumentSheetParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        page_width: page.point_size.width,
        page_height: page.point_size.height,
        image_width: pixel_extent(first.width),
        image_height: pixel_extent(first.height),
        rects: document_rects(arrangement, page),
        background: settings.background,
        sheets: settings.sheets.max(1),
    })
}

/// Render `arrangement` of the photo at `source` into `output`.
///
/// Fails with [`ExportError::NothingToPlace`] for an empty arrangement
/// before touching the backend, and with [`ExportError::EmptySource`] when
/// the source has a zero side, before anything is rendered.
pub fn export_sheet(
    backend: &impl SheetBackend,
    source: &Path,
    output: &Path,
    page: &PageSizeDescriptor,
    arrangement: &Arrangement,
    settings: &ExportSettings,
) -> Result<SheetFormat> {
    let format = SheetFormat::from_path(output)?;
    if arrangement.is_empty() {
        return Err(ExportError::NothingToPlace);
    }

    let dims = backend.identify(source)?;
    if dims.width == 0 || dims.height == 0 {
        return Err(ExportError::EmptySource(source.display().to_string()));
    }
    debug!(
        "exporting {}x{} source {} as {:?} on {}",
        dims.width,
        dims.height,
        source.display(),
        format,
        page.name
    );

    match format {
        SheetFormat::Pdf => {
            let params = plan_document_sheet(source, output, page, arrangement, settings)?;
            backend.render_document(&params)?;
        }
        SheetFormat::Png | SheetFormat::Jpeg => {
            let params = plan_raster_sheet(source, output, page, arrangement, settings)?;
            backend.render_raster(&params)?;
        }
    }

    info!(
        "wrote {} copies on {} to {}",
        arrangement.cells.len(),
        page.name,
        output.display()
    );
    Ok(format)
}
