//! Sheet rendering backend trait and shared types.
//!
//! The [`SheetBackend`] trait defines the three operations every backend must
//! support: identify, render a raster sheet, and render a document sheet.
//! Everything upstream (layout, coordinate mapping) is pure; the backend is
//! the only place that touches pixels or files.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): the `image` crate for
//! decode/composite/encode and `pdf-writer` for document assembly.

use super::params::{DocumentSheetParams, RasterSheetParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for sheet rendering backends.
pub trait SheetBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Composite every copy onto a page-sized canvas and encode it.
    fn render_raster(&self, params: &RasterSheetParams) -> Result<(), BackendError>;

    /// Embed the photo once and draw it at every document rectangle.
    fn render_document(&self, params: &DocumentSheetParams) -> Result<(), BackendError>;
}
