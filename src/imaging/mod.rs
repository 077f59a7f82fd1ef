//! Sheet rendering in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Recolour + crop** | alpha blend, `resize` + centre crop |
//! | **Raster sheet** | `imageops::overlay` → PNG / JPEG |
//! | **Document sheet** | `pdf-writer` image XObject drawn per cell |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fill/crop/rounding math (unit testable)
//! - **Parameters**: Data structures describing a sheet to render
//! - **Backend**: [`SheetBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining an arrangement + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, SheetBackend};
pub use calculations::calculate_fill_dimensions;
pub use operations::{ExportError, ExportSettings, SheetFormat, export_sheet};
pub use params::{Color, ColorError, Quality};
pub use rust_backend::RustBackend;
