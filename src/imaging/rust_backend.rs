//! Pure Rust sheet backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate |
//! | Background recolour | alpha blend over [`Color`] into an `RgbImage` |
//! | Fit to cell | `image::imageops::resize` (`Lanczos3`) + centre `crop_imm` |
//! | Composite | `image::imageops::overlay` onto a white canvas |
//! | Encode raster | PNG, or JPEG at [`Quality`](super::params::Quality) |
//! | Assemble document | `pdf-writer`, photo embedded once as a Flate RGB XObject |

use super::backend::{BackendError, Dimensions, SheetBackend};
use super::calculations::{calculate_fill_dimensions, center_crop_offset};
use super::params::{Color, DocumentSheetParams, RasterSheetParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};
use std::path::Path;

/// XObject name the photo is registered under on every page.
const PHOTO_XOBJECT: Name<'static> = Name(b"Photo");

/// Pure Rust backend using the `image` crate and `pdf-writer`.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    image::open(path).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Blend transparent pixels over `background`.
///
/// A background-removal service returns the subject with an alpha mask;
/// this is where the user's chosen backdrop colour replaces it.
fn flatten(img: &DynamicImage, background: Color) -> RgbImage {
    let rgba = img.to_rgba8();
    let bg = background.to_array();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u32;
        let mix = |c: u8, under: u8| {
            ((c as u32 * alpha + under as u32 * (255 - alpha) + 127) / 255) as u8
        };
        image::Rgb([mix(r, bg[0]), mix(g, bg[1]), mix(b, bg[2])])
    })
}

/// Flatten, fill-resize, and centre-crop the photo to exactly `width` × `height`.
fn prepare_photo(img: &DynamicImage, width: u32, height: u32, background: Color) -> RgbImage {
    let flat = flatten(img, background);
    let target = (width, height);
    let filled_dims = calculate_fill_dimensions(flat.dimensions(), target);
    let filled = image::imageops::resize(&flat, filled_dims.0, filled_dims.1, FilterType::Lanczos3);
    let (x, y) = center_crop_offset(filled_dims, target);
    image::imageops::crop_imm(&filled, x, y, width, height).to_image()
}

/// Save the canvas, choosing the encoder from the output extension.
fn save_raster(canvas: RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png" => canvas
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e))),
        "jpg" | "jpeg" => {
            let file = std::fs::File::create(path)?;
            let writer = std::io::BufWriter::new(file);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8);
            DynamicImage::ImageRgb8(canvas)
                .write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
        }
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            other
        ))),
    }
}

/// Assemble a PDF with `params.sheets` identical pages sharing one image and
/// one content stream.
fn build_document(photo: &RgbImage, params: &DocumentSheetParams) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let pages_id = alloc.bump();
    let image_id = alloc.bump();
    let content_id = alloc.bump();
    let page_ids: Vec<Ref> = (0..params.sheets).map(|_| alloc.bump()).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    let page_w = params.page_width.get() as f32;
    let page_h = params.page_height.get() as f32;
    for &page_id in &page_ids {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h))
            .parent(pages_id)
            .contents(content_id);
        page.resources().x_objects().pair(PHOTO_XOBJECT, image_id);
    }

    let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(photo.as_raw(), 6);
    {
        let mut xobj = pdf.image_xobject(image_id, &compressed_rgb);
        xobj.filter(Filter::FlateDecode);
        xobj.width(photo.width() as i32);
        xobj.height(photo.height() as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
    }

    let mut content = Content::new();
    for rect in &params.rects {
        content.save_state();
        content.transform([
            rect.width.get() as f32,
            0.0,
            0.0,
            rect.height.get() as f32,
            rect.x.get() as f32,
            rect.y.get() as f32,
        ]);
        content.x_object(PHOTO_XOBJECT);
        content.restore_state();
    }
    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf.finish()
}

impl SheetBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn render_raster(&self, params: &RasterSheetParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let photo = prepare_photo(
            &img,
            params.photo_width,
            params.photo_height,
            params.background,
        );

        let mut canvas = RgbImage::from_pixel(
            params.canvas_width,
            params.canvas_height,
            image::Rgb(Color::WHITE.to_array()),
        );
        for pos in &params.positions {
            image::imageops::overlay(&mut canvas, &photo, pos.x, pos.y);
        }

        save_raster(canvas, &params.output, params.quality.value())
    }

    fn render_document(&self, params: &DocumentSheetParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let photo = prepare_photo(
            &img,
            params.image_width,
            params.image_height,
            params.background,
        );
        std::fs::write(&params.output, build_document(&photo, params))?;
        Ok(())
    }
}
