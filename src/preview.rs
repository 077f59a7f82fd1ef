//! Resolution-independent preview of an arrangement.
//!
//! Cells are expressed as fractions of the page (0–1), in the same top-left
//! orientation as pixel space, so a preview can be drawn at any size without
//! recomputing the layout. [`render_preview`] turns those fractions into a
//! standalone HTML page using percentage positioning.

use crate::arrangement::{Arrangement, PlacedPhoto};
use crate::pages::PageSizeDescriptor;
use maud::{DOCTYPE, Markup, html};
use serde::{Deserialize, Serialize};

/// A cell as fractions of the page width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn to_normalized_rect(cell: &PlacedPhoto, page: &PageSizeDescriptor) -> NormalizedRect {
    let px = &page.pixel_size;
    NormalizedRect {
        left: cell.x / px.width,
        top: cell.y / px.height,
        width: cell.width / px.width,
        height: cell.height / px.height,
    }
}

pub fn normalized_rects(arrangement: &Arrangement, page: &PageSizeDescriptor) -> Vec<NormalizedRect> {
    arrangement
        .cells
        .iter()
        .map(|cell| to_normalized_rect(cell, page))
        .collect()
}

const CSS: &str = r#"
body { margin: 0; padding: 2rem; background: #e8e8e8; font-family: system-ui, sans-serif; }
.sheet { position: relative; margin: 0 auto; background: #fff; box-shadow: 0 2px 12px rgba(0,0,0,.25); }
.cell { position: absolute; box-sizing: border-box; outline: 1px dashed #999; overflow: hidden; }
.cell img { display: block; width: 100%; height: 100%; object-fit: cover; }
.caption { text-align: center; color: #555; margin-top: 1rem; }
.empty { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; color: #a33; }
"#;

fn percent(fraction: f64) -> String {
    format!("{:.4}%", fraction * 100.0)
}

fn cell_style(rect: &NormalizedRect) -> String {
    format!(
        "left: {}; top: {}; width: {}; height: {};",
        percent(rect.left),
        percent(rect.top),
        percent(rect.width),
        percent(rect.height)
    )
}

/// Render an HTML preview of `arrangement` on `page`.
///
/// `display_width` is the sheet width in CSS pixels; the height follows the
/// page aspect ratio. With `photo_src`, every cell shows that image.
pub fn render_preview(
    page: &PageSizeDescriptor,
    arrangement: &Arrangement,
    photo_src: Option<&str>,
    display_width: u32,
) -> Markup {
    let aspect = page.pixel_size.height / page.pixel_size.width;
    let display_height = (display_width as f64 * aspect).round() as u32;
    let sheet_style = format!("width: {display_width}px; height: {display_height}px;");
    let rects = normalized_rects(arrangement, page);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Sheet preview: " (page.name) }
                style { (CSS) }
            }
            body {
                div.sheet style=(sheet_style) {
                    @if rects.is_empty() {
                        div.empty { "Photo does not fit on page at this size" }
                    }
                    @for rect in &rects {
                        div.cell style=(cell_style(rect)) {
                            @if let Some(src) = photo_src {
                                img src=(src) alt="";
                            }
                        }
                    }
                }
                p.caption {
                    (page.name) " · "
                    (arrangement.photos_per_row) " × " (arrangement.photos_per_col)
                    " = " (arrangement.photos_per_page()) " photos"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::compute_arrangement;
    use crate::pages::{PagePreset, PageRegistry, PhysicalSize};
    use crate::units::{Pixels, Resolution};

    fn a4() -> PageSizeDescriptor {
        PageRegistry::default().resolve(PagePreset::A4, &Resolution::default())
    }

    #[test]
    fn normalized_rect_is_plain_ratio() {
        let page = a4();
        let cell = PlacedPhoto {
            x: page.pixel_size.width * 0.25,
            y: page.pixel_size.height * 0.5,
            width: page.pixel_size.width * 0.1,
            height: Pixels(0.0),
        };
        let rect = to_normalized_rect(&cell, &page);
        assert!((rect.left - 0.25).abs() < 1e-12);
        assert!((rect.top - 0.5).abs() < 1e-12);
        assert!((rect.width - 0.1).abs() < 1e-12);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn normalized_rects_stay_inside_unit_square() {
        let res = Resolution::default();
        let page = a4();
        let arr = compute_arrangement(&page, PhysicalSize::new(35.0, 45.0), &res);
        let rects = normalized_rects(&arr, &page);

        assert_eq!(rects.len(), arr.cells.len());
        for r in &rects {
            assert!(r.left >= 0.0 && r.left + r.width <= 1.0);
            assert!(r.top >= 0.0 && r.top + r.height <= 1.0);
        }
    }

    #[test]
    fn no_vertical_flip() {
        let res = Resolution::default();
        let page = a4();
        let arr = compute_arrangement(&page, PhysicalSize::new(35.0, 45.0), &res);
        let rects = normalized_rects(&arr, &page);
        let cols = arr.photos_per_row as usize;
        assert!(rects[0].top < rects[cols].top);
    }

    #[test]
    fn preview_html_has_one_box_per_cell() {
        let res = Resolution::default();
        let page = a4();
        let arr = compute_arrangement(&page, PhysicalSize::new(35.0, 45.0), &res);
        let html = render_preview(&page, &arr, Some("photo.png"), 600).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("class=\"cell\"").count(), arr.cells.len());
        assert_eq!(html.matches("src=\"photo.png\"").count(), arr.cells.len());
        // A4 at 600px wide is 849px tall
        assert!(html.contains("width: 600px; height: 849px;"));
        assert!(html.contains("5 × 5 = 25 photos"));
    }

    #[test]
    fn preview_html_reports_empty_layout() {
        let res = Resolution::default();
        let page = a4();
        let arr = compute_arrangement(&page, PhysicalSize::new(500.0, 500.0), &res);
        let html = render_preview(&page, &arr, None, 400).into_string();

        assert!(html.contains("Photo does not fit on page at this size"));
        assert!(!html.contains("class=\"cell\""));
    }
}
