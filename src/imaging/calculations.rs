//! Pure pixel math for preparing and placing photo copies.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::RasterRect;
use crate::arrangement::PlacedPhoto;
use crate::units::Pixels;

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target area dimensions (width, height)
///
/// # Examples
/// ```
/// # use idsheet::imaging::calculate_fill_dimensions;
/// // A 4:3 snapshot filling a 35x45 passport cell keeps the height.
/// assert_eq!(calculate_fill_dimensions((800, 600), (350, 450)), (600, 450));
/// ```
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w, h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h)
    }
}

/// Top-left corner of a centred `target` crop inside `filled`.
pub fn center_crop_offset(filled: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    (
        filled.0.saturating_sub(target.0) / 2,
        filled.1.saturating_sub(target.1) / 2,
    )
}

/// Round a pixel length to a whole, non-zero extent.
pub fn pixel_extent(length: Pixels) -> u32 {
    (length.get().round() as u32).max(1)
}

/// Round a cell's corner to the nearest canvas pixel.
pub fn raster_position(cell: &PlacedPhoto) -> RasterRect {
    RasterRect {
        x: cell.x.get().round() as i64,
        y: cell.y.get().round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_fill_dimensions tests
    // =========================================================================

    #[test]
    fn fill_wider_source_to_portrait_target() {
        // 800x600 (4:3) → 400x500 target
        // Source is wider, so height matches: 500, width = 500 * (4/3) = 667
        assert_eq!(calculate_fill_dimensions((800, 600), (400, 500)), (667, 500));
    }

    #[test]
    fn fill_taller_source_to_landscape_target() {
        // 600x800 (3:4) → 500x400 target
        // Source is taller, so width matches: 500, height = 500 * (4/3) = 667
        assert_eq!(calculate_fill_dimensions((600, 800), (500, 400)), (500, 667));
    }

    #[test]
    fn fill_same_aspect_ratio() {
        assert_eq!(calculate_fill_dimensions((700, 900), (413, 531)), (413, 531));
    }

    #[test]
    fn fill_square_source_to_passport_cell() {
        // 1000x1000 → 413x531: square is wider than 35:45, height matches
        assert_eq!(calculate_fill_dimensions((1000, 1000), (413, 531)), (531, 531));
    }

    #[test]
    fn fill_always_covers_target() {
        for source in [(640, 480), (480, 640), (1024, 1024), (3000, 1000), (999, 1001)] {
            for target in [(413, 531), (602, 602), (295, 413)] {
                let (w, h) = calculate_fill_dimensions(source, target);
                assert!(w >= target.0 && h >= target.1, "{source:?} → {target:?}");
            }
        }
    }

    // =========================================================================
    // crop and rounding tests
    // =========================================================================

    #[test]
    fn crop_offset_centres_excess() {
        assert_eq!(center_crop_offset((531, 531), (413, 531)), (59, 0));
        assert_eq!(center_crop_offset((413, 600), (413, 531)), (0, 34));
    }

    #[test]
    fn crop_offset_never_underflows() {
        assert_eq!(center_crop_offset((10, 10), (20, 20)), (0, 0));
    }

    #[test]
    fn pixel_extent_never_zero() {
        assert_eq!(pixel_extent(Pixels(0.2)), 1);
        assert_eq!(pixel_extent(Pixels(-5.0)), 1);
        assert_eq!(pixel_extent(Pixels(99.5)), 100);
        assert_eq!(pixel_extent(Pixels(413.386)), 413);
    }

    #[test]
    fn raster_position_rounds_and_keeps_sign() {
        let cell = PlacedPhoto {
            x: Pixels(10.4),
            y: Pixels(-3.6),
            width: Pixels(413.39),
            height: Pixels(531.5),
        };
        assert_eq!(raster_position(&cell), RasterRect { x: 10, y: -4 });
    }
}
