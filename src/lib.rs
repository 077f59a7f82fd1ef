//! # idsheet
//!
//! Lays out copies of an ID photo on a printable sheet. Given a page and a
//! photo size in millimetres, it works out how many copies fit, where each
//! one goes, and renders the sheet as PNG, JPEG, or PDF.
//!
//! # Architecture: One Layout, Three Projections
//!
//! Every layout decision is made once, in pixel space, and then projected:
//!
//! ```text
//!              ┌─► export   pixel cells → PDF points (y flipped)
//! arrangement ─┼─► preview  pixel cells → fractions of the page
//!              └─► imaging  pixel cells → rounded raster positions
//! ```
//!
//! The layout core (`units`, `pages`, `arrangement`, `export`, `preview`) is
//! pure and infallible: same inputs, bit-identical outputs, no I/O. Only the
//! [`imaging`] backend touches files, and only [`config`] validates user input.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`units`] | `Pixels` and `Points` newtypes, `Resolution`, millimetre conversion |
//! | [`pages`] | Page presets, the custom page, photo size presets |
//! | [`arrangement`] | Packing strategies and the arrangement calculator |
//! | [`export`] | Pixel cells to PDF-style bottom-left rectangles and back |
//! | [`preview`] | Normalized rectangles and the Maud HTML preview |
//! | [`imaging`] | Raster and PDF sheet rendering behind a backend trait |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two Coordinate Spaces, Two Types
//!
//! Pixels (top-left origin, y down) and document points (bottom-left origin,
//! y up) are separate newtypes. Mixing them is a compile error; the only
//! crossings are [`export::to_document_rect`] and [`export::to_pixel_rect`].
//!
//! ## Resolution Is Passed In
//!
//! Screen and document DPI live in [`units::Resolution`], fixed for the run
//! (the CLI always uses the default 300/72) and handed to every conversion. Tests can run the whole layout at
//! 150 DPI without touching global state.
//!
//! ## Two Packing Strategies
//!
//! A 4×6 inch photo print gets a fixed 3-column layout with a small tier list
//! of row counts, because photo labs trim those sheets by hand. Everything
//! else is packed as a dense grid with proportional padding and spacing. See
//! [`arrangement::PackingStrategy`].

pub mod arrangement;
pub mod config;
pub mod export;
pub mod imaging;
pub mod output;
pub mod pages;
pub mod preview;
pub mod units;

#[cfg(test)]
pub(crate) mod test_helpers;
