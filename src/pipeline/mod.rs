//! The detection-result-to-crop pipeline.
//!
//! This module turns raw detector output into validated crop regions:
//!
//! 1. [`filter_detections`] keeps boxes above the confidence threshold and
//!    minimum size, preserving detector emission order.
//! 2. [`crate::geometry::BBox::expand`] grows each kept box by the configured
//!    margin (pure arithmetic, no clamping).
//! 3. [`resolve_region`] clamps the expanded box to the image bounds and
//!    rejects anything that degenerates to an empty region.
//! 4. [`write_crop`] extracts the region, optionally resizes it to a fixed
//!    square, and persists it under a per-detection filename built by
//!    [`output_name`].

mod writer;

pub use writer::{output_name, resolve_region, write_crop};

use crate::detect::Detection;
use crate::geometry::BBox;

/// Select the boxes worth cropping from a detection set.
///
/// A detection is kept iff its score strictly exceeds `threshold` (a score
/// exactly equal to the threshold is excluded) and its box is at least
/// `minimum_size` pixels wide and tall. The order of kept boxes preserves
/// detection order. An empty result is a normal outcome, not an error.
pub fn filter_detections(
    detections: &[Detection],
    threshold: f64,
    minimum_size: u32,
) -> Vec<BBox> {
    let min = f64::from(minimum_size);
    detections
        .iter()
        .filter(|det| det.score > threshold)
        .filter(|det| det.bbox.width() >= min && det.bbox.height() >= min)
        .map(|det| det.bbox)
        .collect()
}
