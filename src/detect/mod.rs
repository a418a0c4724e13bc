//! Face detection trait and data types.
//!
//! The batch driver is written against the [`FaceDetector`] trait so the
//! detection backend can be swapped out (or stubbed in tests) without
//! touching the crop pipeline. The built-in backend wraps the `rustface`
//! SeetaFace engine.

mod rustface_backend;

pub use rustface_backend::RustfaceDetector;

use image::DynamicImage;

use crate::error::FacecropError;
use crate::geometry::BBox;

/// One candidate face emitted by a detector for one image.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Advisory class label. Always `"face"` for the built-in backend.
    pub label: String,
    /// Bounding box in pixel coordinates of the source image.
    pub bbox: BBox,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

/// Pluggable face detection backend.
///
/// Implementations must be pure over their model weights: the same image
/// always yields the same detections, in a stable emission order. Inference
/// failures are reported as errors and treated by the batch driver as
/// per-image failures, not as fatal to the batch.
pub trait FaceDetector {
    /// Detect faces in a decoded image. An empty result is a normal outcome.
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, FacecropError>;
}
