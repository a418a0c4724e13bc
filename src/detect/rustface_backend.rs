use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use rustface::ImageData;

use super::{Detection, FaceDetector};
use crate::error::FacecropError;
use crate::geometry::BBox;

/// Smallest face the engine itself will consider, in pixels. The pipeline's
/// own minimum-size filter applies on top of this.
const ENGINE_MIN_FACE_SIZE: u32 = 20;

/// Raw SeetaFace classifier score below which the engine discards a window.
/// Kept well under the score corresponding to the default CLI threshold so
/// that thresholding stays in the pipeline, not in the engine.
const ENGINE_SCORE_FLOOR: f64 = 0.5;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The parsed model is immutable and shared across images; a fresh engine
/// instance is created per `detect` call because the engine itself is
/// stateful and not assumed thread-safe.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace model from a file on disk.
    pub fn from_file(path: &Path) -> Result<Self, FacecropError> {
        let bytes = fs::read(path)?;
        let model =
            rustface::read_model(Cursor::new(bytes)).map_err(|source| FacecropError::ModelLoad {
                path: path.to_path_buf(),
                message: source.to_string(),
            })?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, FacecropError> {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(ENGINE_MIN_FACE_SIZE);
        detector.set_score_thresh(ENGINE_SCORE_FLOOR);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&ImageData::new(gray.as_raw(), width, height));

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                Detection {
                    label: "face".to_string(),
                    bbox: BBox::from_xywh(
                        bbox.x() as f64,
                        bbox.y() as f64,
                        bbox.width() as f64,
                        bbox.height() as f64,
                    ),
                    score: normalize_score(face.score()),
                }
            })
            .collect())
    }
}

/// Squash the unbounded SeetaFace classifier score into `[0, 1)`.
///
/// `1 - exp(-raw)` is monotonic, so relative ranking is preserved, and maps
/// the commonly used raw cutoff of 2.0 to roughly 0.86, which puts the
/// default CLI threshold of 0.85 in a sensible place.
fn normalize_score(raw: f64) -> f64 {
    1.0 - (-raw.max(0.0)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_scores_stay_in_unit_interval() {
        for raw in [0.0, 0.5, 2.0, 10.0, 1000.0] {
            let score = normalize_score(raw);
            assert!((0.0..1.0).contains(&score), "raw {} gave {}", raw, score);
        }
    }

    #[test]
    fn normalization_is_monotonic() {
        assert!(normalize_score(1.0) < normalize_score(2.0));
        assert!(normalize_score(2.0) < normalize_score(5.0));
    }

    #[test]
    fn raw_cutoff_maps_near_default_threshold() {
        let score = normalize_score(2.0);
        assert!(score > 0.85 && score < 0.87, "got {}", score);
    }

    #[test]
    fn negative_raw_scores_clamp_to_zero() {
        assert_eq!(normalize_score(-3.0), 0.0);
    }
}
