//! Sequential batch driver.
//!
//! Each image moves through detect -> filter -> expand -> resolve -> write,
//! exactly once, in enumeration order. Per-image failures are captured as
//! typed [`ImageOutcome`]s and never abort the batch; only a user interrupt
//! does, checked between images so already-written files are never left in a
//! half-written state.

mod report;

pub use report::{BatchReport, FailureStage, ImageOutcome, ImageStatus};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use image::GenericImageView;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::detect::FaceDetector;
use crate::error::FacecropError;
use crate::pipeline::{filter_detections, output_name, resolve_region, write_crop};

/// Knobs for one batch run. Mirrors the CLI surface minus the input paths.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Strict lower bound on detection confidence.
    pub threshold: f64,
    /// Box growth factor applied to kept boxes before cropping.
    pub extend_box: f64,
    /// Minimum width and height, in pixels, for a box to be kept.
    pub minimum_size: u32,
    /// When `Some(size)`, crops are resized to a size x size square.
    pub resize: Option<u32>,
    /// Directory crops are written into. Must already exist.
    pub output_dir: PathBuf,
}

/// Process every image in `images` and collect per-image outcomes.
///
/// Returns `Err(FacecropError::Interrupted)` as soon as `interrupt` is
/// observed set, without starting another image. Any other failure is local
/// to its image and recorded in the report.
pub fn run_batch(
    detector: &dyn FaceDetector,
    images: &[PathBuf],
    opts: &BatchOptions,
    interrupt: &AtomicBool,
) -> Result<BatchReport, FacecropError> {
    let progress = ProgressBar::new(images.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );

    let mut report = BatchReport::new();

    for path in images {
        if interrupt.load(Ordering::SeqCst) {
            progress.abandon();
            return Err(FacecropError::Interrupted);
        }

        let outcome = process_image(detector, path, opts);
        if let ImageStatus::Failed { stage, ref message } = outcome.status {
            warn!(path = %path.display(), %stage, %message, "image skipped");
        }
        report.add(outcome);
        progress.inc(1);
    }

    progress.finish();
    Ok(report)
}

/// Run one image through the full pipeline, mapping every failure into a
/// typed outcome instead of propagating it.
fn process_image(detector: &dyn FaceDetector, path: &Path, opts: &BatchOptions) -> ImageOutcome {
    let status = match crop_faces(detector, path, opts) {
        Ok(status) => status,
        Err(failure) => failure,
    };
    ImageOutcome {
        path: path.to_path_buf(),
        status,
    }
}

/// The per-image pipeline. The error side carries an already-classified
/// `ImageStatus::Failed`, so callers only ever see a terminal status.
fn crop_faces(
    detector: &dyn FaceDetector,
    path: &Path,
    opts: &BatchOptions,
) -> Result<ImageStatus, ImageStatus> {
    let image = image::open(path).map_err(|source| ImageStatus::Failed {
        stage: FailureStage::Decode,
        message: source.to_string(),
    })?;
    let (width, height) = image.dimensions();

    let detections = detector
        .detect(&image)
        .map_err(|source| ImageStatus::Failed {
            stage: FailureStage::Detect,
            message: source.to_string(),
        })?;

    let kept = filter_detections(&detections, opts.threshold, opts.minimum_size);
    debug!(
        path = %path.display(),
        detections = detections.len(),
        kept = kept.len(),
        "detections filtered"
    );

    let mut written = 0;
    let mut skipped = 0;
    for (index, bbox) in kept.iter().enumerate() {
        let expanded = bbox.expand(opts.extend_box);
        let Some(region) = resolve_region(&expanded, width, height) else {
            debug!(path = %path.display(), index, "crop region degenerated, skipping");
            skipped += 1;
            continue;
        };

        // The scanner only admits files with a stem and extension.
        let Some(name) = output_name(path, index) else {
            skipped += 1;
            continue;
        };

        let dest = opts.output_dir.join(name);
        write_crop(&image, region, &dest, opts.resize).map_err(|source| ImageStatus::Failed {
            stage: FailureStage::Write,
            message: source.to_string(),
        })?;
        written += 1;
    }

    Ok(ImageStatus::Done {
        detections: detections.len(),
        kept: kept.len(),
        written,
        skipped,
    })
}
