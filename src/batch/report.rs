//! Structured per-image outcomes and the batch summary report.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The result of processing one batch of images.
///
/// Holds one [`ImageOutcome`] per image found, in processing order. The
/// default CLI output is the `Display` summary; `--report json` serializes
/// the full report including every outcome.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// One outcome per image, in processing order.
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Adds an outcome to the report.
    pub fn add(&mut self, outcome: ImageOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of images found and attempted.
    pub fn images_found(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of images that reached the `Done` state.
    pub fn done_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ImageStatus::Done { .. }))
            .count()
    }

    /// Number of images that failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.done_count()
    }

    /// Total number of face crops written across all images.
    pub fn faces_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                ImageStatus::Done { written, .. } => written,
                ImageStatus::Failed { .. } => 0,
            })
            .sum()
    }

    /// Total number of kept detections whose region degenerated after
    /// clamping and was skipped.
    pub fn regions_skipped(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                ImageStatus::Done { skipped, .. } => skipped,
                ImageStatus::Failed { .. } => 0,
            })
            .sum()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} image(s): {} done, {} failed, {} face(s) written",
            self.images_found(),
            self.done_count(),
            self.failed_count(),
            self.faces_written()
        )?;

        let skipped = self.regions_skipped();
        if skipped > 0 {
            writeln!(f, "  {} crop region(s) skipped as empty", skipped)?;
        }

        for outcome in &self.outcomes {
            if let ImageStatus::Failed { stage, ref message } = outcome.status {
                writeln!(
                    f,
                    "  [FAIL] {} ({}): {}",
                    outcome.path.display(),
                    stage,
                    message
                )?;
            }
        }

        Ok(())
    }
}

impl Serialize for BatchReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BatchReport", 5)?;
        state.serialize_field("images_found", &self.images_found())?;
        state.serialize_field("done", &self.done_count())?;
        state.serialize_field("failed", &self.failed_count())?;
        state.serialize_field("faces_written", &self.faces_written())?;
        state.serialize_field("outcomes", &self.outcomes)?;
        state.end()
    }
}

/// The typed result of processing one image.
#[derive(Clone, Debug, Serialize)]
pub struct ImageOutcome {
    /// Path of the source image.
    pub path: PathBuf,
    /// Terminal state the image reached.
    pub status: ImageStatus,
}

/// Terminal state of one image's processing.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageStatus {
    /// The image was decoded, detected, and all viable crops written.
    Done {
        /// Detections emitted by the detector.
        detections: usize,
        /// Detections that survived the confidence and size filters.
        kept: usize,
        /// Crop files actually written.
        written: usize,
        /// Kept detections skipped because their region degenerated.
        skipped: usize,
    },
    /// The image was abandoned; no further output was written for it.
    Failed {
        /// The pipeline stage that failed.
        stage: FailureStage,
        /// Human-readable failure description.
        message: String,
    },
}

/// The pipeline stage at which an image failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// The image file could not be decoded.
    Decode,
    /// The detector reported an inference error.
    Detect,
    /// A crop file could not be written.
    Write,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Decode => write!(f, "decode"),
            FailureStage::Detect => write!(f, "detect"),
            FailureStage::Write => write!(f, "write"),
        }
    }
}
