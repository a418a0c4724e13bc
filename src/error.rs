use std::path::PathBuf;
use thiserror::Error;

/// The main error type for facecrop operations.
#[derive(Debug, Error)]
pub enum FacecropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory does not exist: {path}")]
    InputDirMissing { path: PathBuf },

    #[error("Failed to scan {path}: {message}")]
    Scan { path: PathBuf, message: String },

    #[error("Failed to download model from {url}: {message}")]
    ModelDownload { url: String, message: String },

    #[error("Failed to load detection model from {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("Face detection failed: {message}")]
    Inference { message: String },

    #[error("Failed to write crop to {path}: {source}")]
    CropWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to serialize batch report: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    #[error("Interrupted by user")]
    Interrupted,
}
