//! One-time acquisition of the detection model asset.
//!
//! The SeetaFace frontal model is small (~2 MB) and published as a static
//! binary; if the configured model path does not exist yet it is downloaded
//! once and cached there. A download or write failure here is a setup error
//! and aborts the run before any image is processed.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::FacecropError;

/// Where the SeetaFace frontal detection model is published.
pub const MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

/// Default on-disk location for the cached model.
pub const DEFAULT_MODEL_PATH: &str = "seeta_fd_frontal_v1.0.bin";

/// Ensure the model file exists at `path`, downloading it if absent.
pub fn ensure_model(path: &Path) -> Result<(), FacecropError> {
    if path.exists() {
        debug!(path = %path.display(), "model already cached");
        return Ok(());
    }

    info!(url = MODEL_URL, "model not found, downloading");

    let mut response =
        ureq::get(MODEL_URL)
            .call()
            .map_err(|source| FacecropError::ModelDownload {
                url: MODEL_URL.to_string(),
                message: source.to_string(),
            })?;
    let bytes =
        response
            .body_mut()
            .read_to_vec()
            .map_err(|source| FacecropError::ModelDownload {
                url: MODEL_URL.to_string(),
                message: source.to_string(),
            })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &bytes)?;

    info!(path = %path.display(), bytes = bytes.len(), "model downloaded");
    Ok(())
}
