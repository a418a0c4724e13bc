//! Image enumeration for the batch driver.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FacecropError;

/// File extensions treated as images, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Collect all image files under `root`, sorted by path.
///
/// With `recursive` false only the top level of `root` is considered.
/// Sorting makes the processing order (and therefore output naming for a
/// deterministic detector) independent of filesystem enumeration order.
pub fn find_images(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, FacecropError> {
    let mut walker = WalkDir::new(root).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| FacecropError::Scan {
            path: root.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() && is_image_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn is_image_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}
