//! Integer crop regions resolved against a concrete image.

use serde::{Deserialize, Serialize};

/// A rectangular pixel region within a source image.
///
/// Unlike [`super::BBox`], a `CropRegion` is always in-bounds for the image
/// it was resolved against and always has nonzero width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
