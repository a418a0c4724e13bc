//! Pixel-space geometry for detection boxes and crop regions.

mod bbox;
mod region;

pub use bbox::BBox;
pub use region::CropRegion;
