//! Crop extraction and persistence.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::FacecropError;
use crate::geometry::{BBox, CropRegion};

/// Resolve a (possibly out-of-range) box against concrete image dimensions.
///
/// Coordinates are clamped to `[0, W] x [0, H]` and truncated to whole
/// pixels. Returns `None` when the clamped region has zero width or height,
/// when the box is inverted, or when any coordinate is non-finite; callers
/// must not write a file in that case.
pub fn resolve_region(bbox: &BBox, image_width: u32, image_height: u32) -> Option<CropRegion> {
    if !bbox.is_finite() {
        return None;
    }

    let x1 = bbox.x1.clamp(0.0, f64::from(image_width)) as u32;
    let y1 = bbox.y1.clamp(0.0, f64::from(image_height)) as u32;
    let x2 = bbox.x2.clamp(0.0, f64::from(image_width)) as u32;
    let y2 = bbox.y2.clamp(0.0, f64::from(image_height)) as u32;

    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    Some(CropRegion {
        x: x1,
        y: y1,
        width: x2 - x1,
        height: y2 - y1,
    })
}

/// Build the output filename for the `index`-th kept detection of an image.
///
/// `photo.jpg` with index 2 becomes `photo_2.jpg`; the original extension is
/// preserved byte-for-byte, including its case. Returns `None` for paths
/// without a stem or extension (the scanner never produces those).
pub fn output_name(source: &Path, index: usize) -> Option<String> {
    let stem = source.file_stem()?.to_str()?;
    let ext = source.extension()?.to_str()?;
    Some(format!("{stem}_{index}.{ext}"))
}

/// Extract `region` from `image`, optionally resize to a square, and save.
///
/// The resize uses triangle (bilinear) filtering with exact target
/// dimensions, so the output raster is always `size`x`size` regardless of
/// the region's aspect ratio, and identical inputs produce identical bytes.
pub fn write_crop(
    image: &DynamicImage,
    region: CropRegion,
    dest: &Path,
    resize_to: Option<u32>,
) -> Result<(), FacecropError> {
    let mut face = image.crop_imm(region.x, region.y, region.width, region.height);

    if let Some(size) = resize_to {
        face = face.resize_exact(size, size, FilterType::Triangle);
    }

    face.save(dest).map_err(|source| FacecropError::CropWrite {
        path: dest.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_box_resolves_exactly() {
        let bbox = BBox::from_xyxy(10.0, 20.0, 50.0, 60.0);
        let region = resolve_region(&bbox, 100, 100).unwrap();
        assert_eq!(
            region,
            CropRegion {
                x: 10,
                y: 20,
                width: 40,
                height: 40
            }
        );
    }

    #[test]
    fn out_of_range_box_is_clamped() {
        let bbox = BBox::from_xyxy(-40.0, -40.0, 162.5, 100.0);
        let region = resolve_region(&bbox, 100, 100).unwrap();
        assert_eq!(
            region,
            CropRegion {
                x: 0,
                y: 0,
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn fractional_coordinates_truncate() {
        let bbox = BBox::from_xyxy(10.9, 10.1, 50.7, 50.9);
        let region = resolve_region(&bbox, 100, 100).unwrap();
        assert_eq!(region.x, 10);
        assert_eq!(region.y, 10);
        assert_eq!(region.width, 40);
        assert_eq!(region.height, 40);
    }

    #[test]
    fn fully_outside_box_yields_none() {
        let bbox = BBox::from_xyxy(200.0, 200.0, 300.0, 300.0);
        assert!(resolve_region(&bbox, 100, 100).is_none());
        let negative = BBox::from_xyxy(-50.0, -50.0, -10.0, -10.0);
        assert!(resolve_region(&negative, 100, 100).is_none());
    }

    #[test]
    fn inverted_box_yields_none() {
        let bbox = BBox::from_xyxy(50.0, 50.0, 10.0, 10.0);
        assert!(resolve_region(&bbox, 100, 100).is_none());
    }

    #[test]
    fn zero_area_box_yields_none() {
        let bbox = BBox::from_xyxy(10.0, 10.0, 10.0, 50.0);
        assert!(resolve_region(&bbox, 100, 100).is_none());
    }

    #[test]
    fn nan_box_yields_none() {
        let bbox = BBox::from_xyxy(f64::NAN, 10.0, 50.0, 50.0);
        assert!(resolve_region(&bbox, 100, 100).is_none());
    }

    #[test]
    fn output_name_appends_index_before_extension() {
        assert_eq!(
            output_name(Path::new("/data/photo.jpg"), 0).unwrap(),
            "photo_0.jpg"
        );
        assert_eq!(
            output_name(Path::new("photo.jpg"), 12).unwrap(),
            "photo_12.jpg"
        );
    }

    #[test]
    fn output_name_preserves_extension_case() {
        assert_eq!(
            output_name(Path::new("IMG_0042.JPEG"), 1).unwrap(),
            "IMG_0042_1.JPEG"
        );
    }

    #[test]
    fn output_name_without_extension_is_none() {
        assert!(output_name(Path::new("no_extension"), 0).is_none());
    }
}
