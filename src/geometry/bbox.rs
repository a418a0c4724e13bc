//! Axis-aligned bounding boxes in XYXY pixel coordinates.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (x1, y1, x2, y2) in image pixel coordinates.
///
/// Detectors are expected to emit ordered boxes (x1 < x2, y1 < y2), but the
/// type itself does not enforce this. [`BBox::expand`] can push coordinates
/// outside the image and the constructor accepts inverted boxes; whether a
/// box yields a usable crop is decided later, when it is resolved against
/// actual image dimensions.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    /// Creates a new bounding box from corner coordinates.
    #[inline]
    pub fn from_xyxy(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a bounding box from XYWH format, where (x, y) is the top-left
    /// corner. This is the format most detector backends report.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    /// Returns the width of the box. Negative if the box is inverted.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Returns the height of the box. Negative if the box is inverted.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Returns true if the box is properly ordered (x1 <= x2 and y1 <= y2).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns true if `other` lies entirely within this box.
    #[inline]
    pub fn contains(&self, other: &BBox) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    /// Grows the box outward by `extend_factor` times its width/height.
    ///
    /// The growth is deliberately asymmetric: the left, top, and bottom edges
    /// each move by `factor` times the original width or height, while the
    /// right edge is extended using the width measured from the
    /// *already-shifted* left edge. For factor `f` the left edge gains
    /// `w * f` and the right edge gains `w * f * (1 + f)`, biasing the crop
    /// to the right of the detection. A factor of 0 returns the box
    /// unchanged.
    ///
    /// The result is not clamped to any image bounds; see
    /// [`crate::pipeline::resolve_region`].
    pub fn expand(&self, extend_factor: f64) -> BBox {
        let w = self.width();
        let h = self.height();
        let x1 = self.x1 - w * extend_factor;
        let y1 = self.y1 - h * extend_factor;
        // Width recomputed against the shifted left edge, not the original.
        let x2 = self.x2 + (self.x2 - x1) * extend_factor;
        let y2 = self.y2 + h * extend_factor;
        BBox { x1, y1, x2, y2 }
    }
}

impl std::fmt::Debug for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("x1", &self.x1)
            .field("y1", &self.y1)
            .field("x2", &self.x2)
            .field("y2", &self.y2)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_from_xyxy() {
        let bbox = BBox::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.width(), 90.0);
        assert_eq!(bbox.height(), 60.0);
        assert!(bbox.is_ordered());
    }

    #[test]
    fn test_bbox_from_xywh() {
        let bbox = BBox::from_xywh(10.0, 20.0, 90.0, 60.0);
        assert_eq!(bbox.x2, 100.0);
        assert_eq!(bbox.y2, 80.0);
    }

    #[test]
    fn test_inverted_box_detected() {
        let bbox = BBox::from_xyxy(100.0, 80.0, 10.0, 20.0);
        assert!(!bbox.is_ordered());
        assert!(bbox.width() < 0.0);
    }

    #[test]
    fn test_expand_zero_factor_is_identity() {
        let bbox = BBox::from_xyxy(10.0, 10.0, 50.0, 50.0);
        assert_eq!(bbox.expand(0.0), bbox);
    }

    #[test]
    fn test_expand_asymmetric_growth() {
        // 40x40 box grown by 1.25: left/top/bottom move by 50, the right
        // edge by (50 - (-40)) * 1.25 = 112.5.
        let bbox = BBox::from_xyxy(10.0, 10.0, 50.0, 50.0);
        let grown = bbox.expand(1.25);
        assert_eq!(grown.x1, -40.0);
        assert_eq!(grown.y1, -40.0);
        assert_eq!(grown.x2, 162.5);
        assert_eq!(grown.y2, 100.0);
    }

    #[test]
    fn test_expand_contains_original() {
        let bbox = BBox::from_xyxy(5.0, 7.0, 31.0, 44.0);
        for factor in [0.0, 0.1, 0.5, 1.25, 3.0] {
            let grown = bbox.expand(factor);
            assert!(
                grown.contains(&bbox),
                "factor {} produced {:?} not containing {:?}",
                factor,
                grown,
                bbox
            );
        }
    }

    #[test]
    fn test_expand_right_gains_more_than_left() {
        let bbox = BBox::from_xyxy(0.0, 0.0, 100.0, 100.0);
        let grown = bbox.expand(0.5);
        let left_gain = bbox.x1 - grown.x1;
        let right_gain = grown.x2 - bbox.x2;
        assert_eq!(left_gain, 50.0);
        assert_eq!(right_gain, 75.0); // 100 * 0.5 * 1.5
    }
}
