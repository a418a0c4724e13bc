//! Property tests for the box pipeline: expansion arithmetic, confidence
//! filtering, and region resolution.

use proptest::prelude::*;

use facecrop::detect::Detection;
use facecrop::geometry::BBox;
use facecrop::pipeline::{filter_detections, resolve_region};

/// Strategy for well-formed detector boxes (ordered, positive area).
fn ordered_bbox() -> impl Strategy<Value = BBox> {
    (
        -500.0..500.0f64,
        -500.0..500.0f64,
        1.0..300.0f64,
        1.0..300.0f64,
    )
        .prop_map(|(x, y, w, h)| BBox::from_xywh(x, y, w, h))
}

fn detection(score: f64, bbox: BBox) -> Detection {
    Detection {
        label: "face".to_string(),
        bbox,
        score,
    }
}

proptest! {
    #[test]
    fn expand_with_zero_factor_is_identity(bbox in ordered_bbox()) {
        prop_assert_eq!(bbox.expand(0.0), bbox);
    }

    #[test]
    fn expand_is_deterministic(bbox in ordered_bbox(), factor in 0.0..4.0f64) {
        prop_assert_eq!(bbox.expand(factor), bbox.expand(factor));
    }

    #[test]
    fn expanded_box_contains_original(bbox in ordered_bbox(), factor in 0.0..4.0f64) {
        let grown = bbox.expand(factor);
        prop_assert!(grown.contains(&bbox));
    }

    #[test]
    fn expansion_grows_right_at_least_as_much_as_left(
        bbox in ordered_bbox(),
        factor in 0.0..4.0f64,
    ) {
        let grown = bbox.expand(factor);
        let left_gain = bbox.x1 - grown.x1;
        let right_gain = grown.x2 - bbox.x2;
        prop_assert!(right_gain >= left_gain - 1e-9);
    }

    #[test]
    fn filter_keeps_exactly_strictly_above_threshold(
        scores in prop::collection::vec(0.0..1.0f64, 0..32),
        threshold in 0.0..1.0f64,
    ) {
        let detections: Vec<Detection> = scores
            .iter()
            .map(|&s| detection(s, BBox::from_xyxy(0.0, 0.0, 100.0, 100.0)))
            .collect();

        let kept = filter_detections(&detections, threshold, 0);
        let expected = scores.iter().filter(|&&s| s > threshold).count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn resolved_region_is_always_inside_image(
        bbox in ordered_bbox(),
        factor in 0.0..4.0f64,
        width in 1..2000u32,
        height in 1..2000u32,
    ) {
        if let Some(region) = resolve_region(&bbox.expand(factor), width, height) {
            prop_assert!(region.width > 0);
            prop_assert!(region.height > 0);
            prop_assert!(region.x + region.width <= width);
            prop_assert!(region.y + region.height <= height);
        }
    }

    #[test]
    fn inverted_boxes_never_resolve(
        x1 in 0.0..100.0f64,
        y1 in 0.0..100.0f64,
        w in 1.0..50.0f64,
        h in 1.0..50.0f64,
    ) {
        // Swap corners to make an inverted box.
        let bbox = BBox::from_xyxy(x1 + w, y1 + h, x1, y1);
        prop_assert!(resolve_region(&bbox, 200, 200).is_none());
    }
}
