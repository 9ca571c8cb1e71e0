//! Property tests for compositing and geometry invariants

use std::collections::BTreeSet;

use proptest::prelude::*;

use asciiscape::core::{Line, MergeOptions, Pixel, PixelBuffer};
use asciiscape::types::{BoundingBox, Point};

fn bounding_box() -> impl Strategy<Value = BoundingBox> {
    (-50i32..50, -50i32..50, 0i32..20, 0i32..20).prop_map(|(x, y, w, h)| {
        let (x, y) = (x as f64, y as f64);
        BoundingBox::new(x, y, x + w as f64, y + h as f64)
    })
}

fn pixel() -> impl Strategy<Value = Pixel> {
    (0i32..12, 0i32..8, prop::option::weighted(0.8, prop::char::range('a', 'z')))
        .prop_map(|(x, y, value)| Pixel::new(x, y, value))
}

fn buffer() -> impl Strategy<Value = PixelBuffer> {
    prop::collection::vec(pixel(), 1..40).prop_map(PixelBuffer::from_pixels)
}

fn segment() -> impl Strategy<Value = Line> {
    (-20i32..20, -20i32..20, -20i32..20, -20i32..20).prop_map(|(x1, y1, x2, y2)| {
        Line::new(Point::from((x1, y1)), Point::from((x2, y2)))
    })
}

fn visible_set(buffer: &PixelBuffer, shift: (i32, i32)) -> BTreeSet<(i32, i32, char)> {
    buffer
        .visible_pixels()
        .filter_map(|p| p.value.map(|v| (p.x - shift.0, p.y - shift.1, v)))
        .filter(|(_, _, v)| *v != ' ')
        .collect()
}

proptest! {
    #[test]
    fn merge_all_is_order_independent(mut boxes in prop::collection::vec(bounding_box(), 1..8), rotate in 0usize..8) {
        let forward = BoundingBox::merge_all(&boxes);
        boxes.reverse();
        let reversed = BoundingBox::merge_all(&boxes);
        let shift = rotate % boxes.len();
        boxes.rotate_left(shift);
        let rotated = BoundingBox::merge_all(&boxes);

        prop_assert_eq!(forward, reversed);
        prop_assert_eq!(forward, rotated);
    }

    #[test]
    fn merge_is_associative(a in bounding_box(), b in bounding_box(), c in bounding_box()) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn self_merge_is_idempotent(original in buffer()) {
        let source = original.clone();
        let mut once = original.clone();
        once.merge(&source, MergeOptions::default());
        let mut twice = once.clone();
        twice.merge(&source, MergeOptions::default());

        prop_assert_eq!(visible_set(&once, (0, 0)), visible_set(&original, (0, 0)));
        prop_assert_eq!(visible_set(&twice, (0, 0)), visible_set(&once, (0, 0)));
    }

    #[test]
    fn parse_round_trips_visible_pixels(original in buffer()) {
        let text = original.to_string();
        let parsed = PixelBuffer::parse(text.trim_end_matches('\n'));
        let bounds = original.bounding_box();
        let shift = (bounds.left as i32, bounds.top as i32);

        prop_assert_eq!(visible_set(&parsed, (0, 0)), visible_set(&original, shift));
    }

    #[test]
    fn line_intersection_is_symmetric(a in segment(), b in segment()) {
        let ab = a.intersection(&b);
        let ba = b.intersection(&a);
        prop_assert_eq!(ab.is_some(), ba.is_some());
        if let (Some(p), Some(q)) = (ab, ba) {
            prop_assert!(p.distance_to(q) < 1e-6, "{:?} vs {:?}", p, q);
        }
    }
}
