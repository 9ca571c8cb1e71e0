//! Axis-aligned bounding boxes.

use crate::Point;

/// Axis-aligned rectangle derived from a point set.
///
/// `width = right - left` and `height = bottom - top`. For boxes measured
/// from cell coordinates a single cell therefore has a width of zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// A zero-sized box at the origin. Used for content that was never drawn.
    pub const EMPTY: BoundingBox = BoundingBox {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for p in iter {
            left = left.min(p.x);
            right = right.max(p.x);
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        Some(Self::new(left, top, right, bottom))
    }

    /// Smallest box containing both `self` and `other`.
    pub fn merge(&self, other: &BoundingBox) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Merge any number of boxes. Order does not matter.
    pub fn merge_all<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(a) => Some(a.merge(b)),
                None => Some(*b),
            })
    }

    /// Translate the box; width and height are unchanged.
    pub fn offset(&self, offset: Point) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Grow every edge outward by `amount`.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// Strict overlap test after padding both boxes by `padding`.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &BoundingBox, padding: f64) -> bool {
        let a = self.expand(padding);
        let b = other.expand(padding);
        a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let b = BoundingBox::from_points([
            Point::new(2.0, 3.0),
            Point::new(-1.0, 5.0),
            Point::new(4.0, 0.0),
        ])
        .unwrap();
        assert_eq!(b, BoundingBox::new(-1.0, 0.0, 4.0, 5.0));
        assert_eq!(b.width, 5.0);
        assert_eq!(b.height, 5.0);
    }

    #[test]
    fn test_from_no_points() {
        assert_eq!(BoundingBox::from_points(std::iter::empty()), None);
    }

    #[test]
    fn test_single_point_has_zero_size() {
        let b = BoundingBox::from_points([Point::new(7.0, 7.0)]).unwrap();
        assert_eq!(b.width, 0.0);
        assert_eq!(b.height, 0.0);
    }

    #[test]
    fn test_merge() {
        let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BoundingBox::new(5.0, -3.0, 6.0, 1.0);
        assert_eq!(a.merge(&b), BoundingBox::new(0.0, -3.0, 6.0, 2.0));
        assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn test_offset_keeps_size() {
        let b = BoundingBox::new(0.0, 0.0, 2.0, 3.0).offset(Point::new(10.0, -1.0));
        assert_eq!(b, BoundingBox::new(10.0, -1.0, 12.0, 2.0));
    }

    #[test]
    fn test_overlap_with_padding() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(2.0, 0.0, 3.0, 1.0);
        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&b, 1.0));
    }
}
