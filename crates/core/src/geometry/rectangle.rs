//! Axis-aligned rectangles.

use super::Line;
use crate::error::CoreError;
use crate::types::{BoundingBox, Point};

/// Rectangle anchored at its top-left corner.
///
/// Containment is half-open: the top and left edges are inside, the bottom
/// and right edges are not. A `10 x 10` rectangle at the origin therefore
/// contains exactly the cells `0..10` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(position: impl Into<Point>, width: f64, height: f64) -> Self {
        Self {
            position: position.into(),
            width,
            height,
        }
    }

    /// Build from two corners; fails if `bottom_right` lies above or left of `top_left`.
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Result<Self, CoreError> {
        if bottom_right.x < top_left.x || bottom_right.y < top_left.y {
            return Err(CoreError::InvalidRectangle);
        }
        Ok(Self::new(
            top_left,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        ))
    }

    /// Rectangle covering every cell of a bounding box (both edges inclusive).
    pub fn covering(bounds: &BoundingBox) -> Self {
        Self::new(bounds.top_left(), bounds.width + 1.0, bounds.height + 1.0)
    }

    pub fn top_left(&self) -> Point {
        self.position
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.position.x + self.width, self.position.y + self.height)
    }

    /// Half-open containment test: `[top_left, bottom_right)` on both axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use asciiscape_core::Rectangle;
    /// use asciiscape_types::Point;
    ///
    /// let rect = Rectangle::new(Point::ZERO, 10.0, 10.0);
    /// assert!(rect.contains(Point::new(0.0, 0.0)));
    /// assert!(rect.contains(Point::new(9.0, 9.0)));
    /// assert!(!rect.contains(Point::new(10.0, 10.0)));
    /// ```
    pub fn contains(&self, point: Point) -> bool {
        let br = self.bottom_right();
        point.x >= self.position.x && point.x < br.x && point.y >= self.position.y && point.y < br.y
    }

    /// Edges in order: top, right, bottom, left.
    pub fn lines(&self) -> [Line; 4] {
        let tl = self.top_left();
        let br = self.bottom_right();
        let tr = Point::new(br.x, tl.y);
        let bl = Point::new(tl.x, br.y);
        [
            Line::new(tl, tr),
            Line::new(tr, br),
            Line::new(br, bl),
            Line::new(bl, tl),
        ]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let br = self.bottom_right();
        BoundingBox::new(self.position.x, self.position.y, br.x, br.y)
    }

    /// Integer cells inside the rectangle, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let left = self.position.x.ceil() as i32;
        let top = self.position.y.ceil() as i32;
        let br = self.bottom_right();
        let right = br.x.ceil() as i32;
        let bottom = br.y.ceil() as i32;
        (top..bottom).flat_map(move |y| (left..right).map(move |x| (x, y)))
    }

    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.position + offset, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rectangle::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.0, 9.0)));
        assert!(rect.contains(Point::new(9.99, 0.0)));
        assert!(!rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
        assert!(!rect.contains(Point::new(5.0, 10.0)));
        assert!(!rect.contains(Point::new(-0.01, 5.0)));
    }

    #[test]
    fn test_from_corners_rejects_inverted() {
        let err = Rectangle::from_corners(Point::new(5.0, 5.0), Point::new(0.0, 10.0));
        assert_eq!(err, Err(CoreError::InvalidRectangle));
    }

    #[test]
    fn test_lines_wrap_clockwise() {
        let rect = Rectangle::new((1.0, 2.0), 3.0, 4.0);
        let lines = rect.lines();
        assert_eq!(lines[0], Line::new((1.0, 2.0), (4.0, 2.0)));
        assert_eq!(lines[1], Line::new((4.0, 2.0), (4.0, 6.0)));
        assert_eq!(lines[2], Line::new((4.0, 6.0), (1.0, 6.0)));
        assert_eq!(lines[3], Line::new((1.0, 6.0), (1.0, 2.0)));
        assert_eq!(lines[3].end, lines[0].start);
    }

    #[test]
    fn test_cells_match_contains() {
        let rect = Rectangle::new((-1.0, 0.0), 3.0, 2.0);
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(cells.len(), 6);
        for (x, y) in cells {
            assert!(rect.contains(Point::new(x as f64, y as f64)));
        }
    }

    #[test]
    fn test_covering_bounding_box() {
        let rect = Rectangle::covering(&BoundingBox::new(2.0, 3.0, 4.0, 3.0));
        assert_eq!(rect.cells().count(), 3);
    }
}
