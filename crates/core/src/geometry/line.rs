//! Line segments.

use crate::math::{radian_between_points, radian_to_vector, walk_line};
use crate::types::{BoundingBox, Point};

/// A segment between two points.
///
/// `length()` is Euclidean. The raster produced by [`Line::to_points`] uses
/// the Chebyshev step count instead, so a diagonal of length `√2` still
/// covers exactly two cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Visual angle from start to end in `[0, 2π)`.
    pub fn radian(&self) -> f64 {
        radian_between_points(self.start, self.end)
    }

    /// Unnormalized direction: `end - start`.
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Cells covered by the segment, walking from start to end.
    pub fn to_points(&self) -> Vec<Point> {
        walk_line(self.start, self.end)
    }

    /// Whether `point` is one of the raster cells of this segment.
    pub fn contains(&self, point: Point) -> bool {
        self.to_points().iter().any(|p| *p == point)
    }

    /// Unit perpendicular `(-dy, dx)`; zero for a degenerate segment.
    pub fn normal(&self) -> Point {
        let d = self.vector();
        Point::new(-d.y, d.x).normalize()
    }

    /// Rotate the end point around the start by `radian`, keeping the length.
    ///
    /// The new end is snapped to the cell grid.
    pub fn rotate(&mut self, radian: f64) {
        let angle = self.radian() + radian % std::f64::consts::TAU;
        self.end = self
            .start
            .project(radian_to_vector(angle), self.length())
            .round();
    }

    /// Move the end point along the current direction so the segment has `length`.
    pub fn set_length(&mut self, length: f64) -> &mut Self {
        self.end = self.start.project(radian_to_vector(self.radian()), length);
        self
    }

    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Intersection point of two segments, if any.
    ///
    /// Uses the parametric form: the hit exists when both parameters lie in
    /// `[0, 1]`. Zero-length and parallel (or collinear) segments never
    /// intersect.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }

        let (x1, y1, x2, y2) = (self.start.x, self.start.y, self.end.x, self.end.y);
        let (x3, y3, x4, y4) = (other.start.x, other.start.y, other.end.x, other.end.y);

        let denominator = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
        if denominator == 0.0 {
            return None;
        }

        let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denominator;
        let ub = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denominator;
        if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
            return None;
        }

        Some(Point::new(x1 + ua * (x2 - x1), y1 + ua * (y2 - y1)))
    }
}
