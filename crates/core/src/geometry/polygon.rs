//! Closed polygons and their rasterization.

use super::Line;
use crate::buffer::PixelBuffer;
use crate::math::bresenham;
use crate::types::{BoundingBox, Point, BLANK_CHARACTER};

/// Default character for polygon edges.
pub const POLYGON_STROKE: char = 'P';
/// Default character for polygon interiors.
pub const POLYGON_FILL: char = 'p';

/// A closed shape. The last point connects back to the first unless the
/// caller already repeated it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the first point is explicitly repeated at the end.
    pub fn is_explicitly_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Edges, including the implicit closing edge.
    pub fn lines(&self) -> Vec<Line> {
        let mut lines: Vec<Line> = self
            .points
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .collect();
        if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
            if self.points.len() > 2 && first != last {
                lines.push(Line::new(last, first));
            }
        }
        lines
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().copied()).unwrap_or(BoundingBox::EMPTY)
    }

    /// Even-odd point-in-polygon test with a horizontal ray towards +x.
    pub fn contains(&self, point: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (pi, pj) = (self.points[i], self.points[j]);
            if (pi.y > point.y) != (pj.y > point.y)
                && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Rasterize into a buffer covering the polygon's bounding box.
    ///
    /// Edges are stroked with Bresenham lines, interior cells get `fill`, and
    /// every other cell of the box is present as a blank pixel.
    pub fn rasterize(&self, stroke: char, fill: char) -> PixelBuffer {
        let mut buffer = PixelBuffer::new();
        let Some(bounds) = BoundingBox::from_points(self.points.iter().map(|p| p.round())) else {
            return buffer;
        };

        let (left, top) = (bounds.left as i32, bounds.top as i32);
        let (right, bottom) = (bounds.right as i32, bounds.bottom as i32);
        for y in top..=bottom {
            for x in left..=right {
                buffer.set(x, y, Some(BLANK_CHARACTER));
            }
        }

        let cells: Vec<(i32, i32)> = self
            .points
            .iter()
            .map(|p| (p.x.round() as i32, p.y.round() as i32))
            .collect();
        for i in 0..cells.len() {
            let a = cells[i];
            let b = cells[(i + 1) % cells.len()];
            for (x, y) in bresenham(a, b) {
                buffer.set(x, y, Some(stroke));
            }
        }

        for y in top..=bottom {
            for x in left..=right {
                if buffer.get(x, y) == Some(Some(BLANK_CHARACTER))
                    && self.contains(Point::new(x as f64, y as f64))
                {
                    buffer.set(x, y, Some(fill));
                }
            }
        }
        buffer
    }

    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.points.iter().map(|p| *p + offset).collect())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
