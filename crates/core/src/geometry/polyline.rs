//! Open paths made of consecutive segments.

use super::Line;
use crate::error::CoreError;
use crate::math::{total_distance, trim_points_to_length};
use crate::types::{BoundingBox, Point};

/// An ordered list of points joined by straight segments.
///
/// Unlike [`super::Polygon`] the path is never closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyLine {
    points: Vec<Point>,
}

impl PolyLine {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments between consecutive points.
    pub fn lines(&self) -> Vec<Line> {
        self.points
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .collect()
    }

    pub fn first(&self) -> Result<Point, CoreError> {
        self.points.first().copied().ok_or(CoreError::EmptyPolyLine)
    }

    pub fn last(&self) -> Result<Point, CoreError> {
        self.points.last().copied().ok_or(CoreError::EmptyPolyLine)
    }

    /// Append a point at the end of the path.
    pub fn add(&mut self, point: Point) -> &mut Self {
        self.points.push(point);
        self
    }

    /// Insert a point at the start of the path.
    pub fn prepend(&mut self, point: Point) -> &mut Self {
        self.points.insert(0, point);
        self
    }

    /// Replace the point at `index`. Returns `false` if out of range.
    pub fn set(&mut self, index: usize, point: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, index: usize) -> Option<Point> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    /// Total Euclidean length of all segments.
    pub fn length(&self) -> f64 {
        total_distance(&self.points)
    }

    /// Shorten the path to at most `length`, cutting from the end.
    pub fn trim(&mut self, length: f64) -> Result<(), CoreError> {
        if self.points.is_empty() {
            return Err(CoreError::EmptyPolyLine);
        }
        self.points = trim_points_to_length(&self.points, length);
        Ok(())
    }

    /// Bounding box of the vertices; [`BoundingBox::EMPTY`] when there are none.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().copied()).unwrap_or(BoundingBox::EMPTY)
    }

    /// Raster cells of every segment, without repeating shared joints.
    pub fn to_points(&self) -> Vec<Point> {
        if self.points.len() == 1 {
            return vec![self.points[0].round()];
        }
        let mut cells: Vec<Point> = Vec::new();
        for line in self.lines() {
            for cell in line.to_points() {
                if cells.last() != Some(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.points.iter().map(|p| *p + offset).collect())
    }
}

impl From<Vec<Point>> for PolyLine {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
