//! Nearest-hit queries of a segment against a set of shapes.

use crate::geometry::{Line, Shape};
use crate::types::Point;

/// A segment built from an origin, a direction and a length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub vector: Point,
    pub magnitude: f64,
    pub line: Line,
}

impl Ray {
    pub fn new(origin: Point, vector: Point, magnitude: f64) -> Self {
        Self {
            origin,
            vector,
            magnitude,
            line: Line::new(origin, origin.project(vector, magnitude)),
        }
    }

    /// Whether `point` is one of the raster cells the ray passes through.
    pub fn contains(&self, point: Point) -> bool {
        self.line.contains(point)
    }
}

impl From<Ray> for Line {
    fn from(ray: Ray) -> Self {
        ray.line
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub point: Point,
    /// Index of the hit shape in the haystack.
    pub shape_index: usize,
    /// The edge that was crossed; `None` for point targets.
    pub face: Option<Line>,
}

/// All intersections of one segment with a haystack, nearest first.
#[derive(Debug, Clone, Default)]
pub struct RayCaster {
    pub line: Option<Line>,
    intersections: Vec<CollisionResult>,
}

impl RayCaster {
    pub fn new(line: impl Into<Line>, haystack: &[Shape]) -> Self {
        let line = line.into();
        let mut intersections: Vec<CollisionResult> = haystack
            .iter()
            .enumerate()
            .flat_map(|(shape_index, shape)| test_shape(&line, shape_index, shape))
            .collect();

        intersections.sort_by(|a, b| {
            line.start
                .distance_to(a.point)
                .total_cmp(&line.start.distance_to(b.point))
        });

        Self {
            line: Some(line),
            intersections,
        }
    }

    pub fn intersections(&self) -> &[CollisionResult] {
        &self.intersections
    }

    pub fn first_intersection(&self) -> Option<&CollisionResult> {
        self.intersections.first()
    }

    pub fn has_intersection(&self) -> bool {
        !self.intersections.is_empty()
    }
}

fn test_shape(line: &Line, shape_index: usize, shape: &Shape) -> Vec<CollisionResult> {
    if let Shape::Point(target) = shape {
        return if line.contains(*target) {
            vec![CollisionResult {
                point: *target,
                shape_index,
                face: None,
            }]
        } else {
            Vec::new()
        };
    }

    shape
        .lines()
        .into_iter()
        .filter_map(|face| {
            line.intersection(&face).map(|point| CollisionResult {
                point,
                shape_index,
                face: Some(face),
            })
        })
        .collect()
}
