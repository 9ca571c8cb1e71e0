//! Scalar and point helpers shared by geometry and rasterization.
//!
//! Line walking follows the "diagonal distance" approach: a segment is sampled
//! at `max(|dx|, |dy|)` evenly spaced steps, each rounded to the nearest cell.

use crate::types::{Point, DEG_TO_RAD};

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + t * end
}

/// Interpolate between two points and round to the nearest cell.
pub fn lerp_point(p0: Point, p1: Point, t: f64) -> Point {
    Point::new(lerp(p0.x, p1.x, t), lerp(p0.y, p1.y, t)).round()
}

/// Chebyshev (max-axis) distance: the number of steps in a line walk.
pub fn diagonal_distance(p0: Point, p1: Point) -> f64 {
    (p1.x - p0.x).abs().max((p1.y - p0.y).abs())
}

/// Cells visited walking from `p0` to `p1`, both ends included.
pub fn walk_line(p0: Point, p1: Point) -> Vec<Point> {
    let steps = diagonal_distance(p0, p1).round() as usize;
    (0..=steps)
        .map(|step| {
            let t = if steps == 0 { 0.0 } else { step as f64 / steps as f64 };
            lerp_point(p0, p1, t)
        })
        .collect()
}

/// Bresenham cells between two integer coordinates, both ends included.
pub fn bresenham(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x, mut y) = a;
    let dx = (b.0 - x).abs();
    let dy = -(b.1 - y).abs();
    let sx = if x < b.0 { 1 } else { -1 };
    let sy = if y < b.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);

    loop {
        cells.push((x, y));
        if x == b.0 && y == b.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// Visual angle from `p0` to `p1`, in `[0, 2π)`.
///
/// y is flipped because screen coordinates grow downward.
pub fn radian_between_points(p0: Point, p1: Point) -> f64 {
    let result = (-(p1.y - p0.y)).atan2(p1.x - p0.x);
    if result < 0.0 {
        result + std::f64::consts::TAU
    } else {
        result
    }
}

/// Unit screen-space vector for a visual angle.
pub fn radian_to_vector(radian: f64) -> Point {
    Point::new(radian.cos(), -radian.sin())
}

pub fn vector_between_points(p0: Point, p1: Point) -> Point {
    radian_to_vector(radian_between_points(p0, p1))
}

/// Sum of Euclidean segment lengths along a path.
pub fn total_distance(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

/// Cut a path so its total length does not exceed `max_length`.
///
/// The segment that crosses the limit is shortened and its new end rounded to
/// a cell.
pub fn trim_points_to_length(points: &[Point], max_length: f64) -> Vec<Point> {
    let mut trimmed = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut i = 0;
    while total < max_length && i < points.len() {
        let point = points[i];
        trimmed.push(point);
        if let Some(&next) = points.get(i + 1) {
            let segment = point.distance_to(next);
            total += segment;
            if total > max_length {
                let remainder = segment - (total - max_length);
                trimmed.push(
                    point
                        .project(vector_between_points(point, next), remainder)
                        .round(),
                );
            }
        }
        i += 1;
    }
    trimmed
}

/// Rotate points about the origin by `degrees`, rounding to `precision` decimals.
pub fn rotate_points(points: &[Point], degrees: f64, precision: i32) -> Vec<Point> {
    let radian = degrees * DEG_TO_RAD;
    let factor = 10f64.powi(precision);
    points
        .iter()
        .map(|p| {
            let rotated = p.rotate(radian);
            Point::new(
                (rotated.x * factor).round() / factor,
                (rotated.y * factor).round() / factor,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_walk_line_horizontal() {
        let cells = walk_line(Point::new(0.0, 0.0), Point::new(3.0, 0.0));
        assert_eq!(
            cells,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(3.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_walk_line_single_cell() {
        assert_eq!(walk_line(Point::new(2.0, 2.0), Point::new(2.0, 2.0)).len(), 1);
    }

    #[test]
    fn test_walk_line_diagonal_has_chebyshev_steps() {
        let cells = walk_line(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        assert_eq!(cells.len(), 5);
        assert_eq!(cells.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(cells.last(), Some(&Point::new(4.0, 2.0)));
    }

    #[test]
    fn test_bresenham_endpoints() {
        let cells = bresenham((0, 0), (5, 2));
        assert_eq!(cells.first(), Some(&(0, 0)));
        assert_eq!(cells.last(), Some(&(5, 2)));
        assert_eq!(cells.len(), 6);
        let reverse = bresenham((3, 3), (0, 0));
        assert_eq!(reverse.len(), 4);
    }

    #[test]
    fn test_radian_between_points_uses_visual_convention() {
        let origin = Point::ZERO;
        assert!((radian_between_points(origin, Point::new(1.0, 0.0))).abs() < 1e-9);
        assert!((radian_between_points(origin, Point::new(0.0, -1.0)) - FRAC_PI_2).abs() < 1e-9);
        assert!((radian_between_points(origin, Point::new(-1.0, 0.0)) - PI).abs() < 1e-9);
        assert!((radian_between_points(origin, Point::new(0.0, 1.0)) - 3.0 * FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_vector_between_points() {
        let v = vector_between_points(Point::new(1.0, 1.0), Point::new(1.0, 5.0));
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trim_points_to_length() {
        let path = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert_eq!(total_distance(&path), 20.0);

        let trimmed = trim_points_to_length(&path, 15.0);
        assert_eq!(
            trimmed,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.0)]
        );
    }

    #[test]
    fn test_rotate_points_quarter_turn() {
        let rotated = rotate_points(&[Point::new(2.0, 0.0)], 90.0, 2);
        assert_eq!(rotated, vec![Point::new(0.0, -2.0)]);
    }
}
