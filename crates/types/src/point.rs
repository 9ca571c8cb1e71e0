//! 2D point / vector value type.
//!
//! `Point` doubles as a position and a direction vector. Every operation
//! returns a new value; nothing mutates in place.

use std::ops::{Add, Mul, Neg, Sub};

use crate::ROUGHLY_EQUALS_FUZZINESS;

/// A 2D coordinate or vector with `f64` components.
///
/// Equality is exact float comparison. Use [`Point::roughly_equals`] for
/// settling checks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin / zero vector.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Round both components half away from zero.
    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Fuzzy comparison used to settle floating positions and velocities.
    ///
    /// Each axis matches when `other` lies in `[self - fuzziness, self + fuzziness)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use asciiscape_types::Point;
    ///
    /// let p = Point::new(1.0, 1.0);
    /// assert!(p.roughly_equals(Point::new(1.4, 0.6), 0.5));
    /// assert!(!p.roughly_equals(Point::new(1.5, 1.0), 0.5));
    /// ```
    pub fn roughly_equals(&self, other: Point, fuzziness: f64) -> bool {
        let in_range = |value: f64, center: f64| value >= center - fuzziness && value < center + fuzziness;
        in_range(other.x, self.x) && in_range(other.y, self.y)
    }

    /// [`Point::roughly_equals`] with the default tolerance.
    pub fn roughly_equals_default(&self, other: Point) -> bool {
        self.roughly_equals(other, ROUGHLY_EQUALS_FUZZINESS)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector normalizes to [`Point::ZERO`] rather than NaN.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / magnitude, self.y / magnitude)
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Reflect this vector about a unit `normal`: `r = i - 2(i·n)n`.
    pub fn reflect(&self, normal: Point) -> Self {
        let dot = self.dot(normal);
        Self::new(self.x - 2.0 * dot * normal.x, self.y - 2.0 * dot * normal.y)
    }

    /// Component-wise multiplication.
    pub fn multiply(&self, other: Point) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Move `magnitude` units along `vector` starting from this point.
    pub fn project(&self, vector: Point, magnitude: f64) -> Self {
        *self + vector.scale(magnitude)
    }

    /// Rotate about the origin by `radian`, counter-clockwise as seen on screen.
    ///
    /// Because y grows downward, this is the mirror of the textbook rotation
    /// matrix: rotating `(1, 0)` by 90° yields `(0, -1)` (up).
    pub fn rotate(&self, radian: f64) -> Self {
        let (sin, cos) = radian.sin_cos();
        Self::new(self.x * cos + self.y * sin, -self.x * sin + self.y * cos)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        self.scale(rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
        assert_eq!(a.multiply(b), Point::new(3.0, -2.0));
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Point::ZERO.normalize(), Point::ZERO);
        assert_close(Point::new(3.0, 4.0).normalize(), Point::new(0.6, 0.8));
    }

    #[test]
    fn test_dot_cross() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.cross(b), 1.0);
        assert_eq!(b.cross(a), -1.0);
    }

    #[test]
    fn test_reflect_off_floor() {
        let incoming = Point::new(1.0, 1.0);
        let floor_normal = Point::new(0.0, -1.0);
        assert_eq!(incoming.reflect(floor_normal), Point::new(1.0, -1.0));
    }

    #[test]
    fn test_rotate_is_visually_counter_clockwise() {
        assert_close(Point::new(1.0, 0.0).rotate(FRAC_PI_2), Point::new(0.0, -1.0));
        assert_close(Point::new(0.0, -1.0).rotate(FRAC_PI_2), Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_project() {
        let origin = Point::new(1.0, 1.0);
        assert_eq!(origin.project(Point::new(1.0, 0.0), 5.0), Point::new(6.0, 1.0));
    }

    #[test]
    fn test_rounding() {
        let p = Point::new(1.5, -1.5);
        assert_eq!(p.round(), Point::new(2.0, -2.0));
        assert_eq!(p.floor(), Point::new(1.0, -2.0));
        assert_eq!(p.ceil(), Point::new(2.0, -1.0));
    }

    #[test]
    fn test_roughly_equals_is_half_open() {
        let p = Point::ZERO;
        assert!(p.roughly_equals_default(Point::new(-0.5, 0.49)));
        assert!(!p.roughly_equals_default(Point::new(0.5, 0.0)));
        assert!(!p.roughly_equals_default(Point::new(0.0, -0.51)));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::ZERO.distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
