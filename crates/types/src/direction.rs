//! Normalized input directions.

use crate::{Point, DEG_TO_RAD};

/// One of the eight compass directions, or no direction at all.
///
/// This is the input vector an external controller feeds into a body's
/// constant force. Vectors are in screen space (y down); radians follow the
/// visual convention (up is 90°).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// The eight non-zero directions, clockwise from up.
    pub const COMPASS: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// The four cardinal directions in sprite-sheet frame order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unnormalized unit-step vector (diagonals are `(±1, ±1)`).
    pub fn vector(&self) -> Point {
        match self {
            Direction::None => Point::ZERO,
            Direction::Up => Point::new(0.0, -1.0),
            Direction::UpRight => Point::new(1.0, -1.0),
            Direction::Right => Point::new(1.0, 0.0),
            Direction::DownRight => Point::new(1.0, 1.0),
            Direction::Down => Point::new(0.0, 1.0),
            Direction::DownLeft => Point::new(-1.0, 1.0),
            Direction::Left => Point::new(-1.0, 0.0),
            Direction::UpLeft => Point::new(-1.0, -1.0),
        }
    }

    /// Visual angle in radians, `None` for [`Direction::None`].
    pub fn radian(&self) -> Option<f64> {
        let degrees = match self {
            Direction::None => return None,
            Direction::Right => 0.0,
            Direction::UpRight => 45.0,
            Direction::Up => 90.0,
            Direction::UpLeft => 135.0,
            Direction::Left => 180.0,
            Direction::DownLeft => 225.0,
            Direction::Down => 270.0,
            Direction::DownRight => 315.0,
        };
        Some(degrees * DEG_TO_RAD)
    }

    /// Resolve a set of held arrow keys into a direction.
    ///
    /// Opposing keys cancel out; anything else maps to the matching compass
    /// direction.
    pub fn from_keys(up: bool, right: bool, down: bool, left: bool) -> Self {
        let dy = (down as i8) - (up as i8);
        let dx = (right as i8) - (left as i8);
        match (dx, dy) {
            (0, -1) => Direction::Up,
            (1, -1) => Direction::UpRight,
            (1, 0) => Direction::Right,
            (1, 1) => Direction::DownRight,
            (0, 1) => Direction::Down,
            (-1, 1) => Direction::DownLeft,
            (-1, 0) => Direction::Left,
            (-1, -1) => Direction::UpLeft,
            _ => Direction::None,
        }
    }

    /// Parse from a camelCase name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use asciiscape_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("down"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("DownRight"), Some(Direction::DownRight));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Direction::None),
            "up" => Some(Direction::Up),
            "upright" => Some(Direction::UpRight),
            "right" => Some(Direction::Right),
            "downright" => Some(Direction::DownRight),
            "down" => Some(Direction::Down),
            "downleft" => Some(Direction::DownLeft),
            "left" => Some(Direction::Left),
            "upleft" => Some(Direction::UpLeft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::UpRight => "upRight",
            Direction::Right => "right",
            Direction::DownRight => "downRight",
            Direction::Down => "down",
            Direction::DownLeft => "downLeft",
            Direction::Left => "left",
            Direction::UpLeft => "upLeft",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::Left => Direction::Right,
            Direction::UpLeft => Direction::DownRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys_covers_nine_values() {
        assert_eq!(Direction::from_keys(false, false, false, false), Direction::None);
        assert_eq!(Direction::from_keys(true, false, false, false), Direction::Up);
        assert_eq!(Direction::from_keys(true, true, false, false), Direction::UpRight);
        assert_eq!(Direction::from_keys(false, false, true, true), Direction::DownLeft);
        assert_eq!(Direction::from_keys(true, false, true, false), Direction::None);
        assert_eq!(Direction::from_keys(true, true, true, true), Direction::None);
    }

    #[test]
    fn test_radian_matches_vector() {
        for dir in Direction::COMPASS {
            let radian = dir.radian().unwrap();
            let expected = dir.vector().normalize();
            let actual = Point::new(radian.cos(), -radian.sin());
            assert!((expected.x - actual.x).abs() < 1e-9, "{:?}", dir);
            assert!((expected.y - actual.y).abs() < 1e-9, "{:?}", dir);
        }
    }

    #[test]
    fn test_round_trip_names() {
        for dir in Direction::COMPASS {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }
}
