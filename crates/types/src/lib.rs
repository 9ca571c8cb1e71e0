//! Core types module - shared value types and constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! Everything here is a plain value with no external dependencies, so it can
//! be used by geometry, compositing, physics and terminal code alike.
//!
//! # Coordinate System
//!
//! Text cells are addressed by `(x, y)` where x grows to the right and
//! **y grows downward**. Angles are measured the way they look on screen:
//! counter-clockwise from the positive x axis, so "up" is 90° even though it
//! is the negative y direction.
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BLANK_CHARACTER` | `'⠀'` (U+2800) | Present-but-transparent cell |
//! | `DEFAULT_FILL` | `' '` | Fill used when serializing empty cells |
//! | `ROUGHLY_EQUALS_FUZZINESS` | 0.5 | Default tolerance for settling checks |
//! | `COLLISION_HULL_THICKNESS` | 1.0 | Broad-phase padding around bodies |
//! | `TARGET_FPMS` | 0.06 | Target frames per millisecond (60 FPS) |
//!
//! # Examples
//!
//! ```
//! use asciiscape_types::{BoundingBox, Direction, Point};
//!
//! let a = Point::new(1.0, 2.0);
//! let b = a + Point::new(2.0, 2.0);
//! assert_eq!(b, Point::new(3.0, 4.0));
//!
//! let box_a = BoundingBox::from_points([a, b]).unwrap();
//! assert_eq!(box_a.width, 2.0);
//!
//! assert_eq!(Direction::from_str("upLeft"), Some(Direction::UpLeft));
//! assert_eq!(Direction::Up.vector(), Point::new(0.0, -1.0));
//! ```

pub mod bounding_box;
pub mod direction;
pub mod point;

pub use bounding_box::BoundingBox;
pub use direction::Direction;
pub use point::Point;

/// Reserved character meaning "occupied but invisible".
///
/// A blank pixel is written into buffers (so it counts towards bounding boxes
/// and texture stamping) but is skipped when merging and never collides.
pub const BLANK_CHARACTER: char = '\u{2800}';

/// Character substituted for absent or `None` cells when serializing.
pub const DEFAULT_FILL: char = ' ';

/// Default tolerance used by [`Point::roughly_equals`].
pub const ROUGHLY_EQUALS_FUZZINESS: f64 = 0.5;

/// Padding added to both bounding boxes during broad-phase collision tests.
pub const COLLISION_HULL_THICKNESS: f64 = 1.0;

/// Target frames per millisecond (60 FPS).
///
/// `TickerDelta::delta_time` is `delta_ms * TARGET_FPMS`, so a frame that took
/// exactly 1/60th of a second has a `delta_time` of 1.0.
pub const TARGET_FPMS: f64 = 0.06;

/// Conversion factor for converting radians to degrees.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Conversion factor for converting degrees to radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Timing record delivered once per frame by the ticker.
///
/// `delta_ms` is already clamped and scaled by `speed`; `elapsed_ms` is the
/// raw wall-clock time since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickerDelta {
    pub delta_ms: f64,
    pub delta_time: f64,
    pub elapsed_ms: f64,
    pub speed: f64,
}

impl TickerDelta {
    /// Build a delta from an already-scaled millisecond step.
    ///
    /// Handy for tests and fixed-step simulations that bypass the ticker.
    pub fn from_ms(delta_ms: f64) -> Self {
        Self {
            delta_ms,
            delta_time: delta_ms * TARGET_FPMS,
            elapsed_ms: delta_ms,
            speed: 1.0,
        }
    }
}
