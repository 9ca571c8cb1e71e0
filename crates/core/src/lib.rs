//! Geometry, compositing and ray casting - pure and deterministic
//!
//! This crate turns shapes and text into sparse character buffers and
//! combines those buffers. It has **no dependency** on the scene graph,
//! physics or the terminal, so everything here can be tested headless.
//!
//! # Module Structure
//!
//! - [`geometry`]: `Line`, `PolyLine`, `Polygon`, `Rectangle` and the closed `Shape` enum
//! - [`buffer`]: `PixelBuffer` with fill, merge (offset / clip / transparency lock),
//!   serialization and the pixel-level `intersect` used by collision detection
//! - [`text`]: aligned, padded multi-line text blocks
//! - [`shader`]: `Background`, `Texture` and `Fill` post-processing
//! - [`position`]: anchor strings such as `"50% 100%"`
//! - [`raycast`]: `Ray` and `RayCaster` (nearest hit first)
//! - [`assets`]: named ASCII-art library
//! - [`math`]: interpolation, line walking and angle helpers
//!
//! # Transparency
//!
//! | Cell | Merged into parent | Collides | Counts in bounding box |
//! |------|--------------------|----------|------------------------|
//! | absent | no | no | no |
//! | `None` | no | no | yes |
//! | `BLANK_CHARACTER` | no | no | yes |
//! | any other char | yes | yes | yes |
//!
//! # Example
//!
//! ```
//! use asciiscape_core::{MergeOptions, PixelBuffer, Rectangle};
//! use asciiscape_types::Point;
//!
//! let mut screen = PixelBuffer::new();
//! screen.fill_rectangle(&Rectangle::new(Point::ZERO, 4.0, 2.0), None);
//!
//! let sprite = PixelBuffer::parse("/\\");
//! screen.merge(&sprite, MergeOptions::at(Point::new(1.0, 1.0)));
//!
//! assert_eq!(screen.to_string(), "    \n /\\ \n");
//! ```

pub mod assets;
pub mod buffer;
pub mod error;
pub mod geometry;
pub mod math;
pub mod position;
pub mod raycast;
pub mod shader;
pub mod text;

pub use asciiscape_types as types;

// Re-export commonly used types for convenience
pub use assets::Assets;
pub use buffer::{BufferAt, IntersectingPixel, MergeOptions, Pixel, PixelBuffer, ToStringOptions};
pub use error::CoreError;
pub use geometry::{Line, Paint, PolyLine, Polygon, Rectangle, Shape};
pub use position::{relative_origin_point, Offset, PositionSpec};
pub use raycast::{CollisionResult, Ray, RayCaster};
pub use shader::{Background, Fill, Shader, Texture};
pub use text::{Align, Text, TextOptions};
