//! Shape primitives. Every shape exposes `lines()` and a bounding box.

mod line;
mod polygon;
mod polyline;
mod rectangle;
mod shape;

pub use line::Line;
pub use polygon::{Polygon, POLYGON_FILL, POLYGON_STROKE};
pub use polyline::PolyLine;
pub use rectangle::Rectangle;
pub use shape::{draw_all, Paint, Shape, LINE_STROKE};
