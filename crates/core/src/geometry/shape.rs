//! Closed set of drawable shapes.

use super::{Line, PolyLine, Polygon, Rectangle, POLYGON_FILL, POLYGON_STROKE};
use crate::buffer::{MergeOptions, PixelBuffer};
use crate::text::Text;
use crate::types::{BoundingBox, Point};

/// Default character for points, lines and polylines.
pub const LINE_STROKE: char = 'l';

/// Characters used when rasterizing a [`Shape`].
///
/// `None` picks the shape's default. Rectangles without a fill are drawn as
/// present-but-unset cells, ready for a background shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    pub stroke: Option<char>,
    pub fill: Option<char>,
}

impl Paint {
    pub fn stroke(value: char) -> Self {
        Self {
            stroke: Some(value),
            fill: None,
        }
    }

    pub fn fill(value: char) -> Self {
        Self {
            stroke: None,
            fill: Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Line(Line),
    PolyLine(PolyLine),
    Polygon(Polygon),
    Rectangle(Rectangle),
    Text(Text),
}

impl Shape {
    /// Edge segments used by ray casting. Text counts as its bounding rectangle.
    pub fn lines(&self) -> Vec<Line> {
        match self {
            Shape::Point(_) => Vec::new(),
            Shape::Line(line) => vec![*line],
            Shape::PolyLine(polyline) => polyline.lines(),
            Shape::Polygon(polygon) => polygon.lines(),
            Shape::Rectangle(rect) => rect.lines().to_vec(),
            Shape::Text(text) => {
                let b = text.bounding_box();
                Rectangle::new(b.top_left(), b.width, b.height).lines().to_vec()
            }
        }
    }

    /// Geometric bounding box (not the rasterized cell extent).
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Point(p) => BoundingBox::new(p.x, p.y, p.x, p.y),
            Shape::Line(line) => line.bounding_box(),
            Shape::PolyLine(polyline) => polyline.bounding_box(),
            Shape::Polygon(polygon) => polygon.bounding_box(),
            Shape::Rectangle(rect) => rect.bounding_box(),
            Shape::Text(text) => text.bounding_box(),
        }
    }

    /// Rasterize in the shape's own coordinate space.
    pub fn draw(&self, paint: Paint) -> PixelBuffer {
        let stroke = paint.stroke.unwrap_or(LINE_STROKE);
        match self {
            Shape::Point(p) => {
                let p = p.round();
                let mut buffer = PixelBuffer::new();
                buffer.set(p.x as i32, p.y as i32, Some(stroke));
                buffer
            }
            Shape::Line(line) => stroke_cells(line.to_points(), stroke),
            Shape::PolyLine(polyline) => stroke_cells(polyline.to_points(), stroke),
            Shape::Polygon(polygon) => polygon.rasterize(
                paint.stroke.unwrap_or(POLYGON_STROKE),
                paint.fill.unwrap_or(POLYGON_FILL),
            ),
            Shape::Rectangle(rect) => {
                let mut buffer = PixelBuffer::new();
                buffer.fill_rectangle(rect, paint.fill);
                buffer
            }
            Shape::Text(text) => {
                let mut buffer = PixelBuffer::new();
                let local = text.draw();
                for pixel in local.pixels() {
                    let p = (pixel.point() + text.position).round();
                    buffer.set(p.x as i32, p.y as i32, pixel.value);
                }
                buffer
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Point(_) => "point",
            Shape::Line(_) => "line",
            Shape::PolyLine(_) => "polyline",
            Shape::Polygon(_) => "polygon",
            Shape::Rectangle(_) => "rectangle",
            Shape::Text(_) => "text",
        }
    }
}

fn stroke_cells(cells: Vec<Point>, stroke: char) -> PixelBuffer {
    let mut buffer = PixelBuffer::new();
    for cell in cells {
        buffer.set(cell.x as i32, cell.y as i32, Some(stroke));
    }
    buffer
}

/// Merge several shapes drawn with the same paint into one buffer.
pub fn draw_all<'a, I>(shapes: I, paint: Paint) -> PixelBuffer
where
    I: IntoIterator<Item = &'a Shape>,
{
    let mut buffer = PixelBuffer::new();
    for shape in shapes {
        buffer.merge(&shape.draw(paint), MergeOptions::default());
    }
    buffer
}

impl From<Point> for Shape {
    fn from(value: Point) -> Self {
        Shape::Point(value)
    }
}

impl From<Line> for Shape {
    fn from(value: Line) -> Self {
        Shape::Line(value)
    }
}

impl From<PolyLine> for Shape {
    fn from(value: PolyLine) -> Self {
        Shape::PolyLine(value)
    }
}

impl From<Polygon> for Shape {
    fn from(value: Polygon) -> Self {
        Shape::Polygon(value)
    }
}

impl From<Rectangle> for Shape {
    fn from(value: Rectangle) -> Self {
        Shape::Rectangle(value)
    }
}

impl From<Text> for Shape {
    fn from(value: Text) -> Self {
        Shape::Text(value)
    }
}
