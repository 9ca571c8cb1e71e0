//! Multi-line text blocks.

use crate::buffer::PixelBuffer;
use crate::types::{BoundingBox, Point, BLANK_CHARACTER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub align: Align,
    /// Fixed row width. Defaults to the longest line.
    pub width: Option<usize>,
    /// Padding character for short rows.
    pub fill: char,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            align: Align::Left,
            width: None,
            fill: BLANK_CHARACTER,
        }
    }
}

/// A block of text positioned at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub options: TextOptions,
}

impl Text {
    pub fn new(position: impl Into<Point>, content: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            content: content.into(),
            options: TextOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TextOptions) -> Self {
        self.options = options;
        self
    }

    fn rows(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    /// Row width after padding.
    pub fn columns(&self) -> usize {
        self.options
            .width
            .unwrap_or_else(|| self.rows().map(|r| r.chars().count()).max().unwrap_or(0))
    }

    pub fn line_count(&self) -> usize {
        self.rows().count()
    }

    /// Rows padded to [`Text::columns`] according to the alignment.
    pub fn lines(&self) -> Vec<String> {
        let columns = self.columns();
        let fill = self.options.fill;
        self.rows()
            .map(|row| {
                let len = row.chars().count();
                if len >= columns {
                    return row.to_string();
                }
                let pad = columns - len;
                let (before, after) = match self.options.align {
                    Align::Left => (0, pad),
                    Align::Right => (pad, 0),
                    Align::Center => (pad / 2, pad - pad / 2),
                };
                let mut line = String::with_capacity(columns * fill.len_utf8());
                line.extend(std::iter::repeat(fill).take(before));
                line.push_str(row);
                line.extend(std::iter::repeat(fill).take(after));
                line
            })
            .collect()
    }

    /// Local buffer with the first character at `(0, 0)`.
    pub fn draw(&self) -> PixelBuffer {
        PixelBuffer::parse(&self.lines().join("\n"))
    }

    /// Box occupied on screen.
    ///
    /// Without a fixed width, right-aligned text extends left of its position
    /// and centered text straddles it.
    pub fn bounding_box(&self) -> BoundingBox {
        let columns = self.columns() as f64;
        let rows = self.line_count() as f64;
        let mut left = self.position.x;
        if self.options.width.is_none() {
            match self.options.align {
                Align::Right => left -= columns,
                Align::Center => left -= (columns / 2.0).floor(),
                Align::Left => {}
            }
        }
        BoundingBox::new(left, self.position.y, left + columns, self.position.y + rows)
    }
}
