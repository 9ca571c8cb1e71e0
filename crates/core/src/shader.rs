//! Post-processing applied to a node's own buffer before it is merged into
//! its parent.

use std::fmt;

use crate::buffer::{MergeOptions, PixelBuffer};
use crate::error::CoreError;
use crate::geometry::Rectangle;
use crate::position::PositionSpec;
use crate::text::Text;
use crate::types::Point;

pub trait Shader: fmt::Debug {
    fn apply(&self, buffer: &mut PixelBuffer);
}

fn parse_position(position: &str) -> Result<Option<PositionSpec>, CoreError> {
    let trimmed = position.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Stamp `src` onto existing cells only, placed by `position` inside the
/// buffer's bounding box.
fn stamp(buffer: &mut PixelBuffer, src: &str, position: Option<&PositionSpec>) {
    let local = Text::new(Point::ZERO, src).draw();
    let offset = position.map_or(Point::ZERO, |spec| {
        spec.relative_origin(&buffer.bounding_box(), &local.bounding_box())
    });
    buffer.merge(&local, MergeOptions::at(offset).lock_transparent_pixels());
}

/// Flood the buffer's box with a character and/or stamp a text pattern.
///
/// The pattern only lands on cells that already exist, so a background never
/// grows its shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Background {
    pub src: Option<String>,
    pub position: Option<PositionSpec>,
    pub fill: Option<char>,
}

impl Background {
    pub fn fill(value: char) -> Self {
        Self {
            fill: Some(value),
            ..Self::default()
        }
    }

    pub fn src(content: impl Into<String>) -> Self {
        Self {
            src: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, value: char) -> Self {
        self.fill = Some(value);
        self
    }

    /// Anchor the pattern, e.g. `"50% 50%"` to center it.
    pub fn at(mut self, position: &str) -> Result<Self, CoreError> {
        self.position = parse_position(position)?;
        Ok(self)
    }
}

impl Shader for Background {
    fn apply(&self, buffer: &mut PixelBuffer) {
        if let Some(fill) = self.fill {
            if !buffer.is_empty() {
                let bounds = buffer.bounding_box();
                buffer.fill_rectangle(&Rectangle::covering(&bounds), Some(fill));
            }
        }
        if let Some(src) = &self.src {
            stamp(buffer, src, self.position.as_ref());
        }
    }
}

/// A repeating-pattern style stamp measured from the buffer origin.
///
/// Unlike [`Background`] the optional fill covers everything from `(0, 0)` to
/// the far corner of the buffer, which suits shapes drawn in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub src: String,
    pub position: Option<PositionSpec>,
    pub fill: Option<char>,
}

impl Texture {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            position: None,
            fill: None,
        }
    }

    pub fn with_fill(mut self, value: char) -> Self {
        self.fill = Some(value);
        self
    }

    pub fn at(mut self, position: &str) -> Result<Self, CoreError> {
        self.position = parse_position(position)?;
        Ok(self)
    }
}

impl Shader for Texture {
    fn apply(&self, buffer: &mut PixelBuffer) {
        if let Some(fill) = self.fill {
            if !buffer.is_empty() {
                let bounds = buffer.bounding_box();
                let rect = Rectangle::new(Point::ZERO, bounds.right + 1.0, bounds.bottom + 1.0);
                buffer.fill_rectangle(&rect, Some(fill));
            }
        }
        stamp(buffer, &self.src, self.position.as_ref());
    }
}

/// Recolor every visible pixel with one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub value: char,
}

impl Fill {
    pub fn new(value: char) -> Self {
        Self { value }
    }
}

impl Shader for Fill {
    fn apply(&self, buffer: &mut PixelBuffer) {
        let visible: Vec<_> = buffer.visible_pixels().collect();
        for pixel in visible {
            buffer.set(pixel.x, pixel.y, Some(self.value));
        }
    }
}
