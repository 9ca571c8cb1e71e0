//! Renderable content attached to nodes.

use crate::core::{CoreError, Paint, PixelBuffer, Shape};
use crate::types::Direction;

/// Anything that can produce a buffer in its own local frame.
pub trait Renderable {
    fn render(&self) -> PixelBuffer;
}

impl Renderable for Shape {
    fn render(&self) -> PixelBuffer {
        self.draw(Paint::default())
    }
}

/// A raw block of ASCII art drawn from `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub content: String,
}

impl Sprite {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Renderable for Sprite {
    fn render(&self) -> PixelBuffer {
        PixelBuffer::parse(&self.content)
    }
}

/// A grid of equally sized frames cut from one block of art.
///
/// Frames are laid out left to right, then top to bottom. Each frame column
/// is followed by one separator column, so a sheet of `3`-wide frames repeats
/// every 4 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    frames: Vec<String>,
    index: usize,
    pub frame_width: usize,
    pub frame_height: usize,
}

impl SpriteSheet {
    /// Split `content` into `num_frames` frames.
    pub fn new(
        content: &str,
        frame_width: usize,
        frame_height: usize,
        num_frames: usize,
    ) -> Result<Self, CoreError> {
        if frame_width == 0 || frame_height == 0 || num_frames == 0 {
            return Err(CoreError::InvalidSpriteSheet);
        }

        let rows: Vec<&str> = content.split('\n').collect();
        let mut frames: Vec<String> = Vec::new();
        for band in rows.chunks(frame_height) {
            let mut band_frames: Vec<Vec<String>> = Vec::new();
            for line in band {
                let chars: Vec<char> = line.chars().collect();
                for (column, chunk) in chars.chunks(frame_width + 1).enumerate() {
                    if band_frames.len() <= column {
                        band_frames.push(Vec::new());
                    }
                    let cell: String = chunk.iter().take(frame_width).collect();
                    band_frames[column].push(cell);
                }
            }
            frames.extend(band_frames.into_iter().map(|lines| lines.join("\n")));
        }

        if frames.len() < num_frames {
            return Err(CoreError::InvalidSpriteSheet);
        }
        frames.truncate(num_frames);
        Ok(Self {
            frames,
            index: 0,
            frame_width,
            frame_height,
        })
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame(&self) -> &str {
        &self.frames[self.index]
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.frames.len();
    }

    pub fn previous(&mut self) {
        self.index = (self.index + self.frames.len() - 1) % self.frames.len();
    }

    pub fn set_frame(&mut self, index: usize) {
        self.index = index % self.frames.len();
    }

    /// Pick the frame for a cardinal direction (up, right, down, left order).
    ///
    /// Returns `false` and leaves the frame alone for diagonals and `None`.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        match Direction::CARDINAL.iter().position(|d| *d == direction) {
            Some(index) => {
                self.set_frame(index);
                true
            }
            None => false,
        }
    }
}

impl Renderable for SpriteSheet {
    fn render(&self) -> PixelBuffer {
        PixelBuffer::parse(self.frame())
    }
}

/// The content a node draws before its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Shape { shape: Shape, paint: Paint },
    Sprite(Sprite),
    SpriteSheet(SpriteSheet),
}

impl Visual {
    pub fn shape(shape: impl Into<Shape>) -> Self {
        Visual::Shape {
            shape: shape.into(),
            paint: Paint::default(),
        }
    }

    pub fn painted(shape: impl Into<Shape>, paint: Paint) -> Self {
        Visual::Shape {
            shape: shape.into(),
            paint,
        }
    }
}

impl Renderable for Visual {
    fn render(&self) -> PixelBuffer {
        match self {
            Visual::Shape { shape, paint } => shape.draw(*paint),
            Visual::Sprite(sprite) => sprite.render(),
            Visual::SpriteSheet(sheet) => sheet.render(),
        }
    }
}

impl From<Sprite> for Visual {
    fn from(value: Sprite) -> Self {
        Visual::Sprite(value)
    }
}

impl From<SpriteSheet> for Visual {
    fn from(value: SpriteSheet) -> Self {
        Visual::SpriteSheet(value)
    }
}

impl From<Shape> for Visual {
    fn from(value: Shape) -> Self {
        Visual::shape(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // four 2x2 frames in a 2x2 grid, separated by one column
    const SHEET: &str = "^^ >>\n|| }}\nvv <<\n|| {{";

    #[test]
    fn test_frames_are_cut_row_major() {
        let sheet = SpriteSheet::new(SHEET, 2, 2, 4).unwrap();
        assert_eq!(sheet.num_frames(), 4);
        assert_eq!(sheet.frame(), "^^\n||");
    }

    #[test]
    fn test_next_previous_wrap() {
        let mut sheet = SpriteSheet::new(SHEET, 2, 2, 4).unwrap();
        sheet.previous();
        assert_eq!(sheet.index(), 3);
        assert_eq!(sheet.frame(), "<<\n{{");
        sheet.next();
        sheet.next();
        assert_eq!(sheet.frame(), ">>\n}}");
        sheet.set_frame(6);
        assert_eq!(sheet.index(), 2);
    }

    #[test]
    fn test_set_direction() {
        let mut sheet = SpriteSheet::new(SHEET, 2, 2, 4).unwrap();
        assert!(sheet.set_direction(Direction::Left));
        assert_eq!(sheet.index(), 3);
        assert!(!sheet.set_direction(Direction::UpLeft));
        assert_eq!(sheet.index(), 3);
    }

    #[test]
    fn test_invalid_sheets() {
        assert_eq!(SpriteSheet::new(SHEET, 0, 2, 4), Err(CoreError::InvalidSpriteSheet));
        assert_eq!(SpriteSheet::new(SHEET, 2, 2, 5), Err(CoreError::InvalidSpriteSheet));
    }

    #[test]
    fn test_sprite_renders_from_origin() {
        let buffer = Visual::from(Sprite::new("ab\ncd")).render();
        assert_eq!(buffer.get(0, 0), Some(Some('a')));
        assert_eq!(buffer.get(1, 1), Some(Some('d')));
    }
}
