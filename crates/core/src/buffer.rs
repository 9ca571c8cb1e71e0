//! Sparse character buffers and compositing.
//!
//! A [`PixelBuffer`] maps integer cells to an optional character:
//!
//! | Stored value | Meaning |
//! |--------------|---------|
//! | absent | never drawn |
//! | `None` | present but unset (still counts towards the bounding box) |
//! | `Some(BLANK_CHARACTER)` | present, transparent for merges and collisions |
//! | `Some(c)` | visible character |
//!
//! Pixels are kept in row-major order, so serialization never depends on the
//! order in which they were written.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Rectangle;
use crate::math::rotate_points;
use crate::types::{BoundingBox, Point, BLANK_CHARACTER, DEFAULT_FILL};

/// One cell of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    pub value: Option<char>,
}

impl Pixel {
    pub fn new(x: i32, y: i32, value: Option<char>) -> Self {
        Self { x, y, value }
    }

    /// Drawn with a character other than the transparent blank.
    pub fn is_visible(&self) -> bool {
        is_visible(self.value)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

fn is_visible(value: Option<char>) -> bool {
    matches!(value, Some(c) if c != BLANK_CHARACTER)
}

/// Options for [`PixelBuffer::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MergeOptions {
    /// Added to every incoming pixel; the sum is rounded to a cell.
    pub offset: Point,
    /// Incoming pixels landing outside this rectangle are dropped.
    pub limit: Option<Rectangle>,
    /// Only overwrite cells that already exist, never insert new ones.
    pub lock_transparent_pixels: bool,
}

impl MergeOptions {
    pub fn at(offset: Point) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: Rectangle) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn lock_transparent_pixels(mut self) -> Self {
        self.lock_transparent_pixels = true;
        self
    }
}

/// Options for [`PixelBuffer::to_string_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToStringOptions {
    /// Only pixels inside this rectangle are serialized.
    pub crop: Option<Rectangle>,
    /// Substituted for absent and `None` cells.
    pub fill: char,
}

impl Default for ToStringOptions {
    fn default() -> Self {
        Self {
            crop: None,
            fill: DEFAULT_FILL,
        }
    }
}

/// A buffer placed at an offset, as used by [`PixelBuffer::intersect`].
#[derive(Debug, Clone, Copy)]
pub struct BufferAt<'a> {
    pub buffer: &'a PixelBuffer,
    pub offset: Point,
}

impl<'a> BufferAt<'a> {
    pub fn new(buffer: &'a PixelBuffer, offset: Point) -> Self {
        Self { buffer, offset }
    }
}

/// A cell shared by two buffers: the pixel as stored in the first buffer and
/// the same pixel moved to its offset position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectingPixel {
    pub source: Pixel,
    pub offset: Pixel,
}

#[derive(Debug, Clone, Default)]
pub struct PixelBuffer {
    // keyed by (y, x) so iteration is row-major
    pixels: BTreeMap<(i32, i32), Option<char>>,
    bounds: Cell<Option<BoundingBox>>,
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.pixels == other.pixels
    }
}

impl PixelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pixels<I>(pixels: I) -> Self
    where
        I: IntoIterator<Item = Pixel>,
    {
        let mut buffer = Self::new();
        for p in pixels {
            buffer.set(p.x, p.y, p.value);
        }
        buffer
    }

    /// Build a buffer from text: one row per line, one cell per character.
    ///
    /// # Examples
    ///
    /// ```
    /// use asciiscape_core::PixelBuffer;
    ///
    /// let buffer = PixelBuffer::parse("ab\nc");
    /// assert_eq!(buffer.get(1, 0), Some(Some('b')));
    /// assert_eq!(buffer.get(0, 1), Some(Some('c')));
    /// assert_eq!(buffer.get(1, 1), None);
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut buffer = Self::new();
        for (y, line) in input.split('\n').enumerate() {
            for (x, c) in line.chars().enumerate() {
                buffer.set(x as i32, y as i32, Some(c));
            }
        }
        buffer
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// `None` if the cell is absent, `Some(value)` otherwise.
    pub fn get(&self, x: i32, y: i32) -> Option<Option<char>> {
        self.pixels.get(&(y, x)).copied()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.pixels.contains_key(&(y, x))
    }

    pub fn set(&mut self, x: i32, y: i32, value: Option<char>) -> &mut Self {
        self.pixels.insert((y, x), value);
        self.bounds.set(None);
        self
    }

    pub fn remove(&mut self, x: i32, y: i32) -> Option<Option<char>> {
        let removed = self.pixels.remove(&(y, x));
        if removed.is_some() {
            self.bounds.set(None);
        }
        removed
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.pixels
            .iter()
            .map(|(&(y, x), &value)| Pixel::new(x, y, value))
    }

    pub fn visible_pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.pixels().filter(Pixel::is_visible)
    }

    /// Write `value` into every cell of `rect`. `None` clears to unset.
    pub fn fill_rectangle(&mut self, rect: &Rectangle, value: Option<char>) -> &mut Self {
        for (x, y) in rect.cells() {
            self.pixels.insert((y, x), value);
        }
        self.bounds.set(None);
        self
    }

    /// Reset every cell of `rect` to present-but-unset.
    pub fn delete_rectangle(&mut self, rect: &Rectangle) -> &mut Self {
        self.fill_rectangle(rect, None)
    }

    /// Composite `incoming` onto this buffer.
    ///
    /// Blank and `None` pixels of `incoming` are skipped. Each remaining pixel
    /// lands at `round(pixel + offset)`; it is dropped if outside
    /// `options.limit`, and with `lock_transparent_pixels` it only overwrites
    /// cells that already exist here.
    pub fn merge(&mut self, incoming: &PixelBuffer, options: MergeOptions) -> &mut Self {
        for pixel in incoming.visible_pixels() {
            let composed = (pixel.point() + options.offset).round();
            if let Some(limit) = &options.limit {
                if !limit.contains(composed) {
                    continue;
                }
            }
            let key = (composed.y as i32, composed.x as i32);
            if options.lock_transparent_pixels && !self.pixels.contains_key(&key) {
                continue;
            }
            self.pixels.insert(key, pixel.value);
        }
        self.bounds.set(None);
        self
    }

    /// Bounding box of every present cell, [`BoundingBox::EMPTY`] when empty.
    ///
    /// Computed lazily and cached until the next write.
    pub fn bounding_box(&self) -> BoundingBox {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = BoundingBox::from_points(self.pixels().map(|p| p.point()))
            .unwrap_or(BoundingBox::EMPTY);
        self.bounds.set(Some(bounds));
        bounds
    }

    /// Serialize rows top to bottom, one `'\n'`-terminated line per row.
    ///
    /// The output spans the bounding box of the (cropped) pixels; absent and
    /// `None` cells are written as `options.fill`.
    pub fn to_string_with(&self, options: &ToStringOptions) -> String {
        let in_crop = |p: &Pixel| options.crop.map_or(true, |rect| rect.contains(p.point()));
        let Some(bounds) = BoundingBox::from_points(self.pixels().filter(in_crop).map(|p| p.point()))
        else {
            return String::new();
        };

        let (left, top) = (bounds.left as i32, bounds.top as i32);
        let (right, bottom) = (bounds.right as i32, bounds.bottom as i32);
        let mut output = String::with_capacity(((right - left + 2) * (bottom - top + 1)) as usize);
        for y in top..=bottom {
            for x in left..=right {
                let value = match self.get(x, y) {
                    Some(value) if in_crop(&Pixel::new(x, y, value)) => value,
                    _ => None,
                };
                output.push(value.unwrap_or(options.fill));
            }
            output.push('\n');
        }
        output
    }

    /// Rotate every cell about the origin by `degrees`, counter-clockwise as
    /// seen on screen. Coordinates are snapped back to cells.
    pub fn rotate(&self, degrees: f64) -> PixelBuffer {
        let pixels: Vec<Pixel> = self.pixels().collect();
        let points: Vec<Point> = pixels.iter().map(Pixel::point).collect();
        let rotated = rotate_points(&points, degrees, 2);
        PixelBuffer::from_pixels(pixels.iter().zip(rotated).map(|(pixel, p)| {
            let p = p.round();
            Pixel::new(p.x as i32, p.y as i32, pixel.value)
        }))
    }

    /// Cells where both buffers, each moved by its offset, have a visible pixel.
    ///
    /// Returned pixels come from `a`, in row-major order of their offset
    /// position. This is the narrow-phase collision test.
    pub fn intersect(a: BufferAt<'_>, b: BufferAt<'_>) -> Vec<IntersectingPixel> {
        let place = |at: &BufferAt<'_>| -> BTreeMap<(i32, i32), IntersectingPixel> {
            at.buffer
                .visible_pixels()
                .map(|source| {
                    let p = (source.point() + at.offset).round();
                    let offset = Pixel::new(p.x as i32, p.y as i32, source.value);
                    ((offset.y, offset.x), IntersectingPixel { source, offset })
                })
                .collect()
        };

        let placed_a = place(&a);
        let placed_b = place(&b);
        placed_a
            .into_iter()
            .filter(|(key, _)| placed_b.contains_key(key))
            .map(|(_, hit)| hit)
            .collect()
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&ToStringOptions::default()))
    }
}
