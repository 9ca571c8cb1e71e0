//! Scene to text.
//!
//! Each frame starts from a screen-sized buffer of `None` cells, so every
//! row serializes to the full canvas width. The scene is merged on top,
//! clipped to the screen.

use anyhow::Result;

use crate::core::{MergeOptions, PixelBuffer, Rectangle, ToStringOptions};
use crate::engine::{NodeId, Scene, SceneError, Settings};
use crate::renderer::TextSink;
use crate::types::{Point, BLANK_CHARACTER, DEFAULT_FILL};

/// Columns (and rows) the debug ruler adds on each side.
pub const RULER_WIDTH: i32 = 3;

/// Row and column numbers framing a `width` x `height` screen.
///
/// The ruler sits at negative coordinates above and left of the screen, and
/// just past its right edge.
pub fn debug_ruler(width: u16, height: u16) -> PixelBuffer {
    let mut ruler = PixelBuffer::new();
    for x in 0..width as i32 {
        let tens = match x / 10 {
            0 => BLANK_CHARACTER,
            n => digit(n % 10),
        };
        ruler.set(x, -RULER_WIDTH, Some(tens));
        ruler.set(x, -2, Some(digit(x % 10)));
        ruler.set(x, -1, Some('↓'));
    }

    let right = width as i32;
    for y in 0..height as i32 {
        let left_label = format!("{:>2}→", y);
        for (i, ch) in left_label.chars().enumerate() {
            ruler.set(i as i32 - RULER_WIDTH, y, Some(ch));
        }
        let right_label = format!("←{:<2}", y);
        for (i, ch) in right_label.chars().enumerate() {
            ruler.set(right + i as i32, y, Some(ch));
        }
    }
    ruler
}

fn digit(n: i32) -> char {
    char::from_digit(n.unsigned_abs(), 10).unwrap_or('?')
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u16,
    pub height: u16,
    /// Written for screen cells nothing was drawn on.
    pub fill: char,
    pub debug_mode: bool,
    last_output: Option<String>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            fill: DEFAULT_FILL,
            debug_mode: false,
            last_output: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fill: settings.fill,
            debug_mode: settings.debug_mode,
            ..Self::new(settings.canvas_width, settings.canvas_height)
        }
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn screen(&self) -> Rectangle {
        Rectangle::new(Point::ZERO, self.width as f64, self.height as f64)
    }

    /// Compose the screen buffer for the subtree at `root`.
    pub fn compose(&self, scene: &Scene, root: NodeId) -> Result<PixelBuffer, SceneError> {
        let screen_rect = self.screen();
        let mut screen = PixelBuffer::new();
        screen.fill_rectangle(&screen_rect, None);

        if self.debug_mode {
            screen.merge(&debug_ruler(self.width, self.height), MergeOptions::default());
        }

        let content = scene.draw(root)?;
        let origin = scene.origin_position(root)?;
        if !content.is_empty() {
            let placed = content.bounding_box().offset(origin);
            let visible = placed.right >= 0.0
                && placed.bottom >= 0.0
                && placed.left < self.width as f64
                && placed.top < self.height as f64;
            if !visible {
                log::warn!("content of {} is outside the canvas", root);
            }
        }
        screen.merge(&content, MergeOptions::at(origin).limit(screen_rect));
        Ok(screen)
    }

    /// Compose and serialize one frame.
    pub fn draw(&self, scene: &Scene, root: NodeId) -> Result<String, SceneError> {
        let screen = self.compose(scene, root)?;
        Ok(screen.to_string_with(&ToStringOptions {
            crop: None,
            fill: self.fill,
        }))
    }

    /// Draw a frame and hand it to `sink` unless it equals the previous one.
    ///
    /// Returns whether the sink was written.
    pub fn present(&mut self, scene: &Scene, root: NodeId, sink: &mut dyn TextSink) -> Result<bool> {
        let output = self.draw(scene, root)?;
        if self.last_output.as_deref() == Some(output.as_str()) {
            return Ok(false);
        }
        sink.write_frame(&output)?;
        self.last_output = Some(output);
        Ok(true)
    }

    /// Force the next [`present`](Self::present) to write.
    pub fn invalidate(&mut self) {
        self.last_output = None;
    }
}
