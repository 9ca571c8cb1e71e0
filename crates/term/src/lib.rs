//! Terminal output.
//!
//! [`Canvas`] turns a scene into a fixed-size block of text; a [`TextSink`]
//! receives that text. The crossterm-backed [`TerminalSink`] draws it on the
//! alternate screen, while `String` works as a sink for tests and headless
//! runs.

pub mod canvas;
pub mod renderer;

pub use asciiscape_core as core;
pub use asciiscape_engine as engine;
pub use asciiscape_types as types;

pub use canvas::{debug_ruler, Canvas, RULER_WIDTH};
pub use renderer::{encode_frame_into, TerminalSink, TextSink};
