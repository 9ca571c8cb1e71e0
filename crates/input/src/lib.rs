//! Terminal keyboard input.
//!
//! This crate is independent of the scene graph. It maps `crossterm` key
//! events onto a small set of [`InputKey`]s and tracks their held state in a
//! [`KeyboardController`], which resolves the held arrow keys into a
//! [`Direction`](crate::types::Direction). Terminals that never report key
//! releases are handled with a release timeout.

pub mod keyboard;
pub mod map;

pub use asciiscape_types as types;

pub use keyboard::{KeyStatus, KeyboardController, DOUBLE_TAP_MS};
pub use map::{map_key_code, should_quit, InputKey};
