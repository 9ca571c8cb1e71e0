//! Error type for caller mistakes and missing resources.
//!
//! Geometric degeneracies (zero-length segments, parallel lines) are not
//! errors; they resolve to `None` at the call site.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// `last()` or trimming on a polyline without points.
    EmptyPolyLine,
    /// A polygon operation that needs at least one point.
    EmptyPolygon,
    /// Rectangle corners given in the wrong order.
    InvalidRectangle,
    /// An anchor/position string such as `"50% 100%"` could not be parsed.
    InvalidPositionString(String),
    /// An asset name that the library does not know about.
    MissingAsset(String),
    /// Sprite sheet with zero-sized frames or no frames at all.
    InvalidSpriteSheet,
}

impl CoreError {
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::EmptyPolyLine | CoreError::EmptyPolygon => "empty_shape",
            CoreError::InvalidRectangle => "invalid_rectangle",
            CoreError::InvalidPositionString(_) => "invalid_position",
            CoreError::MissingAsset(_) => "missing_asset",
            CoreError::InvalidSpriteSheet => "invalid_sprite_sheet",
        }
    }

    pub fn message(&self) -> String {
        match self {
            CoreError::EmptyPolyLine => "polyline does not have any points".to_string(),
            CoreError::EmptyPolygon => "polygon does not have any points".to_string(),
            CoreError::InvalidRectangle => {
                "bottom-right corner lies above or left of the top-left corner".to_string()
            }
            CoreError::InvalidPositionString(s) => format!("invalid position string: {:?}", s),
            CoreError::MissingAsset(name) => format!("unknown asset: {:?}", name),
            CoreError::InvalidSpriteSheet => "sprite sheet has no usable frames".to_string(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_detail() {
        let err = CoreError::MissingAsset("snake-head".to_string());
        let text = err.to_string();
        assert!(text.contains("snake-head"));
        assert!(text.contains("missing_asset"));
    }
}
