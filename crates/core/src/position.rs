//! Anchor strings such as `"50% 100%"` or `"2 -1"`.

use std::str::FromStr;

use crate::error::CoreError;
use crate::math::lerp;
use crate::types::{BoundingBox, Point};

/// One axis of a position string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// Fraction of a size: `"50%"` is stored as `0.5`.
    Percent(f64),
    /// Absolute cell offset.
    Absolute(f64),
}

impl Offset {
    fn parse_token(token: &str) -> Option<Self> {
        match token.strip_suffix('%') {
            Some(number) => number.parse::<f64>().ok().map(|v| Offset::Percent(v / 100.0)),
            None => token.parse::<f64>().ok().map(Offset::Absolute),
        }
    }
}

/// Horizontal and vertical offsets parsed from `"x y"` (or `"v"` for both).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSpec {
    pub x: Offset,
    pub y: Offset,
}

impl PositionSpec {
    pub const TOP_LEFT: PositionSpec = PositionSpec {
        x: Offset::Absolute(0.0),
        y: Offset::Absolute(0.0),
    };

    /// Offset that moves a box of `bounds` so the anchor lands on the node position.
    ///
    /// Percentages run from the first cell (`0%`) to the last cell (`100%`)
    /// of the box; absolute values are used as-is.
    pub fn anchor_offset(&self, bounds: &BoundingBox) -> Point {
        let axis = |offset: Offset, size: f64| match offset {
            Offset::Percent(pct) => lerp(0.0, -size, pct),
            Offset::Absolute(value) => value,
        };
        Point::new(axis(self.x, bounds.width), axis(self.y, bounds.height))
    }

    /// Offset that places a `child` box inside a `parent` box.
    ///
    /// `"0% 0%"` is top-left, `"100% 100%"` aligns the far edges and `"50% 50%"`
    /// centers.
    pub fn relative_origin(&self, parent: &BoundingBox, child: &BoundingBox) -> Point {
        let axis = |offset: Offset, parent: f64, child: f64| match offset {
            Offset::Percent(pct) => parent * pct - child * pct,
            Offset::Absolute(value) => value,
        };
        Point::new(
            axis(self.x, parent.width, child.width),
            axis(self.y, parent.height, child.height),
        )
    }
}

impl FromStr for PositionSpec {
    type Err = CoreError;

    /// # Examples
    ///
    /// ```
    /// use asciiscape_core::{Offset, PositionSpec};
    ///
    /// let spec: PositionSpec = "50% 2".parse().unwrap();
    /// assert_eq!(spec.x, Offset::Percent(0.5));
    /// assert_eq!(spec.y, Offset::Absolute(2.0));
    ///
    /// let both: PositionSpec = "100%".parse().unwrap();
    /// assert_eq!(both.x, both.y);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidPositionString(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [single] => {
                let offset = Offset::parse_token(single).ok_or_else(invalid)?;
                Ok(Self {
                    x: offset,
                    y: offset,
                })
            }
            [x, y] => Ok(Self {
                x: Offset::parse_token(x).ok_or_else(invalid)?,
                y: Offset::parse_token(y).ok_or_else(invalid)?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Offset for an optional position string; empty or missing means no offset.
pub fn relative_origin_point(
    parent: &BoundingBox,
    child: &BoundingBox,
    position: Option<&str>,
) -> Result<Point, CoreError> {
    match position.map(str::trim) {
        None | Some("") => Ok(Point::ZERO),
        Some(s) => Ok(s.parse::<PositionSpec>()?.relative_origin(parent, child)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<PositionSpec>().is_err());
        assert!("1 2 3".parse::<PositionSpec>().is_err());
        assert!("abc".parse::<PositionSpec>().is_err());
        assert!("10% nope".parse::<PositionSpec>().is_err());
    }

    #[test]
    fn test_anchor_offset_maps_full_percent_to_last_cell() {
        // five cells wide, three tall
        let bounds = BoundingBox::new(0.0, 0.0, 4.0, 2.0);
        let spec: PositionSpec = "100% 50%".parse().unwrap();
        assert_eq!(spec.anchor_offset(&bounds), Point::new(-4.0, -1.0));
        assert_eq!(PositionSpec::TOP_LEFT.anchor_offset(&bounds), Point::ZERO);
    }

    #[test]
    fn test_relative_origin_centers() {
        let parent = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let child = BoundingBox::new(0.0, 0.0, 2.0, 4.0);
        let offset = relative_origin_point(&parent, &child, Some("50% 50%")).unwrap();
        assert_eq!(offset, Point::new(4.0, 3.0));
        assert_eq!(relative_origin_point(&parent, &child, None).unwrap(), Point::ZERO);
        assert_eq!(relative_origin_point(&parent, &child, Some("  ")).unwrap(), Point::ZERO);
        assert_eq!(
            relative_origin_point(&parent, &child, Some("3 1")).unwrap(),
            Point::new(3.0, 1.0)
        );
    }
}
