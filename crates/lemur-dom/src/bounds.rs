//! Screen geometry read from the `bounds` attribute.
//!
//! Android hierarchy dumps encode each element's screen rectangle as
//! `bounds="[left,top][right,bottom]"`. This module decodes that wire form
//! and derives the midpoint automation callers tap on. It sits on top of
//! the tree abstraction; the selector core never looks at geometry.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ElementData;

/// Attribute holding the element's screen rectangle.
pub const BOUNDS_ATTR: &str = "bounds";

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate in pixels.
    pub x: i32,
    /// Vertical coordinate in pixels.
    pub y: i32,
}

/// A screen rectangle decoded from the `[left,top][right,bottom]` wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge in pixels.
    pub left: i32,
    /// Top edge in pixels.
    pub top: i32,
    /// Right edge in pixels.
    pub right: i32,
    /// Bottom edge in pixels.
    pub bottom: i32,
}

impl Bounds {
    /// Decode `[left,top][right,bottom]`. The whole string must be exactly
    /// two bracketed integer pairs; anything else yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('[')?;
        let (first, rest) = rest.split_once(']')?;
        let rest = rest.strip_prefix('[')?;
        let second = rest.strip_suffix(']')?;
        let (left, top) = parse_pair(first)?;
        let (right, bottom) = parse_pair(second)?;
        Some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// The rectangle's midpoint, truncating toward zero.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point {
            x: (self.left + self.right) / 2,
            y: (self.top + self.bottom) / 2,
        }
    }

    /// Width of the rectangle.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}][{},{}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Parse one `x,y` pair. No surrounding whitespace is tolerated; the dump
/// format never emits any.
fn parse_pair(text: &str) -> Option<(i32, i32)> {
    let (x, y) = text.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// The midpoint of an element's bounds, or `None` if the element has no
/// bounds attribute or its value is malformed.
#[must_use]
pub fn center_of(element: &ElementData) -> Option<Point> {
    let bounds = Bounds::parse(element.attr(BOUNDS_ATTR)?)?;
    Some(bounds.center())
}
