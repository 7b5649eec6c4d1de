//! Point and rectangle types in global display coordinates.
//!
//! All values are in points (not pixels) with the origin at the top-left of
//! the main display, which is the coordinate space CoreGraphics uses for
//! window bounds and cursor locations.

use serde::{Deserialize, Serialize};

/// A location in global display coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Translates the point by the given offsets.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self { Self::new(self.x + dx, self.y + dy) }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rectangle in whole image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Builds the rectangle spanned by two opposite corners, in any order.
    ///
    /// This is how a mouse drag becomes a selection: dragging up and to the
    /// left produces the same rectangle as dragging down and to the right.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Check if this rectangle has valid dimensions.
    #[must_use]
    pub fn is_valid(&self) -> bool { self.width > 0.0 && self.height > 0.0 }

    /// Check if this rectangle contains a point.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are
    /// exclusive, so two windows sharing an edge never both claim a point.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Calculate the area of this rectangle.
    #[must_use]
    pub fn area(&self) -> f64 { self.width * self.height }

    /// Translates the rectangle by the given offsets.
    #[must_use]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scales every component, used to go from points to backing pixels.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.width * factor, self.height * factor)
    }

    /// Returns the overlapping part of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);

        if right > left && bottom > top {
            Some(Self::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Rounds to whole pixels and clamps to an image of `bound_width` x `bound_height`.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the image.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixel_rect(&self, bound_width: u32, bound_height: u32) -> Option<PixelRect> {
        let bounds = Self::new(0.0, 0.0, f64::from(bound_width), f64::from(bound_height));
        let clamped = self.intersection(&bounds)?;

        let left = clamped.x.round() as u32;
        let top = clamped.y.round() as u32;
        let right = ((clamped.x + clamped.width).round() as u32).min(bound_width);
        let bottom = ((clamped.y + clamped.height).round() as u32).min(bound_height);

        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}
