use serde::{Deserialize, Serialize};

/// Selections narrower or shorter than this many pixels count as empty
pub const MIN_SELECTION_SIZE: f64 = 5.0;

/// A rectangle in the overlay's pixel space.
///
/// Edges are stored as given, so a rectangle may be inverted or have zero
/// size. Use [`PixelRect::is_degenerate`] to decide whether it represents
/// a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PixelRect {
    pub const ZERO: PixelRect = PixelRect {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Zero-size rectangle at a point
    pub fn at_point(x: f64, y: f64) -> Self {
        Self::new(y, x, y, x)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether `x` lies within `[left, right]`, edges included
    pub fn contains_x(&self, x: f64) -> bool {
        !(x < self.left || x > self.right)
    }

    pub fn contains_y(&self, y: f64) -> bool {
        !(y < self.top || y > self.bottom)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
            self.left + dx,
        )
    }

    /// Whether the rectangle is too small to be a selection along the axes
    /// that participate in it. With no enabled axis both extents are checked.
    pub fn is_degenerate(&self, enable_x: bool, enable_y: bool) -> bool {
        let no_horizontal = self.width().abs() < MIN_SELECTION_SIZE;
        let no_vertical = self.height().abs() < MIN_SELECTION_SIZE;
        match (enable_x, enable_y) {
            (true, false) => no_horizontal,
            (false, true) => no_vertical,
            _ => no_horizontal || no_vertical,
        }
    }
}
