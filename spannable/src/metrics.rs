// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel metrics and unit conversions.

use peniko::kurbo::Rect;

/// Integer font metrics of a line, in pixels relative to the baseline.
///
/// `ascent` and `top` are negative (above the baseline), `descent` and `bottom` positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// The maximum distance above the baseline for the tallest glyph.
    pub top: i32,
    /// The recommended distance above the baseline.
    pub ascent: i32,
    /// The recommended distance below the baseline.
    pub descent: i32,
    /// The maximum distance below the baseline for the lowest glyph.
    pub bottom: i32,
}

impl FontMetrics {
    /// Metrics with `top == ascent` and `bottom == descent`.
    pub const fn new(ascent: i32, descent: i32) -> Self {
        Self {
            top: ascent,
            ascent,
            descent,
            bottom: descent,
        }
    }

    /// The distance from ascent to descent.
    pub const fn height(&self) -> i32 {
        self.descent - self.ascent
    }
}

/// An integer pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl PixelRect {
    /// A rectangle from its edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A rectangle at the origin with the given size.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The width.
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// The height.
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// The rectangle as a floating point [`Rect`].
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// Per-edge integer insets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelInsets {
    /// Left inset.
    pub left: i32,
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl PixelInsets {
    /// Insets from their edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every edge.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets.
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// A requested image size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DrawableSize {
    /// Requested width.
    pub width: i32,
    /// Requested height.
    pub height: i32,
}

impl DrawableSize {
    /// A size from width and height.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A square size.
    pub const fn square(size: i32) -> Self {
        Self::new(size, size)
    }
}

impl From<i32> for DrawableSize {
    fn from(value: i32) -> Self {
        Self::square(value)
    }
}

/// Display density used to convert density-independent units to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    /// Pixels per density-independent pixel.
    pub density: f32,
    /// Pixels per scale-independent pixel, including the user's font scale.
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

impl DisplayMetrics {
    /// Metrics with the given densities.
    pub const fn new(density: f32, scaled_density: f32) -> Self {
        Self {
            density,
            scaled_density,
        }
    }

    /// Converts density-independent pixels to pixels.
    pub fn dp(&self, value: i32) -> i32 {
        scale(value, self.density)
    }

    /// Converts scale-independent pixels to pixels.
    pub fn sp(&self, value: i32) -> i32 {
        scale(value, self.scaled_density)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Pixel values are far inside the i32 range."
)]
fn scale(value: i32, factor: f32) -> i32 {
    // Round half up before the final rounding, matching the platform conversion.
    (value as f32 * factor + 0.5).round() as i32
}

#[cfg(test)]
mod tests {
    use super::{DisplayMetrics, FontMetrics, PixelRect};

    #[test]
    fn density_conversion() {
        let metrics = DisplayMetrics::new(2.75, 3.0);
        assert_eq!(metrics.dp(10), 28);
        assert_eq!(metrics.sp(10), 31);
        assert_eq!(DisplayMetrics::default().dp(16), 17);
    }

    #[test]
    fn rect_and_metrics_helpers() {
        let r = PixelRect::new(2, 3, 12, 8);
        assert_eq!((r.width(), r.height()), (10, 5));
        assert_eq!(r.to_rect().width(), 10.0);
        assert_eq!(FontMetrics::new(-30, 8).height(), 38);
    }
}
