// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline image spans.
//!
//! [`InlineImage`] shows an image the host already has. [`RemoteImage`] asks an
//! [`ImageLoader`] for the image and shows a placeholder until it arrives.
//!
//! Both scale the image with a fixed aspect ratio, add horizontal margins, align the image to
//! the surrounding text, and can draw the covered text on top of the image as a label.

mod inline;
mod remote;

pub use inline::InlineImage;
pub use remote::{ImageLoader, ImageRequest, LoadHandle, LoadState, RemoteImage, MATCH_TEXT};

use peniko::kurbo::{Point, Vec2};
use peniko::Color;

use crate::metrics::{FontMetrics, PixelInsets, PixelRect};
use crate::render::{Canvas, Drawable, LineBox, TextMeasure, TextPaint, Typeface};

/// Vertical alignment of an image against the text line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// The image bottom sits on the baseline.
    Baseline,
    /// The image is centered on the text.
    #[default]
    Center,
    /// The image bottom sits on the line's descent.
    Bottom,
}

/// Horizontal placement inside a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalGravity {
    /// Against the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Against the right edge.
    Right,
}

/// Vertical placement inside a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalGravity {
    /// Against the top edge.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Against the bottom edge.
    Bottom,
}

/// How an object is placed inside a larger container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gravity {
    /// Horizontal placement.
    pub horizontal: HorizontalGravity,
    /// Vertical placement.
    pub vertical: VerticalGravity,
}

impl Gravity {
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(HorizontalGravity::Center, VerticalGravity::Center);

    /// Gravity from its two axes.
    pub const fn new(horizontal: HorizontalGravity, vertical: VerticalGravity) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Places a `width` × `height` object inside `container`.
    pub fn place(self, width: i32, height: i32, container: PixelRect) -> PixelRect {
        let left = match self.horizontal {
            HorizontalGravity::Left => container.left,
            HorizontalGravity::Center => container.left + (container.width() - width) / 2,
            HorizontalGravity::Right => container.right - width,
        };
        let top = match self.vertical {
            VerticalGravity::Top => container.top,
            VerticalGravity::Center => container.top + (container.height() - height) / 2,
            VerticalGravity::Bottom => container.bottom - height,
        };
        PixelRect::new(left, top, left + width, top + height)
    }
}

/// Text drawn on top of an image.
///
/// The label is the text the image span covers. The image is not resized to fit it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageLabel {
    /// Placement of the text inside the image bounds.
    pub gravity: Gravity,
    /// Offsets applied after placement; left/top move right/down, right/bottom move left/up.
    pub offset: PixelInsets,
    /// Text size override.
    pub text_size: Option<f32>,
    /// Text color override.
    pub color: Option<Color>,
    /// Typeface override.
    pub typeface: Option<Typeface>,
}

impl ImageLabel {
    fn paint(&self, base: &TextPaint) -> TextPaint {
        let mut paint = base.clone();
        if let Some(size) = self.text_size {
            paint.text_size = size;
        }
        if let Some(color) = self.color {
            paint.color = color;
        }
        if let Some(typeface) = &self.typeface {
            paint.typeface = Some(typeface.clone());
        }
        paint
    }
}

/// Scales an intrinsic size into a requested one, keeping the aspect ratio.
///
/// A requested dimension of 0 or less uses the intrinsic one. The longer intrinsic side wins:
/// landscape images keep the width and derive the height, portrait images the reverse.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Scaled pixel sizes stay inside the i32 range."
)]
pub(crate) fn fixed_ratio_size(
    intrinsic_width: i32,
    intrinsic_height: i32,
    requested_width: i32,
    requested_height: i32,
) -> (i32, i32) {
    let ratio = f64::from(intrinsic_width) / f64::from(intrinsic_height);
    let mut width = if requested_width > 0 {
        requested_width
    } else {
        intrinsic_width
    };
    let mut height = if requested_height > 0 {
        requested_height
    } else {
        intrinsic_height
    };
    if intrinsic_width > intrinsic_height {
        height = (f64::from(width) / ratio) as i32;
    } else if intrinsic_width < intrinsic_height {
        width = (f64::from(height) * ratio) as i32;
    }
    (width, height)
}

/// Adjusts `line` so the line is tall enough for an image of `bounds` aligned with `align`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Half of an i32 pixel difference fits in i32."
)]
pub(crate) fn fit_line_metrics(
    align: Align,
    bounds: PixelRect,
    font: FontMetrics,
    line: &mut FontMetrics,
) {
    match align {
        Align::Center => {
            let overflow = bounds.height() - font.height();
            line.ascent = font.ascent - (overflow as f32 / 2.0) as i32;
            line.descent = line.ascent + bounds.height();
        }
        Align::Baseline => {
            line.ascent = -bounds.bottom;
            line.descent = 0;
        }
        Align::Bottom => {
            line.ascent = -bounds.bottom + line.descent;
            line.descent = 0;
        }
    }
    line.top = line.ascent;
    line.bottom = line.descent;
}

/// The vertical translation that places an image of `bounds` on `line`.
pub(crate) fn image_offset_y(
    align: Align,
    bounds: PixelRect,
    line: LineBox,
    font: FontMetrics,
) -> i32 {
    let mut y = line.bottom - bounds.bottom;
    match align {
        Align::Baseline => y -= font.descent,
        Align::Center => y -= (line.bottom - line.top) / 2 - (bounds.bottom - bounds.top) / 2,
        Align::Bottom => {}
    }
    y
}

/// Draws `drawable` at its line position and, if present, the label on top of it.
pub(crate) fn draw_image(
    canvas: &mut dyn Canvas,
    drawable: &Drawable,
    bounds: PixelRect,
    align: Align,
    margin_left: i32,
    label: Option<&ImageLabel>,
    text: &str,
    line: LineBox,
    paint: &dyn TextMeasure,
    text_paint: &TextPaint,
) {
    let font = paint.font_metrics();
    canvas.save();
    let dy = image_offset_y(align, bounds, line, font);
    canvas.translate(Vec2::new(
        f64::from(line.x) + f64::from(margin_left),
        f64::from(dy),
    ));
    canvas.draw_drawable(drawable, bounds);
    if let Some(label) = label {
        let label_paint = label.paint(text_paint);
        let width = label_width(text, paint, label.text_size);
        let origin = label_origin(label, bounds, width, label_paint.text_size, font);
        canvas.draw_text(text, origin, &label_paint);
    }
    canvas.restore();
}

/// The advance of `text`, scaled from the host's text size to the label's size override.
fn label_width(text: &str, paint: &dyn TextMeasure, text_size: Option<f32>) -> f32 {
    let measured = paint.measure_text(text);
    let base_size = paint.text_size();
    match text_size {
        Some(size) if base_size > 0.0 => measured * size / base_size,
        _ => measured,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Label text measurements are pixel sized."
)]
fn label_origin(
    label: &ImageLabel,
    bounds: PixelRect,
    text_width: f32,
    text_size: f32,
    font: FontMetrics,
) -> Point {
    let placed = label
        .gravity
        .place(text_width as i32, text_size as i32, bounds);
    let x = placed.left + label.offset.left - label.offset.right;
    let y = placed.bottom - font.descent / 2 + label.offset.top - label.offset.bottom;
    Point::new(f64::from(x), f64::from(y))
}

#[cfg(test)]
mod tests {
    use super::{
        fit_line_metrics, fixed_ratio_size, image_offset_y, Align, Gravity, HorizontalGravity,
        VerticalGravity,
    };
    use crate::metrics::{FontMetrics, PixelRect};
    use crate::render::LineBox;

    #[test]
    fn fixed_ratio_keeps_aspect() {
        // Landscape: width wins.
        assert_eq!(fixed_ratio_size(200, 100, 50, 50), (50, 25));
        // Portrait: height wins.
        assert_eq!(fixed_ratio_size(100, 200, 50, 50), (25, 50));
        // Square: requested size is used as is.
        assert_eq!(fixed_ratio_size(64, 64, 20, 30), (20, 30));
        // Unset sizes fall back to intrinsic.
        assert_eq!(fixed_ratio_size(40, 20, 0, 0), (40, 20));
    }

    #[test]
    fn line_metrics_per_alignment() {
        let font = FontMetrics::new(-30, 10);
        let bounds = PixelRect::from_size(60, 60);

        let mut line = font;
        fit_line_metrics(Align::Center, bounds, font, &mut line);
        assert_eq!((line.ascent, line.descent), (-40, 20));
        assert_eq!((line.top, line.bottom), (-40, 20));

        let mut line = font;
        fit_line_metrics(Align::Baseline, bounds, font, &mut line);
        assert_eq!((line.ascent, line.descent), (-60, 0));

        let mut line = font;
        fit_line_metrics(Align::Bottom, bounds, font, &mut line);
        assert_eq!((line.ascent, line.descent), (-50, 0));
    }

    #[test]
    fn image_offsets() {
        let font = FontMetrics::new(-30, 10);
        let bounds = PixelRect::from_size(20, 20);
        let line = LineBox {
            x: 0.0,
            top: 0,
            baseline: 30,
            bottom: 40,
        };
        assert_eq!(image_offset_y(Align::Bottom, bounds, line, font), 20);
        assert_eq!(image_offset_y(Align::Baseline, bounds, line, font), 10);
        assert_eq!(image_offset_y(Align::Center, bounds, line, font), 10);
    }

    #[test]
    fn gravity_placement() {
        let container = PixelRect::from_size(100, 50);
        assert_eq!(
            Gravity::CENTER.place(20, 10, container),
            PixelRect::new(40, 20, 60, 30)
        );
        let corner = Gravity::new(HorizontalGravity::Right, VerticalGravity::Bottom);
        assert_eq!(
            corner.place(20, 10, container),
            PixelRect::new(80, 40, 100, 50)
        );
    }
}
