// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface that span styles measure and draw against.
//!
//! This crate does no rasterization itself. Hosts implement [`TextMeasure`] and [`Canvas`] for
//! their text engine and drawing backend; replacement spans use them to report their advance,
//! adjust line metrics and draw.

use alloc::sync::Arc;

use peniko::kurbo::{Point, Rect, Vec2};
use peniko::Color;

use crate::metrics::{FontMetrics, PixelInsets, PixelRect};

/// Font style flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// Upright, regular weight.
    #[default]
    Normal,
    /// Bold.
    Bold,
    /// Italic.
    Italic,
    /// Bold and italic.
    BoldItalic,
}

/// A font family together with a style.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Typeface {
    /// The family name, for example `"serif"` or `"Noto Sans"`.
    pub family: Arc<str>,
    /// The style.
    pub style: TextStyle,
}

impl Typeface {
    /// A typeface of `family` in the normal style.
    pub fn new(family: impl Into<Arc<str>>) -> Self {
        Self {
            family: family.into(),
            style: TextStyle::Normal,
        }
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

/// The paint state text is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPaint {
    /// Text color.
    pub color: Color,
    /// Text size in pixels.
    pub text_size: f32,
    /// Typeface, if not the default.
    pub typeface: Option<Typeface>,
    /// Whether text is underlined.
    pub underline: bool,
    /// Whether text is struck through.
    pub strikethrough: bool,
    /// Horizontal scale applied to glyphs.
    pub scale_x: f32,
    /// Vertical baseline offset in pixels; negative values move text up.
    pub baseline_shift: f32,
    /// Background fill behind the text.
    pub background: Option<Color>,
    /// Blur applied to glyphs.
    pub blur: Option<(f32, Blur)>,
}

/// How a blur mask treats the glyph outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Blur {
    /// Blur inside and outside the outline.
    #[default]
    Normal,
    /// Solid inside, blurred outside.
    Solid,
    /// Nothing inside, blurred outside.
    Outer,
    /// Blurred inside, nothing outside.
    Inner,
}

impl Default for TextPaint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            text_size: 14.0,
            typeface: None,
            underline: false,
            strikethrough: false,
            scale_x: 1.0,
            baseline_shift: 0.0,
            background: None,
            blur: None,
        }
    }
}

/// An image handle supplied by the host.
///
/// The crate only needs the image's identity and intrinsic geometry; pixels stay with the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Drawable {
    /// Host-defined identity of the image, such as a resource name or URL.
    pub id: Arc<str>,
    /// Intrinsic width in pixels.
    pub intrinsic_width: i32,
    /// Intrinsic height in pixels.
    pub intrinsic_height: i32,
    /// Padding the image itself declares (for example nine-patch content insets).
    pub padding: PixelInsets,
}

impl Drawable {
    /// A drawable with the given identity and intrinsic size.
    pub fn new(id: impl Into<Arc<str>>, intrinsic_width: i32, intrinsic_height: i32) -> Self {
        Self {
            id: id.into(),
            intrinsic_width,
            intrinsic_height,
            padding: PixelInsets::default(),
        }
    }
}

/// Text measurement provided by the host's text engine.
pub trait TextMeasure {
    /// Metrics of the current font.
    fn font_metrics(&self) -> FontMetrics;

    /// The current text size in pixels.
    fn text_size(&self) -> f32;

    /// The advance width of `text`.
    fn measure_text(&self, text: &str) -> f32;

    /// The ink bounds of `text`, relative to its origin on the baseline.
    fn text_bounds(&self, text: &str) -> PixelRect;
}

/// Drawing operations provided by the host's backend.
pub trait Canvas {
    /// Saves the current transform.
    fn save(&mut self);

    /// Restores the most recently saved transform.
    fn restore(&mut self);

    /// Translates the current transform.
    fn translate(&mut self, offset: Vec2);

    /// Draws `drawable` scaled into `bounds`.
    fn draw_drawable(&mut self, drawable: &Drawable, bounds: PixelRect);

    /// Draws `text` with its baseline origin at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, paint: &TextPaint);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// The vertical extent of the line a span is drawn on, and the span's horizontal position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineBox {
    /// The x position of the span's leading edge.
    pub x: f32,
    /// The top of the line.
    pub top: i32,
    /// The baseline.
    pub baseline: i32,
    /// The bottom of the line.
    pub bottom: i32,
}

/// A style that replaces the text it covers with its own rendering.
pub trait ReplacementSpan {
    /// Returns the advance width of the span.
    ///
    /// When `line_metrics` is provided the span adjusts it to the vertical extent it needs.
    fn size(
        &self,
        text: &str,
        paint: &dyn TextMeasure,
        line_metrics: Option<&mut FontMetrics>,
    ) -> i32;

    /// Draws the span.
    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        text: &str,
        line: LineBox,
        paint: &dyn TextMeasure,
        text_paint: &TextPaint,
    );
}

#[cfg(test)]
pub(crate) mod testing {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use peniko::kurbo::{Point, Rect, Vec2};
    use peniko::Color;

    use super::{Canvas, Drawable, TextMeasure, TextPaint};
    use crate::metrics::{FontMetrics, PixelRect};

    /// Monospace measurement: every char is `advance` wide.
    #[derive(Debug)]
    pub(crate) struct FixedMeasure {
        pub(crate) metrics: FontMetrics,
        pub(crate) advance: f32,
    }

    impl TextMeasure for FixedMeasure {
        fn font_metrics(&self) -> FontMetrics {
            self.metrics
        }

        fn text_size(&self) -> f32 {
            (self.metrics.descent - self.metrics.ascent) as f32
        }

        fn measure_text(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.advance
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "Test text is short."
        )]
        fn text_bounds(&self, text: &str) -> PixelRect {
            PixelRect::new(
                0,
                self.metrics.ascent,
                self.measure_text(text) as i32,
                self.metrics.descent,
            )
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Save,
        Restore,
        Translate(Vec2),
        Drawable(String, PixelRect),
        Text(String, Point),
        Fill(Rect, Color),
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingCanvas {
        pub(crate) ops: Vec<Op>,
    }

    impl Canvas for RecordingCanvas {
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }

        fn translate(&mut self, offset: Vec2) {
            self.ops.push(Op::Translate(offset));
        }

        fn draw_drawable(&mut self, drawable: &Drawable, bounds: PixelRect) {
            self.ops.push(Op::Drawable(drawable.id.to_string(), bounds));
        }

        fn draw_text(&mut self, text: &str, origin: Point, _paint: &TextPaint) {
            self.ops.push(Op::Text(text.to_string(), origin));
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Fill(rect, color));
        }
    }
}
