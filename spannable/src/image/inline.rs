// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::{Mutex, PoisonError};

use super::{draw_image, fit_line_metrics, fixed_ratio_size, Align, ImageLabel};
use crate::metrics::{DrawableSize, FontMetrics, PixelRect};
use crate::render::{Canvas, Drawable, LineBox, ReplacementSpan, TextMeasure, TextPaint};

/// An image drawn in place of the text it covers.
///
/// The image keeps its aspect ratio whatever size is requested, is vertically centered on the
/// text by default, and may carry horizontal margins and a label.
///
/// The scaled bounds are computed on first use and cached. Every setter that affects them
/// invalidates the cache; [`InlineImage::invalidate_cache`] does so explicitly.
#[derive(Debug)]
pub struct InlineImage {
    drawable: Drawable,
    source: Option<String>,
    requested: DrawableSize,
    margin_left: i32,
    margin_right: i32,
    align: Align,
    label: Option<ImageLabel>,
    bounds: Mutex<Option<PixelRect>>,
}

impl Clone for InlineImage {
    fn clone(&self) -> Self {
        Self {
            drawable: self.drawable.clone(),
            source: self.source.clone(),
            requested: self.requested,
            margin_left: self.margin_left,
            margin_right: self.margin_right,
            align: self.align,
            label: self.label.clone(),
            bounds: Mutex::new(None),
        }
    }
}

impl PartialEq for InlineImage {
    fn eq(&self, other: &Self) -> bool {
        self.drawable == other.drawable
            && self.source == other.source
            && self.requested == other.requested
            && self.margin_left == other.margin_left
            && self.margin_right == other.margin_right
            && self.align == other.align
            && self.label == other.label
    }
}

impl InlineImage {
    /// An image span for `drawable` at its intrinsic size.
    pub fn new(drawable: Drawable) -> Self {
        Self {
            drawable,
            source: None,
            requested: DrawableSize::default(),
            margin_left: 0,
            margin_right: 0,
            align: Align::default(),
            label: None,
            bounds: Mutex::new(None),
        }
    }

    /// Records the source the image was created from, such as a file name or URL.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the requested size; see [`InlineImage::set_drawable_size`].
    #[must_use]
    pub fn with_size(mut self, size: impl Into<DrawableSize>) -> Self {
        let size = size.into();
        self.set_drawable_size(size.width, size.height);
        self
    }

    /// Sets the horizontal margins; see [`InlineImage::set_margin_horizontal`].
    #[must_use]
    pub fn with_margin_horizontal(mut self, left: i32, right: i32) -> Self {
        self.set_margin_horizontal(left, right);
        self
    }

    /// Sets the vertical alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Draws the covered text on top of the image.
    #[must_use]
    pub fn with_label(mut self, label: ImageLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets the requested size in pixels. A value of 0 uses the intrinsic dimension.
    ///
    /// The aspect ratio is kept regardless of the values, so the image is never distorted.
    pub fn set_drawable_size(&mut self, width: i32, height: i32) {
        self.requested = DrawableSize::new(width, height);
        self.invalidate_cache();
    }

    /// Sets the horizontal margins in pixels.
    pub fn set_margin_horizontal(&mut self, left: i32, right: i32) {
        self.margin_left = left;
        self.margin_right = right;
        self.invalidate_cache();
    }

    /// Shows or hides the label.
    pub fn set_label(&mut self, label: Option<ImageLabel>) {
        self.label = label;
    }

    /// Drops the cached bounds; they are recomputed on next use.
    pub fn invalidate_cache(&self) {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The image handle.
    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// The source the image was created from, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The vertical alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// The left and right margins.
    pub fn margins(&self) -> (i32, i32) {
        (self.margin_left, self.margin_right)
    }

    /// The scaled image bounds.
    pub fn bounds(&self) -> PixelRect {
        let mut cached = self.bounds.lock().unwrap_or_else(PoisonError::into_inner);
        *cached.get_or_insert_with(|| {
            let (width, height) = fixed_ratio_size(
                self.drawable.intrinsic_width,
                self.drawable.intrinsic_height,
                self.requested.width,
                self.requested.height,
            );
            PixelRect::from_size(width, height)
        })
    }
}

impl ReplacementSpan for InlineImage {
    fn size(
        &self,
        _text: &str,
        paint: &dyn TextMeasure,
        line_metrics: Option<&mut FontMetrics>,
    ) -> i32 {
        let bounds = self.bounds();
        if let Some(line) = line_metrics {
            fit_line_metrics(self.align, bounds, paint.font_metrics(), line);
        }
        bounds.right + self.margin_left + self.margin_right
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        text: &str,
        line: LineBox,
        paint: &dyn TextMeasure,
        text_paint: &TextPaint,
    ) {
        draw_image(
            canvas,
            &self.drawable,
            self.bounds(),
            self.align,
            self.margin_left,
            self.label.as_ref(),
            text,
            line,
            paint,
            text_paint,
        );
    }
}
