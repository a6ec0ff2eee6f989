// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Rect;
use peniko::Color;

use crate::metrics::FontMetrics;
use crate::render::{Canvas, LineBox, ReplacementSpan, TextMeasure, TextPaint};

/// A fixed-width spacer drawn in place of the text it covers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Width in pixels.
    pub width: i32,
    /// Fill color; transparent when `None`.
    pub color: Option<Color>,
}

impl Margin {
    /// A transparent spacer.
    pub const fn new(width: i32) -> Self {
        Self { width, color: None }
    }

    /// A spacer filled with `color`.
    pub const fn filled(width: i32, color: Color) -> Self {
        Self {
            width,
            color: Some(color),
        }
    }
}

impl ReplacementSpan for Margin {
    fn size(&self, _: &str, _: &dyn TextMeasure, _: Option<&mut FontMetrics>) -> i32 {
        self.width
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        _: &str,
        line: LineBox,
        _: &dyn TextMeasure,
        _: &TextPaint,
    ) {
        let Some(color) = self.color else {
            return;
        };
        let x = f64::from(line.x);
        canvas.fill_rect(
            Rect::new(
                x,
                f64::from(line.top),
                x + f64::from(self.width),
                f64::from(line.bottom),
            ),
            color,
        );
    }
}
