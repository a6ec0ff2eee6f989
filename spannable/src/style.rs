// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style payloads attached to text.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::mem;

use peniko::color::{parse_color as parse_css_color, Srgb};
use peniko::Color;

use crate::highlight::Highlight;
use crate::image::{InlineImage, RemoteImage};
use crate::margin::Margin;
use crate::metrics::DisplayMetrics;
use crate::render::{Blur, ReplacementSpan, TextPaint, TextStyle, Typeface};
use crate::Error;

/// Behavior the rewrite engine needs from a style payload.
///
/// The engine never looks inside styles. It only asks whether two styles are of the same kind,
/// so that setting a style replaces an equal-kind style at the same range instead of stacking.
pub trait StyleTag {
    /// Returns `true` if `self` and `other` are the same kind of style.
    fn same_kind(&self, other: &Self) -> bool;

    /// Returns `true` if the style reacts to clicks.
    fn is_clickable(&self) -> bool {
        false
    }

    /// Returns `true` if the style draws something in place of the text it covers.
    fn is_replacement(&self) -> bool {
        false
    }

    /// Returns `true` if the style changes how the covered text is drawn.
    fn is_decoration(&self) -> bool {
        !self.is_replacement()
    }

    /// Handles a click on the covered `text`. Returns `true` if the click was handled.
    fn click(&self, text: &str) -> bool {
        let _ = text;
        false
    }
}

/// A font style, size, color and family applied together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAppearance {
    /// The font style.
    pub style: TextStyle,
    /// Text size in pixels, if set.
    pub size: Option<i32>,
    /// Text color, if set.
    pub color: Option<Color>,
    /// Font family, if set.
    pub family: Option<Arc<str>>,
}

/// A style attached to a range of text.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Style {
    /// Bold and/or italic text.
    TextStyle(TextStyle),
    /// A font family.
    Typeface(Typeface),
    /// Several font properties at once.
    TextAppearance(TextAppearance),
    /// Text color.
    Color(Color),
    /// Background color.
    Background(Color),
    /// An inline image.
    Image(Arc<InlineImage>),
    /// An image fetched by a loader.
    RemoteImage(Arc<RemoteImage>),
    /// Horizontal glyph scale.
    ScaleX(f32),
    /// Blurred glyphs.
    BlurMask {
        /// Blur radius in pixels.
        radius: f32,
        /// Blur kind.
        blur: Blur,
    },
    /// Raised, as in exponents.
    Superscript,
    /// Lowered, as in chemical formulas.
    Subscript,
    /// Absolute text size.
    AbsoluteSize {
        /// The size.
        size: i32,
        /// Whether `size` is in density-independent pixels rather than pixels.
        dip: bool,
    },
    /// Text size relative to the surrounding text.
    RelativeSize(f32),
    /// Struck-through text.
    Strikethrough,
    /// Underlined text.
    Underline,
    /// A link. Links are clickable, but opening them is up to the host.
    Url(Arc<str>),
    /// Spelling suggestions.
    Suggestion(Vec<String>),
    /// Colored, optionally clickable text.
    Highlight(Highlight),
    /// A fixed-width spacer.
    Margin(Margin),
}

impl StyleTag for Style {
    fn same_kind(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    fn is_clickable(&self) -> bool {
        match self {
            Self::Url(_) => true,
            Self::Highlight(highlight) => highlight.is_clickable(),
            _ => false,
        }
    }

    fn is_replacement(&self) -> bool {
        self.as_replacement().is_some()
    }

    fn click(&self, text: &str) -> bool {
        match self {
            Self::Highlight(highlight) => highlight.click(text),
            Self::Url(url) => {
                log::debug!("url clicked: {url}");
                false
            }
            _ => false,
        }
    }
}

impl Style {
    /// The style as a replacement span, if it draws in place of its text.
    pub fn as_replacement(&self) -> Option<&dyn ReplacementSpan> {
        match self {
            Self::Image(image) => Some(&**image),
            Self::RemoteImage(image) => Some(&**image),
            Self::Margin(margin) => Some(margin),
            _ => None,
        }
    }

    /// A copy of the style for a rule match covering `matched`.
    pub(crate) fn for_match(&self, matched: &str) -> Self {
        match self {
            Self::Highlight(highlight) => {
                Self::Highlight(highlight.clone().with_matched_text(matched))
            }
            _ => self.clone(),
        }
    }

    /// Applies the style to `paint`. Replacement styles leave it untouched.
    pub fn update_draw_state(&self, paint: &mut TextPaint, display: &DisplayMetrics) {
        match self {
            Self::TextStyle(style) => apply_text_style(paint, *style),
            Self::Typeface(typeface) => paint.typeface = Some(typeface.clone()),
            Self::TextAppearance(appearance) => {
                if let Some(family) = &appearance.family {
                    paint.typeface = Some(Typeface::new(Arc::clone(family)));
                }
                apply_text_style(paint, appearance.style);
                if let Some(size) = appearance.size {
                    paint.text_size = size as f32;
                }
                if let Some(color) = appearance.color {
                    paint.color = color;
                }
            }
            Self::Color(color) => paint.color = *color,
            Self::Background(color) => paint.background = Some(*color),
            Self::ScaleX(scale) => paint.scale_x *= scale,
            Self::BlurMask { radius, blur } => paint.blur = Some((*radius, *blur)),
            // Half the text size up or down.
            Self::Superscript => paint.baseline_shift -= paint.text_size / 2.0,
            Self::Subscript => paint.baseline_shift += paint.text_size / 2.0,
            Self::AbsoluteSize { size, dip } => {
                let px = if *dip { display.dp(*size) } else { *size };
                paint.text_size = px as f32;
            }
            Self::RelativeSize(factor) => paint.text_size *= factor,
            Self::Strikethrough => paint.strikethrough = true,
            Self::Underline | Self::Url(_) => paint.underline = true,
            Self::Highlight(highlight) => highlight.update_draw_state(paint),
            Self::Suggestion(_) | Self::Image(_) | Self::RemoteImage(_) | Self::Margin(_) => {}
        }
    }
}

fn apply_text_style(paint: &mut TextPaint, style: TextStyle) {
    let typeface = paint
        .typeface
        .get_or_insert_with(|| Typeface::new("sans-serif"));
    typeface.style = style;
}

impl From<TextStyle> for Style {
    fn from(value: TextStyle) -> Self {
        Self::TextStyle(value)
    }
}

impl From<Typeface> for Style {
    fn from(value: Typeface) -> Self {
        Self::Typeface(value)
    }
}

impl From<TextAppearance> for Style {
    fn from(value: TextAppearance) -> Self {
        Self::TextAppearance(value)
    }
}

impl From<InlineImage> for Style {
    fn from(value: InlineImage) -> Self {
        Self::Image(Arc::new(value))
    }
}

impl From<RemoteImage> for Style {
    fn from(value: RemoteImage) -> Self {
        Self::RemoteImage(Arc::new(value))
    }
}

impl From<Highlight> for Style {
    fn from(value: Highlight) -> Self {
        Self::Highlight(value)
    }
}

impl From<Margin> for Style {
    fn from(value: Margin) -> Self {
        Self::Margin(value)
    }
}

/// Parses a CSS color string such as `"#f00"`, `"#336699"`, `"rgb(0 128 255)"` or `"teal"`.
///
/// Eight digit hex colors are read as `#rrggbbaa`.
pub fn parse_color(text: &str) -> Result<Color, Error> {
    Ok(parse_css_color(text)?.to_alpha_color::<Srgb>())
}
