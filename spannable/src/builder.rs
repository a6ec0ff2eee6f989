// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use peniko::Color;

use crate::ext::{image_placeholder, SpanExt};
use crate::highlight::Highlight;
use crate::image::{InlineImage, RemoteImage};
use crate::margin::Margin;
use crate::render::{Blur, TextStyle, Typeface};
use crate::rule::ReplaceRule;
use crate::style::{Style, TextAppearance};
use crate::{Error, StyledText};

/// Builds styled text one segment at a time.
///
/// [`SpanBuilder::text`] starts a new segment; style methods apply to the current segment.
/// Image and margin methods called before any text attach to a placeholder segment.
/// The first error is kept and returned by [`SpanBuilder::build`].
///
/// ```
/// use spannable::{SpanBuilder, TextStyle};
/// use spannable::peniko::Color;
///
/// let text = SpanBuilder::new()
///     .text("Hello, ")
///     .color(Color::from_rgb8(0x33, 0x33, 0x33))
///     .text("world")
///     .style(TextStyle::Bold)
///     .underline()
///     .build()?;
/// assert_eq!(text.as_str(), "Hello, world");
/// assert_eq!(text.attributes_at(8).count(), 2);
/// # Ok::<_, spannable::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct SpanBuilder {
    built: StyledText,
    pending: StyledText,
    error: Option<Error>,
}

impl SpanBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits the current segment and starts a new one with `text`.
    #[must_use]
    pub fn text(mut self, text: impl Into<StyledText>) -> Self {
        self.commit();
        self.pending = text.into();
        self
    }

    /// Applies `style` to the current segment, or to the rule's matches in it.
    #[must_use]
    pub fn span(self, style: impl Into<Style>, rule: Option<&ReplaceRule>) -> Self {
        let style = style.into();
        self.update(|pending| pending.span(style, rule))
    }

    /// Bold and/or italic.
    #[must_use]
    pub fn style(self, style: TextStyle) -> Self {
        self.span(Style::TextStyle(style), None)
    }

    /// Shorthand for [`TextStyle::Bold`].
    #[must_use]
    pub fn bold(self) -> Self {
        self.style(TextStyle::Bold)
    }

    /// A font family.
    #[must_use]
    pub fn typeface(self, typeface: Typeface) -> Self {
        self.span(Style::Typeface(typeface), None)
    }

    /// Font style, size, color and family together.
    #[must_use]
    pub fn text_appearance(self, appearance: TextAppearance) -> Self {
        self.span(Style::TextAppearance(appearance), None)
    }

    /// Text color.
    #[must_use]
    pub fn color(self, color: Color) -> Self {
        self.span(Style::Color(color), None)
    }

    /// Text color given as a CSS color string.
    #[must_use]
    pub fn color_str(self, color: &str) -> Self {
        self.update(|pending| pending.span_color_str(color, None))
    }

    /// Background color.
    #[must_use]
    pub fn background(self, color: Color) -> Self {
        self.span(Style::Background(color), None)
    }

    /// An inline image over the current segment, or over a placeholder if there is none.
    #[must_use]
    pub fn image(self, image: InlineImage) -> Self {
        self.placeholder_if_empty().span(image, None)
    }

    /// A remote image over the current segment, or over a placeholder if there is none.
    #[must_use]
    pub fn remote_image(self, image: RemoteImage) -> Self {
        self.placeholder_if_empty().span(image, None)
    }

    /// Horizontal glyph scale.
    #[must_use]
    pub fn scale_x(self, scale: f32) -> Self {
        self.span(Style::ScaleX(scale), None)
    }

    /// Blurred glyphs.
    #[must_use]
    pub fn blur_mask(self, radius: f32, blur: Blur) -> Self {
        self.span(Style::BlurMask { radius, blur }, None)
    }

    /// Superscript.
    #[must_use]
    pub fn superscript(self) -> Self {
        self.span(Style::Superscript, None)
    }

    /// Subscript.
    #[must_use]
    pub fn subscript(self) -> Self {
        self.span(Style::Subscript, None)
    }

    /// Absolute text size.
    #[must_use]
    pub fn absolute_size(self, size: i32, dip: bool) -> Self {
        self.span(Style::AbsoluteSize { size, dip }, None)
    }

    /// Relative text size.
    #[must_use]
    pub fn relative_size(self, factor: f32) -> Self {
        self.span(Style::RelativeSize(factor), None)
    }

    /// Strikethrough.
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.span(Style::Strikethrough, None)
    }

    /// Underline.
    #[must_use]
    pub fn underline(self) -> Self {
        self.span(Style::Underline, None)
    }

    /// A link.
    #[must_use]
    pub fn url(self, url: &str) -> Self {
        self.span(Style::Url(url.into()), None)
    }

    /// Spelling suggestions.
    #[must_use]
    pub fn suggestion(self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let suggestions = suggestions.into_iter().map(Into::into).collect();
        self.span(Style::Suggestion(suggestions), None)
    }

    /// Colored, optionally clickable text.
    #[must_use]
    pub fn highlight(self, highlight: Highlight) -> Self {
        self.span(highlight, None)
    }

    /// A spacer over the current segment, or over a placeholder if there is none.
    #[must_use]
    pub fn margin(self, margin: Margin) -> Self {
        self.placeholder_if_empty().span(margin, None)
    }

    /// Finishes building.
    pub fn build(mut self) -> Result<StyledText, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.commit();
        Ok(self.built)
    }

    fn placeholder_if_empty(mut self) -> Self {
        if self.pending.is_empty() {
            self.pending = image_placeholder();
        }
        self
    }

    fn update(mut self, f: impl FnOnce(StyledText) -> Result<StyledText, Error>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match f(core::mem::take(&mut self.pending)) {
            Ok(pending) => self.pending = pending,
            Err(error) => self.error = Some(error),
        }
        self
    }

    fn commit(&mut self) {
        let pending = core::mem::take(&mut self.pending);
        if !pending.is_empty() {
            self.built.append(pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use peniko::Color;

    use super::SpanBuilder;
    use crate::image::InlineImage;
    use crate::render::Drawable;
    use crate::rule::ReplaceRule;
    use crate::style::Style;
    use crate::Error;

    #[test]
    fn segments_keep_their_own_styles() {
        let text = SpanBuilder::new()
            .text("ab")
            .underline()
            .image(InlineImage::new(Drawable::new("dot", 4, 4)))
            .text("cd")
            .color(Color::WHITE)
            .build()
            .unwrap();
        assert_eq!(text.as_str(), "abcd");
        let kinds: Vec<_> = text
            .attributes_iter()
            .map(|(range, style)| (range.clone(), matches!(style, Style::Image(_))))
            .collect();
        assert_eq!(kinds, [(0..2, false), (0..2, true), (2..4, false)]);
    }

    #[test]
    fn image_without_text_uses_placeholder() {
        let text = SpanBuilder::new()
            .image(InlineImage::new(Drawable::new("dot", 4, 4)))
            .text("x")
            .build()
            .unwrap();
        assert_eq!(text.as_str(), " x");
        assert_eq!(
            text.attributes_iter().next().map(|(r, _)| r.clone()),
            Some(0..1)
        );
    }

    #[test]
    fn rule_applies_within_segment() {
        let text = SpanBuilder::new()
            .text("1 + 1 = 2")
            .span(Style::Superscript, Some(&ReplaceRule::regex(r"\d")))
            .build()
            .unwrap();
        assert_eq!(text.attributes_len(), 3);
    }

    #[test]
    fn first_error_is_returned() {
        let result = SpanBuilder::new()
            .text("x")
            .color_str("no such color")
            .span(Style::Underline, Some(&ReplaceRule::regex("(")))
            .build();
        assert!(matches!(result, Err(Error::Color(_))));
    }
}
