// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attaching [`Style`]s to [`StyledText`].

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use peniko::Color;

use crate::highlight::Highlight;
use crate::image::{InlineImage, RemoteImage};
use crate::margin::Margin;
use crate::render::{Blur, TextStyle, Typeface};
use crate::rule::{set_or_replace_span, ReplaceRule};
use crate::splice::set_styles;
use crate::style::{parse_color, Style, TextAppearance};
use crate::{Error, StyledText};

/// The text image styles are attached to when there is no text to cover.
pub const IMAGE_PLACEHOLDER: &str = " ";

/// A single space to attach an image style to.
pub fn image_placeholder() -> StyledText {
    StyledText::new(IMAGE_PLACEHOLDER)
}

/// Joins `parts`, keeping their styles.
pub fn concat(parts: impl IntoIterator<Item = StyledText>) -> StyledText {
    let mut joined = StyledText::default();
    for part in parts {
        joined.append(part);
    }
    joined
}

/// Styling operations on [`StyledText`].
///
/// Every `span_*` method takes an optional [`ReplaceRule`]. Without one the style covers the
/// whole text; with one it covers the rule's matches, or replaces them with the rule's new text.
/// Setting a style where a style of the same kind already covers exactly the same range replaces
/// it.
///
/// ```
/// use spannable::{ReplaceRule, SpanExt, StyledText, TextStyle};
///
/// let text = StyledText::new("Terms of Service")
///     .span_style(TextStyle::Bold, None)?
///     .span_underline(Some(&ReplaceRule::new("Service")))?;
/// assert_eq!(text.attributes_len(), 2);
/// assert_eq!(text.attributes_at(10).count(), 2);
/// # Ok::<_, spannable::Error>(())
/// ```
pub trait SpanExt: Sized {
    /// Applies the style `create` builds from the covered text.
    fn span_with(
        self,
        rule: Option<&ReplaceRule>,
        create: impl FnMut(&str) -> Style,
    ) -> Result<Self, Error>;

    /// Applies a clone of `style`.
    ///
    /// With a rule, a [`Highlight`] is bound to the text of each match it covers.
    fn span(self, style: impl Into<Style>, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        let style = style.into();
        let per_match = rule.is_some();
        self.span_with(rule, |matched| {
            if per_match {
                style.for_match(matched)
            } else {
                style.clone()
            }
        })
    }

    /// Bold and/or italic.
    fn span_style(self, style: TextStyle, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::TextStyle(style), rule)
    }

    /// A font family.
    fn span_typeface(self, typeface: Typeface, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Typeface(typeface), rule)
    }

    /// Font style, size, color and family together.
    fn span_text_appearance(
        self,
        appearance: TextAppearance,
        rule: Option<&ReplaceRule>,
    ) -> Result<Self, Error> {
        self.span(Style::TextAppearance(appearance), rule)
    }

    /// Text color.
    fn span_color(self, color: Color, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Color(color), rule)
    }

    /// Text color given as a CSS color string.
    fn span_color_str(self, color: &str, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span_color(parse_color(color)?, rule)
    }

    /// Background color.
    fn span_background(self, color: Color, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Background(color), rule)
    }

    /// An inline image. All covered ranges share the image.
    fn span_image(self, image: InlineImage, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Image(Arc::new(image)), rule)
    }

    /// An image fetched by a loader. All covered ranges share the image and its load.
    fn span_remote_image(
        self,
        image: RemoteImage,
        rule: Option<&ReplaceRule>,
    ) -> Result<Self, Error> {
        self.span(Style::RemoteImage(Arc::new(image)), rule)
    }

    /// Horizontal glyph scale.
    fn span_scale_x(self, scale: f32, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::ScaleX(scale), rule)
    }

    /// Blurred glyphs.
    fn span_blur_mask(
        self,
        radius: f32,
        blur: Blur,
        rule: Option<&ReplaceRule>,
    ) -> Result<Self, Error> {
        self.span(Style::BlurMask { radius, blur }, rule)
    }

    /// Superscript.
    fn span_superscript(self, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Superscript, rule)
    }

    /// Subscript.
    fn span_subscript(self, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Subscript, rule)
    }

    /// Absolute text size, in pixels or density-independent pixels.
    fn span_absolute_size(
        self,
        size: i32,
        dip: bool,
        rule: Option<&ReplaceRule>,
    ) -> Result<Self, Error> {
        self.span(Style::AbsoluteSize { size, dip }, rule)
    }

    /// Text size relative to the surrounding text.
    fn span_relative_size(self, factor: f32, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::RelativeSize(factor), rule)
    }

    /// Strikethrough.
    fn span_strikethrough(self, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Strikethrough, rule)
    }

    /// Underline.
    fn span_underline(self, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Underline, rule)
    }

    /// A link to `url`.
    fn span_url(self, url: &str, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Url(url.into()), rule)
    }

    /// Spelling suggestions.
    fn span_suggestion(
        self,
        suggestions: Vec<String>,
        rule: Option<&ReplaceRule>,
    ) -> Result<Self, Error> {
        self.span(Style::Suggestion(suggestions), rule)
    }

    /// Colored, optionally clickable text.
    fn span_highlight(
        self,
        highlight: Highlight,
        rule: Option<&ReplaceRule>,
    ) -> Result<Self, Error> {
        self.span(Style::Highlight(highlight), rule)
    }

    /// A fixed-width spacer.
    fn span_margin(self, margin: Margin, rule: Option<&ReplaceRule>) -> Result<Self, Error> {
        self.span(Style::Margin(margin), rule)
    }

    /// Appends `text` with `styles` covering it. `None` entries are skipped.
    fn add_span(
        self,
        text: impl Into<StyledText>,
        styles: impl IntoIterator<Item = Option<Style>>,
    ) -> Result<Self, Error>;

    /// Inserts `text` at byte offset `at` with `styles` covering it. `None` entries are skipped.
    fn insert_span(
        self,
        at: usize,
        text: impl Into<StyledText>,
        styles: impl IntoIterator<Item = Option<Style>>,
    ) -> Result<Self, Error>;
}

impl SpanExt for StyledText {
    fn span_with(
        self,
        rule: Option<&ReplaceRule>,
        create: impl FnMut(&str) -> Style,
    ) -> Result<Self, Error> {
        set_or_replace_span(self, rule, create)
    }

    fn add_span(
        mut self,
        text: impl Into<Self>,
        styles: impl IntoIterator<Item = Option<Style>>,
    ) -> Result<Self, Error> {
        let start = self.len();
        self.append(text.into());
        let end = self.len();
        set_styles(&mut self, start..end, styles)?;
        Ok(self)
    }

    fn insert_span(
        mut self,
        at: usize,
        text: impl Into<Self>,
        styles: impl IntoIterator<Item = Option<Style>>,
    ) -> Result<Self, Error> {
        let text = text.into();
        let len = text.len();
        self.insert(at, text)?;
        set_styles(&mut self, at..at + len, styles)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use std::sync::Mutex;

    use peniko::Color;

    use super::{concat, image_placeholder, SpanExt};
    use crate::click::ClickDispatcher;
    use crate::highlight::Highlight;
    use crate::image::InlineImage;
    use crate::render::{Drawable, TextStyle};
    use crate::rule::ReplaceRule;
    use crate::style::Style;
    use crate::StyledText;

    fn spans(text: &StyledText) -> Vec<(core::ops::Range<usize>, Style)> {
        text.attributes_iter()
            .map(|(range, style)| (range.clone(), style.clone()))
            .collect()
    }

    #[test]
    fn color_string_and_dedup() {
        let text = StyledText::new("red")
            .span_color_str("#00f", None)
            .unwrap()
            .span_color_str("red", None)
            .unwrap();
        let spans = spans(&text);
        let [(range, Style::Color(color))] = &spans[..] else {
            panic!("expected a single color style");
        };
        assert_eq!(*range, 0..3);
        assert_eq!(color.to_rgba8(), Color::from_rgb8(255, 0, 0).to_rgba8());
        assert!(StyledText::new("x").span_color_str("#zz", None).is_err());
    }

    #[test]
    fn image_shared_across_matches() {
        let rule = ReplaceRule::new(":)").with_new_text(image_placeholder());
        let image = InlineImage::new(Drawable::new("smile", 16, 16));
        let text = StyledText::new("hi :) bye :)")
            .span_image(image, Some(&rule))
            .unwrap();
        assert_eq!(text.as_str(), "hi   bye  ");
        let images: Vec<_> = text
            .attributes_iter()
            .filter_map(|(range, style)| match style {
                Style::Image(image) => Some((range.clone(), Arc::clone(image))),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);
        assert_eq!((images[0].0.clone(), images[1].0.clone()), (3..4, 9..10));
        assert!(Arc::ptr_eq(&images[0].1, &images[1].1));
    }

    #[test]
    fn highlight_click_receives_text_before_replacement() {
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        let highlight = Highlight::new(Color::BLACK)
            .on_click(move |text| sink.lock().unwrap().push(text.to_string()));
        let rule = ReplaceRule::regex(r"\[\w+\]").with_new_text("LINK");
        let text = StyledText::new("see [terms] now")
            .span_highlight(highlight, Some(&rule))
            .unwrap();
        assert_eq!(text.as_str(), "see LINK now");
        assert!(ClickDispatcher::new().click_at(&text, 5));
        assert_eq!(*clicked.lock().unwrap(), ["[terms]"]);
    }

    #[test]
    fn add_and_insert_span() {
        let text = StyledText::new("world")
            .add_span("!", [Some(Style::Underline)])
            .unwrap()
            .insert_span(0, "hello ", [Some(Style::TextStyle(TextStyle::Bold)), None])
            .unwrap();
        assert_eq!(text.as_str(), "hello world!");
        assert_eq!(
            spans(&text),
            [
                (11..12, Style::Underline),
                (0..6, Style::TextStyle(TextStyle::Bold)),
            ]
        );
        let text = StyledText::new("é");
        assert!(text.insert_span(1, "x", [Some(Style::Underline)]).is_err());
    }

    #[test]
    fn concat_keeps_styles() {
        let first = StyledText::new("ab").span_underline(None).unwrap();
        let second = StyledText::new("cd").span_strikethrough(None).unwrap();
        let joined = concat([first, second]);
        assert_eq!(joined.as_str(), "abcd");
        assert_eq!(
            spans(&joined),
            [(0..2, Style::Underline), (2..4, Style::Strikethrough)]
        );
    }
}
