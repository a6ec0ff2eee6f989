// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::fmt;

use peniko::Color;

use crate::render::{TextPaint, Typeface};

/// Callback receiving the text of a clicked span.
pub type ClickHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Colored, optionally clickable text.
///
/// Unlike a link, a highlight is not underlined. Clicks are delivered through
/// [`ClickDispatcher`](crate::ClickDispatcher). A highlight attached to the matches of a
/// [`ReplaceRule`](crate::ReplaceRule) remembers the text each match had, and its handler
/// receives that text even when the rule replaced it.
#[derive(Clone, Default)]
pub struct Highlight {
    color: Option<Color>,
    typeface: Option<Typeface>,
    on_click: Option<ClickHandler>,
    matched: Option<Arc<str>>,
}

impl fmt::Debug for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlight")
            .field("color", &self.color)
            .field("typeface", &self.typeface)
            .field("clickable", &self.on_click.is_some())
            .field("matched", &self.matched)
            .finish()
    }
}

impl PartialEq for Highlight {
    fn eq(&self, other: &Self) -> bool {
        let same_handler = match (&self.on_click, &other.on_click) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_handler
            && self.color == other.color
            && self.typeface == other.typeface
            && self.matched == other.matched
    }
}

impl Highlight {
    /// A highlight drawing text in `color`.
    pub fn new(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Draws the text with `typeface`.
    #[must_use]
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = Some(typeface);
        self
    }

    /// Makes the highlight clickable.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    /// Passes `text` to the click handler instead of the text the span covers.
    #[must_use]
    pub fn with_matched_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.matched = Some(text.into());
        self
    }

    /// The text the highlight was attached to, if it came from a rule match.
    pub fn matched_text(&self) -> Option<&str> {
        self.matched.as_deref()
    }

    /// The text color, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns `true` if a click handler is attached.
    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some()
    }

    /// Applies the highlight to `paint`.
    pub fn update_draw_state(&self, paint: &mut TextPaint) {
        if let Some(color) = self.color {
            paint.color = color;
        }
        if let Some(typeface) = &self.typeface {
            paint.typeface = Some(typeface.clone());
        }
        paint.underline = false;
    }

    /// Runs the click handler. Returns `false` if there is none.
    ///
    /// The handler receives the matched text, or the covered `text` if the highlight was not
    /// attached through a rule.
    pub fn click(&self, text: &str) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler(self.matched.as_deref().unwrap_or(text));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use peniko::Color;

    use super::Highlight;
    use crate::render::{TextPaint, TextStyle, Typeface};

    #[test]
    fn draw_state_sets_color_and_typeface() {
        let highlight = Highlight::new(Color::from_rgb8(0x21, 0x96, 0xf3))
            .with_typeface(Typeface::new("serif").with_style(TextStyle::Bold));
        let mut paint = TextPaint {
            underline: true,
            ..TextPaint::default()
        };
        highlight.update_draw_state(&mut paint);
        assert_eq!(paint.color, Color::from_rgb8(0x21, 0x96, 0xf3));
        assert_eq!(
            paint.typeface.as_ref().map(|t| t.style),
            Some(TextStyle::Bold)
        );
        assert!(!paint.underline);
    }

    #[test]
    fn click_passes_span_text() {
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        let highlight = Highlight::new(Color::BLACK)
            .on_click(move |text| sink.lock().unwrap().push(text.to_string()));
        assert!(highlight.click("privacy policy"));
        assert_eq!(*clicked.lock().unwrap(), ["privacy policy"]);
        assert!(!Highlight::new(Color::BLACK).click("inert"));
    }

    #[test]
    fn click_prefers_matched_text() {
        let clicked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicked);
        let highlight = Highlight::new(Color::BLACK)
            .on_click(move |text| sink.lock().unwrap().push(text.to_string()))
            .with_matched_text("[terms]");
        assert_eq!(highlight.matched_text(), Some("[terms]"));
        assert!(highlight.click("LINK"));
        assert_eq!(*clicked.lock().unwrap(), ["[terms]"]);
    }

    #[test]
    fn equality_compares_handler_identity() {
        let a = Highlight::new(Color::BLACK).on_click(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, Highlight::new(Color::BLACK).on_click(|_| {}));
        assert_eq!(Highlight::new(Color::BLACK), Highlight::new(Color::BLACK));
    }
}
