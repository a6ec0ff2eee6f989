// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use attributed_text::AttributedText;

use crate::locate::{MatchOccurrence, Pattern};
use crate::replace::replace_span_with;
use crate::resolve::{ReplacementOutcome, ReplacementPolicy};
use crate::splice::set_style;
use crate::style::{Style, StyleTag};
use crate::Error;

type MatchCallback = Arc<dyn Fn(&MatchOccurrence) + Send + Sync>;

/// Where a style goes: matches of a pattern, optionally replaced with new text.
///
/// Used by the [`SpanExt`](crate::SpanExt) methods. Without a rule a style covers the whole text.
pub struct ReplaceRule<S = Style> {
    text: String,
    is_regex: bool,
    ignore_case: bool,
    match_quantity: usize,
    new_text: Option<AttributedText<S>>,
    on_match: Option<MatchCallback>,
}

impl<S: fmt::Debug> fmt::Debug for ReplaceRule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaceRule")
            .field("text", &self.text)
            .field("is_regex", &self.is_regex)
            .field("ignore_case", &self.ignore_case)
            .field("match_quantity", &self.match_quantity)
            .field("new_text", &self.new_text)
            .finish_non_exhaustive()
    }
}

impl<S: Clone> Clone for ReplaceRule<S> {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            is_regex: self.is_regex,
            ignore_case: self.ignore_case,
            match_quantity: self.match_quantity,
            new_text: self.new_text.clone(),
            on_match: self.on_match.clone(),
        }
    }
}

impl<S> ReplaceRule<S> {
    /// A rule matching `text` literally.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_regex: false,
            ignore_case: false,
            match_quantity: usize::MAX,
            new_text: None,
            on_match: None,
        }
    }

    /// A rule matching the regular expression `source`.
    pub fn regex(source: impl Into<String>) -> Self {
        Self {
            is_regex: true,
            ..Self::new(source)
        }
    }

    /// Matches literal text regardless of case.
    #[must_use]
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Styles at most `quantity` matches. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_match_quantity(mut self, quantity: usize) -> Self {
        self.match_quantity = quantity.max(1);
        self
    }

    /// Replaces each styled match with `new_text`.
    #[must_use]
    pub fn with_new_text(mut self, new_text: impl Into<AttributedText<S>>) -> Self {
        self.new_text = Some(new_text.into());
        self
    }

    /// Called with every match that gets styled.
    #[must_use]
    pub fn on_match(mut self, callback: impl Fn(&MatchOccurrence) + Send + Sync + 'static) -> Self {
        self.on_match = Some(Arc::new(callback));
        self
    }

    /// The maximum number of matches styled.
    pub fn match_quantity(&self) -> usize {
        self.match_quantity
    }

    /// Compiles the rule's pattern.
    pub fn pattern(&self) -> Result<Pattern, Error> {
        match (self.is_regex, self.ignore_case) {
            (true, _) => Pattern::regex(&self.text),
            (false, false) => Pattern::literal(&self.text),
            (false, true) => Pattern::literal_ignore_case(&self.text),
        }
    }
}

/// Applies the style `create` builds from the covered text, as `rule` says.
///
/// With a rule, each of the first `match_quantity` matches is reported to the rule's callback
/// and gets its own style; if the rule has new text, the match is replaced by it carrying the
/// style. Without a rule the style covers the whole text.
pub fn set_or_replace_span<S, F>(
    buffer: AttributedText<S>,
    rule: Option<&ReplaceRule<S>>,
    mut create: F,
) -> Result<AttributedText<S>, Error>
where
    S: StyleTag + Clone,
    F: FnMut(&str) -> S,
{
    let Some(rule) = rule else {
        let mut buffer = buffer;
        let style = create(buffer.as_str());
        let len = buffer.len();
        set_style(&mut buffer, 0..len, style)?;
        return Ok(buffer);
    };
    let policy = ReplacementPolicy::all().with_max_matches(rule.match_quantity);
    replace_span_with(buffer, &rule.pattern()?, policy, |occurrence| {
        if let Some(callback) = &rule.on_match {
            callback(occurrence);
        }
        let style = create(occurrence.text());
        match &rule.new_text {
            Some(new_text) => {
                let mut value = new_text.clone();
                value.apply_attribute_to_all(style);
                ReplacementOutcome::Styled(value)
            }
            None => ReplacementOutcome::style(style),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use attributed_text::AttributedText;
    use peniko::Color;

    use super::{set_or_replace_span, ReplaceRule};
    use crate::style::Style;

    fn colors(text: &AttributedText<Style>) -> Vec<(core::ops::Range<usize>, Style)> {
        text.attributes_iter()
            .map(|(range, style)| (range.clone(), style.clone()))
            .collect()
    }

    #[test]
    fn without_rule_styles_everything() {
        let text = set_or_replace_span(AttributedText::new("all"), None, |_| {
            Style::Color(Color::WHITE)
        })
        .unwrap();
        assert_eq!(colors(&text), [(0..3, Style::Color(Color::WHITE))]);
    }

    #[test]
    fn quantity_limits_matches_and_callbacks() {
        let matched = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&matched);
        let rule = ReplaceRule::new("ab")
            .with_match_quantity(2)
            .on_match(move |m| sink.lock().unwrap().push(m.start()));
        let source = AttributedText::new("ab ab ab");
        let text = set_or_replace_span(source, Some(&rule), |_| Style::Underline).unwrap();
        assert_eq!(*matched.lock().unwrap(), [0, 3]);
        assert_eq!(
            colors(&text),
            [(0..2, Style::Underline), (3..5, Style::Underline)]
        );
    }

    #[test]
    fn new_text_replaces_match_and_carries_style() {
        let rule = ReplaceRule::regex(r"\[(\w+)\]").with_new_text("IMG");
        let mut seen = Vec::new();
        let text = set_or_replace_span(
            AttributedText::new("see [cat] and [dog]"),
            Some(&rule),
            |matched| {
                seen.push(matched.to_string());
                Style::Strikethrough
            },
        )
        .unwrap();
        assert_eq!(text.as_str(), "see IMG and IMG");
        assert_eq!(seen, ["[cat]", "[dog]"]);
        assert_eq!(
            colors(&text),
            [
                (4..7, Style::Strikethrough),
                (12..15, Style::Strikethrough),
            ]
        );
    }
}
