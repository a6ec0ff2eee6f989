// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locate, resolve and splice in one call.

use alloc::vec::Vec;

use attributed_text::AttributedText;

use crate::locate::{locate, MatchOccurrence, Pattern};
use crate::resolve::{ReplacementOutcome, ReplacementPolicy, Resolver};
use crate::splice::apply;
use crate::style::StyleTag;
use crate::Error;

/// Rewrites the occurrences of `pattern` in `buffer` with the outcomes `replacement` returns.
///
/// Occurrences are located in the text as it is before any replacement. When the pattern does
/// not occur, `buffer` is returned unchanged and `replacement` is never called.
pub fn replace_span_with<S, F>(
    buffer: AttributedText<S>,
    pattern: &Pattern,
    policy: ReplacementPolicy,
    mut replacement: F,
) -> Result<AttributedText<S>, Error>
where
    S: StyleTag,
    F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
{
    let occurrences: Vec<_> = locate(buffer.as_str(), pattern, policy.scope).collect();
    if occurrences.is_empty() {
        return Ok(buffer);
    }
    log::debug!(
        "{} occurrences of {:?}",
        occurrences.len(),
        pattern.as_regex().as_str()
    );
    let mut resolver = Resolver::new(policy);
    apply(
        buffer,
        occurrences.into_iter().map(|occurrence| {
            let outcome = resolver.resolve(&occurrence, &mut replacement);
            (occurrence, outcome)
        }),
    )
}

/// Pattern based rewriting of styled text.
///
/// ```
/// use spannable::{Pattern, ReplaceExt, ReplacementOutcome, Style, StyledText};
/// use spannable::peniko::Color;
///
/// let text = StyledText::new("Agree to the privacy policy and the privacy policy FAQ")
///     .replace_span_first(&Pattern::literal("privacy policy")?, |_| {
///         ReplacementOutcome::style(Style::Color(Color::from_rgb8(0x21, 0x96, 0xf3)))
///     })?;
/// assert_eq!(text.attributes_iter().next().map(|(range, _)| range.clone()), Some(13..27));
/// # Ok::<_, spannable::Error>(())
/// ```
pub trait ReplaceExt<S>: Sized {
    /// Rewrites occurrences of `pattern` selected by `policy`.
    fn replace_span_with<F>(
        self,
        pattern: &Pattern,
        policy: ReplacementPolicy,
        replacement: F,
    ) -> Result<Self, Error>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>;

    /// Rewrites every occurrence of `pattern`.
    fn replace_span<F>(self, pattern: &Pattern, replacement: F) -> Result<Self, Error>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
    {
        self.replace_span_with(pattern, ReplacementPolicy::all(), replacement)
    }

    /// Rewrites the first occurrence of `pattern`.
    fn replace_span_first<F>(self, pattern: &Pattern, replacement: F) -> Result<Self, Error>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
    {
        self.replace_span_with(pattern, ReplacementPolicy::first(), replacement)
    }

    /// Rewrites the last occurrence of `pattern`.
    fn replace_span_last<F>(self, pattern: &Pattern, replacement: F) -> Result<Self, Error>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
    {
        self.replace_span_with(pattern, ReplacementPolicy::last(), replacement)
    }

    /// Rewrites occurrences of the literal `text`.
    fn replace_literal<F>(
        self,
        text: &str,
        ignore_case: bool,
        policy: ReplacementPolicy,
        replacement: F,
    ) -> Result<Self, Error>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
    {
        let pattern = if ignore_case {
            Pattern::literal_ignore_case(text)?
        } else {
            Pattern::literal(text)?
        };
        self.replace_span_with(&pattern, policy, replacement)
    }
}

impl<S: StyleTag> ReplaceExt<S> for AttributedText<S> {
    fn replace_span_with<F>(
        self,
        pattern: &Pattern,
        policy: ReplacementPolicy,
        replacement: F,
    ) -> Result<Self, Error>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
    {
        replace_span_with(self, pattern, policy, replacement)
    }
}

#[cfg(test)]
mod tests {
    use attributed_text::AttributedText;

    use super::ReplaceExt;
    use crate::locate::Pattern;
    use crate::resolve::{ReplacementOutcome, ReplacementPolicy};
    use crate::style::StyleTag;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Tag(u8);

    impl StyleTag for Tag {
        fn same_kind(&self, _: &Self) -> bool {
            true
        }
    }

    #[test]
    fn last_scope_touches_final_occurrence() {
        let text = AttributedText::<Tag>::new("x1 x2 x3")
            .replace_span_last(&Pattern::regex(r"x\d").unwrap(), |m| {
                ReplacementOutcome::PlainText(m.text().to_uppercase())
            })
            .unwrap();
        assert_eq!(text.as_str(), "x1 x2 X3");
    }

    #[test]
    fn literal_ignoring_case() {
        let mut seen = Vec::new();
        let text = AttributedText::<Tag>::new("Rust rust RUST")
            .replace_literal("rust", true, ReplacementPolicy::all(), |m| {
                seen.push(m.start());
                ReplacementOutcome::style(Tag(1))
            })
            .unwrap();
        assert_eq!(seen, [0, 5, 10]);
        assert_eq!(text.attributes_len(), 3);
    }

    #[test]
    fn literal_metacharacters_match_themselves() {
        let text = AttributedText::<Tag>::new("a.b a*b")
            .replace_literal("a*b", false, ReplacementPolicy::all(), |_| "ok".into())
            .unwrap();
        assert_eq!(text.as_str(), "a.b ok");
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(Pattern::regex("(unclosed").is_err());
    }
}
