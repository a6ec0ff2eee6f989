// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning match occurrences into replacement outcomes.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use attributed_text::AttributedText;

use crate::locate::{MatchOccurrence, Scope};

/// What to do with one match occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplacementOutcome<S> {
    /// Leave the occurrence alone.
    Skip,
    /// Attach styles over the occurrence; `None` entries are ignored.
    Styles(Vec<Option<S>>),
    /// Replace the occurrence with plain text.
    PlainText(String),
    /// Replace the occurrence with styled text, keeping the styles it carries.
    Styled(AttributedText<S>),
}

impl<S> ReplacementOutcome<S> {
    /// Attach a single style over the occurrence.
    pub fn style(style: S) -> Self {
        Self::Styles(alloc::vec![Some(style)])
    }

    /// Attach several styles over the occurrence.
    pub fn styles(styles: impl IntoIterator<Item = S>) -> Self {
        Self::Styles(styles.into_iter().map(Some).collect())
    }

    /// Replace the occurrence with `text` carrying each present style over its full length.
    pub fn styled(text: impl Into<String>, styles: impl IntoIterator<Item = Option<S>>) -> Self {
        let mut value = AttributedText::new(text);
        for style in styles.into_iter().flatten() {
            value.apply_attribute_to_all(style);
        }
        Self::Styled(value)
    }

    /// Returns `true` if this outcome replaces text.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::PlainText(_) | Self::Styled(_))
    }
}

impl<S> From<String> for ReplacementOutcome<S> {
    fn from(value: String) -> Self {
        Self::PlainText(value)
    }
}

impl<S> From<&str> for ReplacementOutcome<S> {
    fn from(value: &str) -> Self {
        Self::PlainText(value.into())
    }
}

impl<S> From<AttributedText<S>> for ReplacementOutcome<S> {
    fn from(value: AttributedText<S>) -> Self {
        Self::Styled(value)
    }
}

impl<S> From<Vec<Option<S>>> for ReplacementOutcome<S> {
    fn from(value: Vec<Option<S>>) -> Self {
        Self::Styles(value)
    }
}

/// How occurrences are selected and resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplacementPolicy {
    /// Which occurrences are considered.
    pub scope: Scope,
    /// How many occurrences at most are passed to the replacement callback.
    pub max_matches: usize,
    /// Whether `$N` placeholders in textual replacements are substituted with capture groups.
    pub group_substitution: bool,
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        Self {
            scope: Scope::All,
            max_matches: usize::MAX,
            group_substitution: false,
        }
    }
}

impl ReplacementPolicy {
    /// Policy considering every occurrence.
    pub fn all() -> Self {
        Self::default()
    }

    /// Policy considering only the first occurrence.
    pub fn first() -> Self {
        Self::default().with_scope(Scope::First)
    }

    /// Policy considering only the last occurrence.
    pub fn last() -> Self {
        Self::default().with_scope(Scope::Last)
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Caps the number of occurrences passed to the callback. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches.max(1);
        self
    }

    /// Enables or disables `$N` group substitution.
    #[must_use]
    pub fn with_group_substitution(mut self, enabled: bool) -> Self {
        self.group_substitution = enabled;
        self
    }
}

/// Resolves occurrences one at a time, counting how many reached the callback.
#[derive(Clone, Debug)]
pub struct Resolver {
    policy: ReplacementPolicy,
    considered: usize,
}

impl Resolver {
    /// Creates a resolver for `policy`.
    pub fn new(policy: ReplacementPolicy) -> Self {
        Self {
            policy,
            considered: 0,
        }
    }

    /// The number of occurrences passed to the callback so far.
    pub fn considered(&self) -> usize {
        self.considered
    }

    /// Resolves one occurrence.
    ///
    /// Once `max_matches` occurrences have been considered the callback is no longer invoked and
    /// every further occurrence resolves to [`ReplacementOutcome::Skip`].
    pub fn resolve<S, F>(
        &mut self,
        occurrence: &MatchOccurrence,
        callback: &mut F,
    ) -> ReplacementOutcome<S>
    where
        F: FnMut(&MatchOccurrence) -> ReplacementOutcome<S>,
    {
        if self.considered >= self.policy.max_matches {
            return ReplacementOutcome::Skip;
        }
        self.considered += 1;
        let outcome = callback(occurrence);
        if self.policy.group_substitution && occurrence.has_capture_groups() {
            substitute_outcome(outcome, occurrence.groups())
        } else {
            outcome
        }
    }
}

fn substitute_outcome<S>(
    outcome: ReplacementOutcome<S>,
    groups: &[Option<String>],
) -> ReplacementOutcome<S> {
    match outcome {
        ReplacementOutcome::PlainText(text) => match substitute_groups(&text, groups) {
            Cow::Borrowed(_) => ReplacementOutcome::PlainText(text),
            Cow::Owned(substituted) => ReplacementOutcome::PlainText(substituted),
        },
        ReplacementOutcome::Styled(value) => {
            let Cow::Owned(substituted) = substitute_groups(value.as_str(), groups) else {
                return ReplacementOutcome::Styled(value);
            };
            // Styles cannot follow sub-ranges through substitution; they cover the whole result.
            let (_, attributes) = value.into_parts();
            let mut rebuilt = AttributedText::new(substituted);
            for (_, style) in attributes {
                rebuilt.apply_attribute_to_all(style);
            }
            ReplacementOutcome::Styled(rebuilt)
        }
        other => other,
    }
}

/// Substitutes `$N` placeholders in `template` with `groups[N]`.
///
/// Group 0 is the whole match. The digits after `$` are read greedily; placeholders naming a
/// group that does not exist are kept verbatim, and groups that did not participate substitute
/// as empty text.
pub fn substitute_groups<'a>(template: &'a str, groups: &[Option<String>]) -> Cow<'a, str> {
    if !template.contains('$') {
        return Cow::Borrowed(template);
    }
    let mut out = String::with_capacity(template.len());
    let mut changed = false;
    let mut rest = template;
    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let group = after[..digits]
            .parse::<usize>()
            .ok()
            .and_then(|index| groups.get(index));
        match group {
            Some(text) => {
                out.push_str(text.as_deref().unwrap_or_default());
                changed = true;
            }
            None => out.push_str(&rest[dollar..dollar + 1 + digits]),
        }
        rest = &after[digits..];
    }
    out.push_str(rest);
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(template)
    }
}
