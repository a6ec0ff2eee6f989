// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locating pattern occurrences in text.

use alloc::string::{String, ToString};
use core::ops::Range;

use regex::{CaptureMatches, Captures, Regex, RegexBuilder};
use smallvec::SmallVec;

use crate::Error;

/// A search pattern: a literal string or a regular expression.
///
/// Literal patterns are escaped, so regex metacharacters in them match themselves.
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// A pattern matching `text` literally.
    pub fn literal(text: &str) -> Result<Self, Error> {
        Self::build(&regex::escape(text), false)
    }

    /// A pattern matching `text` literally, ignoring case.
    pub fn literal_ignore_case(text: &str) -> Result<Self, Error> {
        Self::build(&regex::escape(text), true)
    }

    /// A pattern compiled from the regular expression `source`.
    pub fn regex(source: &str) -> Result<Self, Error> {
        Self::build(source, false)
    }

    fn build(source: &str, case_insensitive: bool) -> Result<Self, Error> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self { regex })
    }

    /// The compiled regular expression.
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

/// Which occurrences of a pattern are of interest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    /// Every occurrence.
    #[default]
    All,
    /// Only the first occurrence.
    First,
    /// Only the last occurrence.
    Last,
}

/// One located match of a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOccurrence {
    range: Range<usize>,
    groups: SmallVec<[Option<String>; 4]>,
}

impl MatchOccurrence {
    /// Builds an occurrence from its range and group texts.
    ///
    /// `groups[0]` must be the whole match.
    pub fn new(range: Range<usize>, groups: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            range,
            groups: groups.into_iter().collect(),
        }
    }

    fn from_captures(captures: &Captures<'_>) -> Self {
        let whole = captures
            .get(0)
            .expect("group 0 always participates in a match");
        Self {
            range: whole.range(),
            groups: captures
                .iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }

    /// The byte range of the match in the searched text.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The start byte offset of the match.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// The end byte offset (exclusive) of the match.
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// The length of the match in bytes.
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Returns `true` for an empty match.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The matched text.
    pub fn text(&self) -> &str {
        self.group(0).unwrap_or_default()
    }

    /// The text of group `index`, where group 0 is the whole match.
    ///
    /// Returns `None` for groups that did not participate or do not exist.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index)?.as_deref()
    }

    /// All groups, group 0 first.
    pub fn groups(&self) -> &[Option<String>] {
        &self.groups
    }

    /// Returns `true` if the pattern had capture groups besides the whole match.
    pub fn has_capture_groups(&self) -> bool {
        self.groups.len() > 1
    }
}

/// Lazily yields the occurrences of a pattern, in ascending order.
///
/// Created by [`locate`].
#[derive(Debug)]
pub struct Occurrences<'r, 'h> {
    matches: CaptureMatches<'r, 'h>,
    scope: Scope,
    finished: bool,
}

impl Iterator for Occurrences<'_, '_> {
    type Item = MatchOccurrence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let captures = match self.scope {
            Scope::All => self.matches.next(),
            Scope::First => {
                self.finished = true;
                self.matches.next()
            }
            Scope::Last => {
                // The regex engine only searches forward.
                self.finished = true;
                self.matches.by_ref().last()
            }
        };
        captures.map(|c| MatchOccurrence::from_captures(&c))
    }
}

/// Locates the occurrences of `pattern` in `source`.
///
/// Occurrences never overlap and come in ascending order. A pattern that does not occur yields
/// nothing.
pub fn locate<'r, 'h>(source: &'h str, pattern: &'r Pattern, scope: Scope) -> Occurrences<'r, 'h> {
    Occurrences {
        matches: pattern.regex.captures_iter(source),
        scope,
        finished: false,
    }
}

#[cfg(test)]
mod tests {
    use super::{locate, Pattern, Scope};
    use alloc::vec::Vec;
    use core::ops::Range;

    fn ranges(source: &str, pattern: &Pattern, scope: Scope) -> Vec<Range<usize>> {
        locate(source, pattern, scope).map(|m| m.range()).collect()
    }

    #[test]
    fn literal_metacharacters_match_themselves() {
        let pattern = Pattern::literal("a.b").unwrap();
        let found = ranges("axb a.b", &pattern, Scope::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], 4..7);
    }

    #[test]
    fn literal_ignore_case() {
        let pattern = Pattern::literal_ignore_case("Rust").unwrap();
        assert_eq!(
            ranges("rust RUST Rust", &pattern, Scope::All),
            [0..4, 5..9, 10..14]
        );
    }

    #[test]
    fn scopes() {
        let pattern = Pattern::literal("ab").unwrap();
        let source = "ab-ab-ab";
        assert_eq!(ranges(source, &pattern, Scope::All), [0..2, 3..5, 6..8]);
        let first = ranges(source, &pattern, Scope::First);
        let last = ranges(source, &pattern, Scope::Last);
        assert_eq!((first.len(), last.len()), (1, 1));
        assert_eq!((first[0].clone(), last[0].clone()), (0..2, 6..8));
    }

    #[test]
    fn no_match_is_empty() {
        let pattern = Pattern::literal("zz").unwrap();
        for scope in [Scope::All, Scope::First, Scope::Last] {
            assert!(locate("abc", &pattern, scope).next().is_none());
        }
    }

    #[test]
    fn groups_are_captured() {
        let pattern = Pattern::regex(r"(\d+)(px)?").unwrap();
        let found: Vec<_> = locate("w 12px h 7", &pattern, Scope::All).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text(), "12px");
        assert_eq!(found[0].group(1), Some("12"));
        assert_eq!(found[0].group(2), Some("px"));
        assert_eq!(found[1].group(2), None);
        assert_eq!(found[1].group(9), None);
        assert!(found[1].has_capture_groups());
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(Pattern::regex("(unclosed").is_err());
    }
}
