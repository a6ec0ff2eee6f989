// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{Error, TextRange};

/// A mutable block of text with attributes applied to ranges within the text.
///
/// Ranges are byte offsets into the UTF-8 text and always lie on character boundaries.
///
/// Editing operations keep attribute ranges consistent with the text:
///
/// - attributes ending at or before an edit are untouched,
/// - attributes starting at or after an edit are shifted by the length delta,
/// - attributes intersecting a replaced (non-empty) range are dropped,
/// - attributes strictly containing an insertion point grow by the inserted length.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributedText<Attr> {
    text: String,
    attributes: Vec<(Range<usize>, Attr)>,
}

impl<Attr> Default for AttributedText<Attr> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<Attr> From<&str> for AttributedText<Attr> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<Attr> From<String> for AttributedText<Attr> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<Attr> AttributedText<Attr> {
    /// Create an `AttributedText` with no attributes applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    /// Borrow the underlying text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Borrow the underlying text as `&str`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Validates a byte `range` against this text and returns a [`TextRange`].
    pub fn range(&self, range: Range<usize>) -> Result<TextRange, Error> {
        TextRange::new(&self.text, range)
    }

    /// Apply an `attribute` to a `range` within the text.
    ///
    /// Attributes stack: applying two attributes to the same range keeps both.
    pub fn apply_attribute(&mut self, range: Range<usize>, attribute: Attr) -> Result<(), Error> {
        let range = self.range(range)?;
        self.attributes.push((range.as_range(), attribute));
        Ok(())
    }

    /// Apply an `attribute` to the whole text.
    pub fn apply_attribute_to_all(&mut self, attribute: Attr) {
        self.attributes.push((0..self.text.len(), attribute));
    }

    /// Apply an `attribute`, first removing any attribute of the same kind at exactly `range`.
    ///
    /// `same_kind` decides whether an existing attribute is of the same kind as the new one.
    /// Returns the attribute that was replaced, if any.
    pub fn set_attribute(
        &mut self,
        range: Range<usize>,
        attribute: Attr,
        same_kind: impl Fn(&Attr, &Attr) -> bool,
    ) -> Result<Option<Attr>, Error> {
        let range = self.range(range)?.as_range();
        let existing = self
            .attributes
            .iter()
            .position(|(span, attr)| *span == range && same_kind(attr, &attribute));
        let replaced = existing.map(|ix| self.attributes.remove(ix).1);
        self.attributes.push((range, attribute));
        Ok(replaced)
    }

    /// Remove every attribute for which `predicate` returns `true`.
    ///
    /// Returns the number of attributes removed.
    pub fn remove_attributes_where(
        &mut self,
        mut predicate: impl FnMut(&Range<usize>, &Attr) -> bool,
    ) -> usize {
        let before = self.attributes.len();
        self.attributes
            .retain(|(range, attr)| !predicate(range, attr));
        before - self.attributes.len()
    }

    /// Iterate over all attributes and the ranges they apply to.
    ///
    /// Attributes are yielded in the order they were applied.
    pub fn attributes_iter(&self) -> impl ExactSizeIterator<Item = (&Range<usize>, &Attr)> {
        self.attributes.iter().map(|(range, attr)| (range, attr))
    }

    /// Get an iterator over the attributes that apply at the given `index`.
    ///
    /// This doesn't handle conflicting attributes, it just reports everything.
    pub fn attributes_at(&self, index: usize) -> impl Iterator<Item = &Attr> {
        self.attributes.iter().filter_map(move |(attr_span, attr)| {
            if attr_span.contains(&index) {
                Some(attr)
            } else {
                None
            }
        })
    }

    /// Get an iterator over the attributes that apply to the given `range`.
    ///
    /// This doesn't handle conflicting attributes, it just reports everything.
    pub fn attributes_for_range(&self, range: Range<usize>) -> impl Iterator<Item = &Attr> {
        self.attributes.iter().filter_map(move |(attr_span, attr)| {
            if (attr_span.start < range.end) && (attr_span.end > range.start) {
                Some(attr)
            } else {
                None
            }
        })
    }

    /// Returns the number of attribute spans applied to the text.
    pub fn attributes_len(&self) -> usize {
        self.attributes.len()
    }

    /// Remove all applied attribute spans.
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// Replace the text in `range` with `replacement`.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> Result<(), Error> {
        let range = self.range(range)?;
        self.splice_unchecked(range, replacement, Vec::new());
        Ok(())
    }

    /// Replace the text in `range` with another attributed text, keeping its attributes.
    ///
    /// The attributes of `replacement` are shifted to the insertion point and appended after
    /// the existing attributes.
    pub fn splice(&mut self, range: Range<usize>, replacement: Self) -> Result<(), Error> {
        let range = self.range(range)?;
        let Self { text, attributes } = replacement;
        self.splice_unchecked(range, &text, attributes);
        Ok(())
    }

    /// Insert `text` at byte offset `index`.
    pub fn insert_str(&mut self, index: usize, text: &str) -> Result<(), Error> {
        self.replace_range(index..index, text)
    }

    /// Insert another attributed text at byte offset `index`.
    pub fn insert(&mut self, index: usize, other: Self) -> Result<(), Error> {
        self.splice(index..index, other)
    }

    /// Remove the text in `range`.
    pub fn remove_range(&mut self, range: Range<usize>) -> Result<(), Error> {
        self.replace_range(range, "")
    }

    /// Append plain text to the end.
    ///
    /// Attributes that end exactly at the old end are not extended.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append another attributed text, keeping its attributes.
    pub fn append(&mut self, other: Self) {
        let offset = self.text.len();
        let Self { text, attributes } = other;
        self.text.push_str(&text);
        self.attributes.extend(
            attributes
                .into_iter()
                .map(|(range, attr)| (range.start + offset..range.end + offset, attr)),
        );
    }

    /// Replaces the underlying text and clears all attributes, retaining allocated storage.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.attributes.clear();
    }

    /// Consume the attributed text, returning the text and its attribute spans.
    pub fn into_parts(self) -> (String, Vec<(Range<usize>, Attr)>) {
        (self.text, self.attributes)
    }

    fn splice_unchecked(
        &mut self,
        range: TextRange,
        replacement: &str,
        inserted: Vec<(Range<usize>, Attr)>,
    ) {
        let removed = range.as_range();
        let inserted_len = replacement.len();
        self.text.replace_range(removed.clone(), replacement);
        self.adjust_attributes(&removed, inserted_len);
        let at = removed.start;
        self.attributes.extend(
            inserted
                .into_iter()
                .map(|(span, attr)| (span.start + at..span.end + at, attr)),
        );
    }

    fn adjust_attributes(&mut self, removed: &Range<usize>, inserted_len: usize) {
        let removed_len = removed.end - removed.start;
        if removed_len == 0 {
            let at = removed.start;
            for (span, _) in &mut self.attributes {
                if span.start >= at {
                    span.start += inserted_len;
                    span.end += inserted_len;
                } else if span.end > at {
                    span.end += inserted_len;
                }
            }
            return;
        }
        self.attributes.retain_mut(|(span, _)| {
            if span.end <= removed.start {
                true
            } else if span.start >= removed.end {
                span.start = span.start - removed_len + inserted_len;
                span.end = span.end - removed_len + inserted_len;
                true
            } else {
                false
            }
        });
    }
}
