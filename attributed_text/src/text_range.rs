// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error};

/// A byte range that has been checked against a text.
///
/// A `TextRange` guarantees `start <= end`, that both ends are within the text, and that both
/// ends lie on UTF-8 character boundaries, for the text it was validated against. Reusing it
/// with a different (or since edited) text is the caller's responsibility.
///
/// ## Example
///
/// ```
/// use attributed_text::{AttributedText, TextRange};
///
/// let mut text = AttributedText::new("Hello!");
/// let range = TextRange::new(text.text(), 0..5).unwrap();
/// text.apply_attribute(range.into(), ()).unwrap();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Validates `range` against `text`.
    #[inline]
    pub fn new(text: &str, range: Range<usize>) -> Result<Self, Error> {
        validate_range(text, &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// The number of bytes covered.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no bytes.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

#[inline]
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, len));
    }
    if range.end > len {
        return Err(Error::invalid_bounds(range.start, range.end, len));
    }
    for (which, index) in [(Endpoint::Start, range.start), (Endpoint::End, range.end)] {
        if !text.is_char_boundary(index) {
            return Err(Error::not_on_char_boundary(
                text,
                range.start,
                range.end,
                which,
                index,
            ));
        }
    }
    Ok(())
}
