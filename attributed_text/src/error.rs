// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a caller-supplied range does not fit the text.
///
/// Range errors are programming errors: nothing in this crate clamps a bad range, it is reported
/// with the attempted range, the text length and, for misaligned indices, the character that was
/// split.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    start: usize,
    end: usize,
    len: usize,
    boundary: Option<BoundaryInfo>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` is the length of the text the range was checked against."
)]
impl Error {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte index of the rejected range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte index (exclusive) of the rejected range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the text when the range was rejected.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Where the range split a character, for [`ErrorKind::NotOnCharBoundary`].
    pub fn boundary(&self) -> Option<BoundaryInfo> {
        self.boundary
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidBounds,
            start,
            end,
            len,
            boundary: None,
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start,
            end,
            len,
            boundary: None,
        }
    }

    pub(crate) fn not_on_char_boundary(
        text: &str,
        start: usize,
        end: usize,
        which: Endpoint,
        index: usize,
    ) -> Self {
        let (char_start, char_end) = enclosing_char(text, index);
        Self {
            kind: ErrorKind::NotOnCharBoundary,
            start,
            end,
            len: text.len(),
            boundary: Some(BoundaryInfo {
                which,
                index,
                char_start,
                char_end,
            }),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.boundary) {
            (ErrorKind::InvalidBounds, _) => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            (ErrorKind::InvalidRange, _) => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            (ErrorKind::NotOnCharBoundary, Some(b)) => write!(
                f,
                "range {}..{}: {} index {} not on UTF-8 boundary (char {}..{})",
                self.start, self.end, b.which, b.index, b.char_start, b.char_end
            ),
            (ErrorKind::NotOnCharBoundary, None) => write!(
                f,
                "range {}..{} not on UTF-8 boundary",
                self.start, self.end
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An index lies past the end of the text.
    InvalidBounds,

    /// The range had `start > end`.
    InvalidRange,

    /// An index falls inside a multi-byte character.
    NotOnCharBoundary,
}

/// Which endpoint of a range failed validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The `start` endpoint of the range.
    Start,

    /// The `end` endpoint of the range.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// The character an index split, as reported by [`Error::boundary`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryInfo {
    /// Which endpoint was misaligned.
    pub which: Endpoint,

    /// The offending byte index.
    pub index: usize,

    /// The start byte index of the split character.
    pub char_start: usize,

    /// The end byte index (exclusive) of the split character.
    pub char_end: usize,
}

/// Returns the byte span of the character containing `index`.
///
/// Only called for in-bounds indices that are not boundaries, so a containing character exists.
fn enclosing_char(text: &str, index: usize) -> (usize, usize) {
    text.char_indices()
        .map(|(start, c)| (start, start + c.len_utf8()))
        .find(|&(start, end)| start < index && index < end)
        .unwrap_or((index, index))
}

#[cfg(test)]
mod tests {
    use super::enclosing_char;

    #[test]
    fn enclosing_char_of_multibyte() {
        // "隐" is 3 bytes, the flag emoji is two 4-byte codepoints.
        assert_eq!(enclosing_char("隐私", 1), (0, 3));
        assert_eq!(enclosing_char("隐私", 5), (3, 6));
        assert_eq!(enclosing_char("🇯🇵", 6), (4, 8));
    }
}
