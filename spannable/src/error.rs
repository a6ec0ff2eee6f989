// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors produced while building or rewriting styled text.
///
/// A pattern that does not occur is not an error; operations return their input unchanged.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A range did not fit the text it was applied to.
    Range(attributed_text::Error),

    /// A regular expression failed to compile.
    Pattern(regex::Error),

    /// A color string could not be parsed.
    Color(peniko::color::ParseError),

    /// Occurrences handed to the splice engine were not in ascending, non-overlapping order.
    Unordered {
        /// Start of the offending occurrence, in source coordinates.
        start: usize,
        /// End of the previous occurrence, in source coordinates.
        previous_end: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(err) => write!(f, "{err}"),
            Self::Pattern(err) => write!(f, "invalid pattern: {err}"),
            Self::Color(err) => write!(f, "invalid color: {err}"),
            Self::Unordered {
                start,
                previous_end,
            } => write!(
                f,
                "occurrence starting at {start} overlaps previous occurrence ending at {previous_end}"
            ),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Range(err) => Some(err),
            Self::Pattern(err) => Some(err),
            Self::Color(err) => Some(err),
            Self::Unordered { .. } => None,
        }
    }
}

impl From<attributed_text::Error> for Error {
    fn from(value: attributed_text::Error) -> Self {
        Self::Range(value)
    }
}

impl From<regex::Error> for Error {
    fn from(value: regex::Error) -> Self {
        Self::Pattern(value)
    }
}

impl From<peniko::color::ParseError> for Error {
    fn from(value: peniko::color::ParseError) -> Self {
        Self::Color(value)
    }
}
