// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying resolved outcomes to a styled buffer.

use core::ops::Range;

use attributed_text::AttributedText;

use crate::locate::MatchOccurrence;
use crate::resolve::ReplacementOutcome;
use crate::style::StyleTag;
use crate::Error;

/// Sets `style` over `range`, replacing a style of the same kind at exactly that range.
pub fn set_style<S: StyleTag>(
    buffer: &mut AttributedText<S>,
    range: Range<usize>,
    style: S,
) -> Result<(), Error> {
    buffer.set_attribute(range, style, S::same_kind)?;
    Ok(())
}

/// Sets each present style over `range`. `None` entries are skipped.
pub fn set_styles<S: StyleTag>(
    buffer: &mut AttributedText<S>,
    range: Range<usize>,
    styles: impl IntoIterator<Item = Option<S>>,
) -> Result<(), Error> {
    for style in styles.into_iter().flatten() {
        set_style(buffer, range.clone(), style)?;
    }
    Ok(())
}

/// Applies resolved outcomes to `buffer` in a single left-to-right pass.
///
/// Occurrences are given in coordinates of the text they were located in and must be ascending
/// and non-overlapping. Each is shifted by the net length change of the replacements before it:
///
/// - [`ReplacementOutcome::Skip`] leaves the buffer alone.
/// - [`ReplacementOutcome::Styles`] sets each style over the occurrence.
/// - [`ReplacementOutcome::PlainText`] and [`ReplacementOutcome::Styled`] replace the occurrence;
///   styled text brings its own styles along.
///
/// Styles outside replaced ranges are kept and shifted. Styles intersecting a replaced range are
/// dropped.
pub fn apply<S, I>(mut buffer: AttributedText<S>, resolved: I) -> Result<AttributedText<S>, Error>
where
    S: StyleTag,
    I: IntoIterator<Item = (MatchOccurrence, ReplacementOutcome<S>)>,
{
    let mut offset: isize = 0;
    let mut previous_end = 0;
    let mut replaced = 0_usize;
    let mut styled = 0_usize;
    for (occurrence, outcome) in resolved {
        let unordered = Error::Unordered {
            start: occurrence.start(),
            previous_end,
        };
        if occurrence.start() < previous_end {
            return Err(unordered);
        }
        previous_end = occurrence.end();
        let start = occurrence
            .start()
            .checked_add_signed(offset)
            .ok_or(unordered)?;
        let range = start..start + occurrence.len();
        let inserted = match outcome {
            ReplacementOutcome::Skip => continue,
            ReplacementOutcome::Styles(styles) => {
                log::trace!("styling {range:?}");
                set_styles(&mut buffer, range, styles)?;
                styled += 1;
                continue;
            }
            ReplacementOutcome::PlainText(text) => {
                buffer.replace_range(range.clone(), &text)?;
                text.len()
            }
            ReplacementOutcome::Styled(value) => {
                let len = value.len();
                buffer.splice(range.clone(), value)?;
                len
            }
        };
        log::trace!("replaced {range:?} with {inserted} bytes");
        offset += inserted as isize - range.len() as isize;
        replaced += 1;
    }
    log::debug!(
        "splice pass: {replaced} replaced, {styled} styled, net offset {offset}"
    );
    Ok(buffer)
}
