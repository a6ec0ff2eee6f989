// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled substring rewriting on top of [`attributed_text`].
//!
//! The core is a three stage pipeline over an [`AttributedText`] buffer:
//!
//! - [`locate`] finds the occurrences of a literal or regular expression [`Pattern`].
//! - [`Resolver`] asks a callback what to do with each occurrence, honoring a
//!   [`ReplacementPolicy`] (first, last or all occurrences, a cap on how many are considered, and
//!   `$N` capture group substitution).
//! - [`apply`] splices the resulting [`ReplacementOutcome`]s into the buffer in one pass, shifting
//!   later occurrences by the length change of earlier replacements.
//!
//! [`replace_span_with`] and the [`ReplaceExt`] trait run all three at once. The engine is generic
//! over the style payload through [`StyleTag`].
//!
//! On top of the engine this crate provides a style vocabulary ([`Style`], stored in
//! [`StyledText`]), the [`SpanExt`] styling operations and the [`SpanBuilder`], and styles that
//! draw in place of their text: [`InlineImage`], [`RemoteImage`] and [`Margin`]. These measure
//! and draw through the [`TextMeasure`] and [`Canvas`] traits a host implements.
//!
//! ## Indices
//!
//! All ranges are byte indices into UTF-8 text and must lie on character boundaries. Invalid
//! ranges are reported as [`Error`]s, never clamped.
//!
//! ## Edits and styles
//!
//! When text is replaced, styles ending before the replaced range are kept, styles starting after
//! it are shifted, and styles intersecting it are dropped.
//!
//! ## Example
//!
//! ```
//! use spannable::{Pattern, ReplaceExt, ReplacementOutcome, ReplacementPolicy, StyledText};
//!
//! let text = StyledText::new("隐私权政策 | 许可 | 品牌指南").replace_span_with(
//!     &Pattern::regex(r"\| (.*) \|")?,
//!     ReplacementPolicy::all().with_group_substitution(true),
//!     |_| "# $1 #".into(),
//! )?;
//! assert_eq!(text.as_str(), "隐私权政策 # 许可 # 品牌指南");
//! # Ok::<_, spannable::Error>(())
//! ```
//!
//! ## Logging
//!
//! Splice passes are reported through the [`log`] facade at `debug` and `trace` level, and image
//! load failures at `warn` level. No logger is installed.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod builder;
mod click;
mod error;
mod ext;
mod highlight;
mod locate;
mod margin;
mod metrics;
mod render;
mod replace;
mod resolve;
mod rule;
mod splice;
mod style;
mod watcher;

pub mod image;

#[cfg(test)]
mod tests;

pub use attributed_text::{self, AttributedText};
pub use peniko;

pub use crate::builder::SpanBuilder;
pub use crate::click::ClickDispatcher;
pub use crate::error::Error;
pub use crate::ext::{concat, image_placeholder, SpanExt, IMAGE_PLACEHOLDER};
pub use crate::highlight::{ClickHandler, Highlight};
pub use crate::image::{Align, InlineImage, RemoteImage};
pub use crate::locate::{locate, MatchOccurrence, Occurrences, Pattern, Scope};
pub use crate::margin::Margin;
pub use crate::metrics::{DisplayMetrics, DrawableSize, FontMetrics, PixelInsets, PixelRect};
pub use crate::render::{
    Blur, Canvas, Drawable, LineBox, ReplacementSpan, TextMeasure, TextPaint, TextStyle, Typeface,
};
pub use crate::replace::{replace_span_with, ReplaceExt};
pub use crate::resolve::{substitute_groups, ReplacementOutcome, ReplacementPolicy, Resolver};
pub use crate::rule::{set_or_replace_span, ReplaceRule};
pub use crate::splice::{apply, set_style, set_styles};
pub use crate::style::{parse_color, Style, StyleTag, TextAppearance};
pub use crate::watcher::{Editable, ModifyTextWatcher, TextWatcher};

/// Text carrying [`Style`]s.
pub type StyledText = AttributedText<Style>;
