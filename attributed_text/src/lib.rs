// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed Text is a mutable text buffer with attributes applied to byte ranges.
//!
//! Attributes are opaque to this crate. Edits (replace, insert, remove, append) keep the
//! attribute ranges in step with the text, and ranges are validated on every entry point: a
//! range that is reversed, out of bounds, or splits a UTF-8 character is reported as an
//! [`Error`] rather than clamped.
//!
//! ```
//! use attributed_text::AttributedText;
//!
//! let mut text = AttributedText::new("Hello world");
//! text.apply_attribute(6..11, "bold").unwrap();
//! text.replace_range(0..5, "Goodbye").unwrap();
//!
//! assert_eq!(text.as_str(), "Goodbye world");
//! let (range, attr) = text.attributes_iter().next().unwrap();
//! assert_eq!((range.clone(), *attr), (8..13, "bold"));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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
#![no_std]

extern crate alloc;

mod attributed_text;
mod error;
mod text_range;

pub use crate::attributed_text::AttributedText;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind};
pub use crate::text_range::TextRange;
