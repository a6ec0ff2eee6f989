// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use peniko::Color;

use crate::{
    locate, Pattern, ReplaceExt, ReplacementOutcome, ReplacementPolicy, Scope, SpanExt, Style,
    StyledText, TextStyle,
};

fn spans(text: &StyledText) -> Vec<(Range<usize>, Style)> {
    text.attributes_iter()
        .map(|(range, style)| (range.clone(), style.clone()))
        .collect()
}

fn styled_sample() -> StyledText {
    let mut text = StyledText::new("隐私权政策 | 许可 | 品牌指南");
    text.apply_attribute(0..15, Style::Underline).unwrap();
    text.apply_attribute(27..39, Style::Color(Color::WHITE))
        .unwrap();
    text
}

#[test]
fn absent_pattern_leaves_text_and_styles_alone() {
    let before = styled_sample();
    let mut calls = 0;
    let after = before
        .clone()
        .replace_span(&Pattern::literal("not there").unwrap(), |_| {
            calls += 1;
            ReplacementOutcome::PlainText(String::from("x"))
        })
        .unwrap();
    assert_eq!(calls, 0);
    assert_eq!(after, before);
}

#[test]
fn group_substitution_rewrites_only_the_match() {
    let text = styled_sample()
        .replace_span_with(
            &Pattern::regex(r"\| (.*) \|").unwrap(),
            ReplacementPolicy::all().with_group_substitution(true),
            |_| "# $1 #".into(),
        )
        .unwrap();
    assert_eq!(text.as_str(), "隐私权政策 # 许可 # 品牌指南");
    // Both styles sit outside the replaced range and survive; the match kept its length.
    assert_eq!(
        spans(&text),
        [
            (0..15, Style::Underline),
            (27..39, Style::Color(Color::WHITE))
        ]
    );
}

#[test]
fn first_scope_replaces_only_the_first_occurrence() {
    let source = "隐私权政策 | 隐私权政策 | 品牌指南";
    let pattern = Pattern::literal("隐私权政策").unwrap();
    let first = StyledText::new(source)
        .replace_span_first(&pattern, |_| "Privacy".into())
        .unwrap();
    assert_eq!(first.as_str(), "Privacy | 隐私权政策 | 品牌指南");
    let all = StyledText::new(source)
        .replace_span(&pattern, |_| "Privacy".into())
        .unwrap();
    assert_eq!(all.as_str(), "Privacy | Privacy | 品牌指南");
}

#[test]
fn match_cap_invokes_callback_once() {
    let mut calls = 0;
    let text = StyledText::new("a a a")
        .replace_span_with(
            &Pattern::literal("a").unwrap(),
            ReplacementPolicy::all().with_max_matches(1),
            |_| {
                calls += 1;
                "b".into()
            },
        )
        .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(text.as_str(), "b a a");
}

#[test]
fn none_styles_are_skipped() {
    let text = StyledText::new("tag")
        .replace_span(&Pattern::literal("tag").unwrap(), |_| {
            ReplacementOutcome::Styles(alloc::vec![
                Some(Style::Underline),
                None,
                Some(Style::Strikethrough),
            ])
        })
        .unwrap();
    assert_eq!(
        spans(&text),
        [(0..3, Style::Underline), (0..3, Style::Strikethrough)]
    );
}

#[test]
fn set_twice_keeps_one_style_and_second_wins() {
    let text = StyledText::new("hello")
        .span_style(TextStyle::Bold, None)
        .unwrap()
        .span_style(TextStyle::Italic, None)
        .unwrap();
    assert_eq!(spans(&text), [(0..5, Style::TextStyle(TextStyle::Italic))]);
}

#[test]
fn following_text_lands_at_cumulative_offset() {
    let source = "x-yy-zzz-w";
    let replacements = ["1234", "", "56"];
    let pattern = Pattern::regex("[a-z]+").unwrap();
    let occurrences: Vec<_> = locate(source, &pattern, Scope::All).collect();
    let mut index = 0;
    let text = StyledText::new(source)
        .replace_span_with(&pattern, ReplacementPolicy::all().with_max_matches(3), |_| {
            let replacement = replacements[index];
            index += 1;
            replacement.into()
        })
        .unwrap();
    assert_eq!(text.as_str(), "1234--56-w");

    let mut delta: isize = 0;
    for (occurrence, replacement) in occurrences.iter().zip(replacements) {
        delta += replacement.len() as isize - occurrence.len() as isize;
        let following = occurrence.end().checked_add_signed(delta).unwrap();
        assert_eq!(&text.as_str()[following..following + 1], "-");
    }
}

#[test]
fn styles_follow_earlier_replacements() {
    let text = StyledText::new("[a] b [c] d")
        .replace_span(&Pattern::regex(r"\[(\w)\]").unwrap(), |m| {
            ReplacementOutcome::PlainText(m.group(1).unwrap_or_default().into())
        })
        .unwrap()
        .span_underline(Some(&crate::ReplaceRule::new("d")))
        .unwrap();
    assert_eq!(text.as_str(), "a b c d");
    assert_eq!(spans(&text), [(6..7, Style::Underline)]);
}
