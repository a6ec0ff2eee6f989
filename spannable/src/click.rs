// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use attributed_text::AttributedText;

use crate::style::StyleTag;

/// Routes clicks at text offsets to clickable styles.
///
/// The host's hit testing maps a pointer position to a byte offset; the dispatcher finds the
/// clickable style covering that offset and runs it. When styles overlap, the most recently
/// applied one wins.
///
/// Links ([`Style::Url`](crate::Style::Url)) count as clickable but do not handle clicks
/// themselves: [`ClickDispatcher::click_at`] returns `false` for them, and the host opens the
/// link it gets from [`ClickDispatcher::clickable_at`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickDispatcher {
    background: bool,
}

impl ClickDispatcher {
    /// A dispatcher for text that does not scroll or select on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher that also lets the host show a pressed background over the clicked range.
    pub fn with_background() -> Self {
        Self { background: true }
    }

    /// Returns `true` if pressed ranges should be highlighted.
    pub fn shows_background(&self) -> bool {
        self.background
    }

    /// The clickable style covering `offset` and the range it covers.
    pub fn clickable_at<'a, S: StyleTag>(
        &self,
        text: &'a AttributedText<S>,
        offset: usize,
    ) -> Option<(Range<usize>, &'a S)> {
        text.attributes_iter()
            .filter(|(range, style)| range.contains(&offset) && style.is_clickable())
            .last()
            .map(|(range, style)| (range.clone(), style))
    }

    /// The range to draw a pressed background over, when enabled.
    pub fn pressed_range<S: StyleTag>(
        &self,
        text: &AttributedText<S>,
        offset: usize,
    ) -> Option<Range<usize>> {
        if !self.background {
            return None;
        }
        self.clickable_at(text, offset).map(|(range, _)| range)
    }

    /// Clicks the style covering `offset`. Returns `true` if a style handled the click.
    pub fn click_at<S: StyleTag>(&self, text: &AttributedText<S>, offset: usize) -> bool {
        let Some((range, style)) = self.clickable_at(text, offset) else {
            return false;
        };
        log::trace!("click at {offset} hits {range:?}");
        text.as_str()
            .get(range)
            .is_some_and(|covered| style.click(covered))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use attributed_text::AttributedText;
    use peniko::Color;

    use super::ClickDispatcher;
    use crate::highlight::Highlight;
    use crate::style::Style;

    fn clickable(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Style {
        let log = Arc::clone(log);
        Style::Highlight(
            Highlight::new(Color::BLACK)
                .on_click(move |text| log.lock().unwrap().push(format!("{tag}:{text}"))),
        )
    }

    #[test]
    fn clicks_covering_style() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut text = AttributedText::new("Read the terms and the privacy policy");
        text.apply_attribute(9..14, clickable(&log, "terms"))
            .unwrap();
        text.apply_attribute(23..37, clickable(&log, "privacy"))
            .unwrap();
        text.apply_attribute(0..4, Style::Color(Color::WHITE))
            .unwrap();

        let dispatcher = ClickDispatcher::new();
        assert!(dispatcher.click_at(&text, 10));
        assert!(dispatcher.click_at(&text, 30));
        assert!(!dispatcher.click_at(&text, 2));
        assert!(!dispatcher.click_at(&text, 14));
        assert_eq!(
            *log.lock().unwrap(),
            ["terms:terms", "privacy:privacy policy"]
        );
    }

    #[test]
    fn latest_overlapping_style_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut text = AttributedText::new("overlap");
        text.apply_attribute(0..7, clickable(&log, "outer"))
            .unwrap();
        text.apply_attribute(2..4, clickable(&log, "inner"))
            .unwrap();
        assert!(ClickDispatcher::new().click_at(&text, 3));
        assert_eq!(*log.lock().unwrap(), ["inner:er"]);
    }

    #[test]
    fn links_are_left_to_the_host() {
        let url = || Style::Url("https://example.com/terms".into());
        let mut text = AttributedText::new("see terms");
        text.apply_attribute(4..9, url()).unwrap();
        let dispatcher = ClickDispatcher::new();
        assert!(!dispatcher.click_at(&text, 6));
        let (range, style) = dispatcher.clickable_at(&text, 6).unwrap();
        assert_eq!((range, style), (4..9, &url()));
    }

    #[test]
    fn pressed_range_only_with_background() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut text = AttributedText::new("tap here");
        text.apply_attribute(4..8, clickable(&log, "here")).unwrap();
        assert_eq!(ClickDispatcher::new().pressed_range(&text, 5), None);
        assert_eq!(
            ClickDispatcher::with_background().pressed_range(&text, 5),
            Some(4..8)
        );
        assert!(log.lock().unwrap().is_empty());
    }
}
