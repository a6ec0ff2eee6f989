// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observing edits to styled text.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::ops::Range;

use attributed_text::{AttributedText, Error};

/// Receives notifications about edits made through an [`Editable`].
///
/// `start` is the byte offset of the edit, `removed` and `inserted` the byte lengths of the old
/// and new text.
pub trait TextWatcher<S> {
    /// Called before the text changes.
    fn before_text_changed(
        &self,
        text: &AttributedText<S>,
        start: usize,
        removed: usize,
        inserted: usize,
    ) {
        let _ = (text, start, removed, inserted);
    }

    /// Called right after the text changed.
    fn on_text_changed(
        &self,
        text: &AttributedText<S>,
        start: usize,
        removed: usize,
        inserted: usize,
    ) {
        let _ = (text, start, removed, inserted);
    }

    /// Called once the change is complete. Edits made here notify watchers again.
    fn after_text_changed(&self, editable: &mut Editable<S>) {
        let _ = editable;
    }
}

/// Styled text that notifies [`TextWatcher`]s about edits.
pub struct Editable<S> {
    text: AttributedText<S>,
    watchers: Vec<Rc<dyn TextWatcher<S>>>,
}

impl<S: fmt::Debug> fmt::Debug for Editable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editable")
            .field("text", &self.text)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

impl<S> Editable<S> {
    /// Wraps `text`.
    pub fn new(text: AttributedText<S>) -> Self {
        Self {
            text,
            watchers: Vec::new(),
        }
    }

    /// Registers a watcher.
    pub fn add_watcher(&mut self, watcher: Rc<dyn TextWatcher<S>>) {
        self.watchers.push(watcher);
    }

    /// Unregisters a watcher previously added. Returns `false` if it was not registered.
    pub fn remove_watcher(&mut self, watcher: &Rc<dyn TextWatcher<S>>) -> bool {
        let before = self.watchers.len();
        self.watchers.retain(|w| !Rc::ptr_eq(w, watcher));
        before != self.watchers.len()
    }

    /// The current text.
    pub fn text(&self) -> &AttributedText<S> {
        &self.text
    }

    /// Mutable access to the text. Edits made this way are not reported.
    pub fn text_mut(&mut self) -> &mut AttributedText<S> {
        &mut self.text
    }

    /// Unwraps the text.
    pub fn into_inner(self) -> AttributedText<S> {
        self.text
    }

    /// Replaces `range` with `replacement`, notifying watchers.
    pub fn replace(&mut self, range: Range<usize>, replacement: &str) -> Result<(), Error> {
        let range = self.text.range(range)?.as_range();
        let watchers = self.watchers.clone();
        for watcher in &watchers {
            watcher.before_text_changed(&self.text, range.start, range.len(), replacement.len());
        }
        self.text.replace_range(range.clone(), replacement)?;
        for watcher in &watchers {
            watcher.on_text_changed(&self.text, range.start, range.len(), replacement.len());
        }
        for watcher in &watchers {
            watcher.after_text_changed(self);
        }
        Ok(())
    }

    /// Inserts `text` at `index`, notifying watchers.
    pub fn insert(&mut self, index: usize, text: &str) -> Result<(), Error> {
        self.replace(index..index, text)
    }

    /// Removes `range`, notifying watchers.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), Error> {
        self.replace(range, "")
    }
}

/// A watcher that rewrites the text after every change.
///
/// The hook runs from [`TextWatcher::after_text_changed`]. Edits the hook makes through the
/// [`Editable`] do not run the hook again.
pub struct ModifyTextWatcher<F> {
    hook: RefCell<F>,
    modifying: Cell<bool>,
}

impl<F> fmt::Debug for ModifyTextWatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifyTextWatcher")
            .field("modifying", &self.modifying.get())
            .finish_non_exhaustive()
    }
}

impl<F> ModifyTextWatcher<F> {
    /// A watcher running `hook` after each change.
    pub fn new(hook: F) -> Self {
        Self {
            hook: RefCell::new(hook),
            modifying: Cell::new(false),
        }
    }
}

impl<S, F> TextWatcher<S> for ModifyTextWatcher<F>
where
    F: FnMut(&mut Editable<S>),
{
    fn after_text_changed(&self, editable: &mut Editable<S>) {
        if self.modifying.replace(true) {
            return;
        }
        (self.hook.borrow_mut())(editable);
        self.modifying.set(false);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use attributed_text::AttributedText;

    use super::{Editable, ModifyTextWatcher, TextWatcher};

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl TextWatcher<()> for Recorder {
        fn before_text_changed(
            &self,
            text: &AttributedText<()>,
            start: usize,
            removed: usize,
            inserted: usize,
        ) {
            let text = text.as_str();
            self.events
                .borrow_mut()
                .push(format!("before {text} {start} {removed} {inserted}"));
        }

        fn on_text_changed(
            &self,
            text: &AttributedText<()>,
            start: usize,
            removed: usize,
            inserted: usize,
        ) {
            let text = text.as_str();
            self.events
                .borrow_mut()
                .push(format!("on {text} {start} {removed} {inserted}"));
        }
    }

    #[test]
    fn notifies_in_order() {
        let recorder = Rc::new(Recorder::default());
        let mut editable = Editable::new(AttributedText::<()>::new("hello"));
        editable.add_watcher(recorder.clone());
        editable.replace(0..1, "J").unwrap();
        editable.insert(5, "!").unwrap();
        assert_eq!(
            *recorder.events.borrow(),
            [
                "before hello 0 1 1",
                "on Jello 0 1 1",
                "before Jello 5 0 1",
                "on Jello! 5 0 1",
            ]
        );
        assert!(editable.replace(2..9, "x").is_err());
    }

    #[test]
    fn modify_hook_does_not_recurse() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        // Upper-cases the text after every edit.
        let watcher = ModifyTextWatcher::new(move |editable: &mut Editable<()>| {
            *counter.borrow_mut() += 1;
            let upper = editable.text().as_str().to_uppercase();
            let len = editable.text().len();
            editable.replace(0..len, &upper).unwrap();
        });
        let mut editable = Editable::new(AttributedText::<()>::new("abc"));
        editable.add_watcher(Rc::new(watcher));
        editable.insert(3, "d").unwrap();
        assert_eq!(editable.text().as_str(), "ABCD");
        assert_eq!(*calls.borrow(), 1);
        editable.delete(0..1).unwrap();
        assert_eq!(editable.into_inner().as_str(), "BCD");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn remove_watcher() {
        let watcher: Rc<dyn TextWatcher<()>> = Rc::new(Recorder::default());
        let mut editable = Editable::new(AttributedText::<()>::new(""));
        editable.add_watcher(Rc::clone(&watcher));
        assert!(editable.remove_watcher(&watcher));
        assert!(!editable.remove_watcher(&watcher));
    }
}
