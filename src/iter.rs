//! Lazy iteration over user-visible entries.

use crate::view::SessionView;
use sessionview_core::Value;
use sessionview_storage::Position;
use std::iter::FusedIterator;

/// Iterator over the user-visible `(key, value)` pairs of a [`SessionView`].
///
/// Created by [`SessionView::iter`]. Each step takes the store's read lock
/// briefly and resumes after the last yielded entry, so the store is never
/// locked between steps.
///
/// The scan covers the entries present when the iterator was created. Keys
/// removed mid-scan are skipped; keys written after creation (including a
/// key removed and set again) are not yielded, so the iterator always ends.
#[derive(Debug)]
pub struct Iter<'a> {
    view: &'a SessionView,
    cursor: Option<Position>,
    end: Position,
    done: bool,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(view: &'a SessionView) -> Self {
        Self {
            view,
            cursor: None,
            end: view.store.read(|data| data.end()),
            done: false,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let view = self.view;
        let (cursor, end) = (self.cursor, self.end);
        let next = view.store.read(|data| {
            data.next_after(cursor, end, |key| !view.is_internal_key(key))
                .map(|(pos, key, value)| (pos, key.to_string(), value.clone()))
        });
        match next {
            Some((pos, key, value)) => {
                self.cursor = Some(pos);
                Some((key, value))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for Iter<'_> {}
