//! The undo and redo stacks.

use crate::{Entry, Reversible};
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// The pair of stacks records move between.
///
/// The back of the undo stack and the top of the redo stack are the
/// records closest to the current state of the target. A record is held
/// by at most one of the stacks at a time. Records still held when the
/// history is dropped are disposed.
#[derive(Debug)]
pub struct History<A: Reversible> {
    undo: VecDeque<Entry<A>>,
    redo: Vec<Entry<A>>,
    limit: NonZeroUsize,
}

impl<A: Reversible> History<A> {
    /// Returns an empty history that keeps at most `limit` undo records.
    pub fn new(limit: NonZeroUsize) -> History<A> {
        History::with_capacity(limit, 0)
    }

    /// Returns an empty history with room for `capacity` undo records.
    pub fn with_capacity(limit: NonZeroUsize, capacity: usize) -> History<A> {
        History {
            undo: VecDeque::with_capacity(capacity),
            redo: Vec::new(),
            limit,
        }
    }

    /// Returns the limit of the undo stack.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Returns the number of records that can be undone.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Returns the number of records that can be redone.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Returns the number of records in both stacks.
    pub fn len(&self) -> usize {
        self.undo.len() + self.redo.len()
    }

    /// Returns `true` if both stacks are empty.
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty() && self.redo.is_empty()
    }

    /// Returns the record that would be undone next.
    pub fn peek_undo(&self) -> Option<&Entry<A>> {
        self.undo.back()
    }

    /// Returns the record that would be redone next.
    pub fn peek_redo(&self) -> Option<&Entry<A>> {
        self.redo.last()
    }

    /// Returns the records in the order they were made.
    ///
    /// The first [`undo_len`](History::undo_len) entries are on the undo
    /// stack, the rest on the redo stack.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Entry<A>> {
        self.undo.iter().chain(self.redo.iter().rev())
    }

    /// Pushes the entry on the undo stack.
    ///
    /// If the limit is reached the oldest entry is disposed and `true` is returned.
    pub fn push(&mut self, entry: Entry<A>) -> bool {
        let evicted = if self.undo.len() == self.limit() {
            self.undo.pop_front().map(Reversible::dispose).is_some()
        } else {
            false
        };
        if evicted {
            log::debug!("evicted oldest record, limit is {}", self.limit);
        }
        self.undo.push_back(entry);
        evicted
    }

    /// Pops the most recent entry off the undo stack.
    pub fn pop_undo(&mut self) -> Option<Entry<A>> {
        self.undo.pop_back()
    }

    /// Pushes the entry on the redo stack.
    pub fn push_redo(&mut self, entry: Entry<A>) {
        self.redo.push(entry);
    }

    /// Pops the most recently undone entry off the redo stack.
    pub fn pop_redo(&mut self) -> Option<Entry<A>> {
        self.redo.pop()
    }

    /// Disposes every entry on the redo stack, most recently undone first.
    ///
    /// Returns the number of disposed entries.
    pub fn dispose_redo(&mut self) -> usize {
        let n = self.redo.len();
        while let Some(entry) = self.redo.pop() {
            entry.dispose();
        }
        n
    }

    /// Disposes every entry in both stacks, newest first.
    pub fn clear(&mut self) {
        self.dispose_redo();
        while let Some(entry) = self.undo.pop_back() {
            entry.dispose();
        }
    }
}

impl<A: Reversible> Drop for History<A> {
    fn drop(&mut self) {
        self.clear();
    }
}
