//! The public entry point for recording and replaying edits.

mod builder;
mod checkpoint;
mod display;

pub use builder::Builder;
pub use checkpoint::Checkpoint;
pub use display::Display;

use crate::socket::{Slot, Socket, State};
use crate::{Entry, History, Result, Reversible};

/// Linear undo-redo history of the edits made to a target.
///
/// The editor performs an edit and then hands the matching record to
/// [`record`](UndoManager::record). Recording discards everything that
/// could be redone. [`undo`](UndoManager::undo) and
/// [`redo`](UndoManager::redo) move records between the two stacks of
/// the [`History`], reversing or re-applying them on the target.
///
/// A record that fails to undo or redo is disposed and dropped, so the
/// history never keeps a record whose target state is gone.
///
/// # Examples
/// ```
/// # use scenario_undo::{Map, Marker, Scene, UndoManager, UndoRecord};
/// let mut scene = Scene::new();
/// let mut manager = UndoManager::new();
///
/// let a = scene.insert(Marker::new("a"));
/// manager.record(UndoRecord::add_element(a));
/// let b = scene.insert(Marker::new("b"));
/// manager.record(UndoRecord::add_element(b));
///
/// manager.undo(&mut scene).unwrap().unwrap();
/// assert!(scene.contains(a));
/// assert!(!scene.contains(b));
/// assert!(manager.can_redo());
///
/// manager.redo(&mut scene).unwrap().unwrap();
/// assert!(scene.contains(b));
/// assert!(!manager.can_redo());
/// ```
#[derive(Debug)]
pub struct UndoManager<A: Reversible, S = ()> {
    pub(crate) history: History<A>,
    pub(crate) saved: Option<usize>,
    pub(crate) socket: Socket<S>,
}

impl<A: Reversible> UndoManager<A> {
    /// Returns a new undo manager.
    pub fn new() -> UndoManager<A> {
        UndoManager::builder().build()
    }
}

impl<A: Reversible, S> UndoManager<A, S> {
    /// Returns a new undo manager builder.
    pub fn builder() -> Builder<A, S> {
        Builder::default()
    }

    /// Returns the number of records in the history.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the number of records that can be undone.
    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    /// Returns the number of records that can be redone.
    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Returns the limit of the history.
    pub fn limit(&self) -> usize {
        self.history.limit()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(slot)
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns `true` if the manager can undo.
    pub fn can_undo(&self) -> bool {
        self.undo_len() > 0
    }

    /// Returns `true` if the manager can redo.
    pub fn can_redo(&self) -> bool {
        self.redo_len() > 0
    }

    /// Returns `true` if the target is in a saved state, `false` otherwise.
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.undo_len())
    }

    /// Returns a reference to the history.
    pub fn history(&self) -> &History<A> {
        &self.history
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<A, S> {
        Checkpoint::from(self)
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<A, S> {
        Display::from(self)
    }

    fn state(&self) -> State {
        State {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            saved: self.is_saved(),
        }
    }
}

impl<A: Reversible, S: Slot> UndoManager<A, S> {
    /// Pushes a record for an edit that has already been applied to the target.
    ///
    /// Every record that could be redone is disposed first. If the limit is
    /// reached, the oldest record is disposed to make room.
    pub fn record(&mut self, record: A) {
        let current = self.undo_len();
        let invalidated = self.history.dispose_redo();
        if invalidated > 0 {
            log::debug!("discarded {invalidated} redo records");
        }
        // The saved state may have been one of the discarded records.
        self.saved = self.saved.filter(|&saved| saved <= current);
        self.push(Entry::from(record));
        log::debug!("recorded edit {}", self.undo_len());
        self.emit();
    }

    /// Calls the [`undo`] method for the most recent record and moves it
    /// to the redo stack.
    ///
    /// Returns `None` if there is nothing to undo.
    ///
    /// # Errors
    /// If the record can not be undone, it is disposed and dropped from the
    /// history and the error is returned. The remaining records are kept.
    ///
    /// [`undo`]: Reversible::undo
    pub fn undo(&mut self, target: &mut A::Target) -> Option<Result> {
        let result = self.undo_step(target)?;
        self.emit();
        Some(result)
    }

    /// Calls the [`redo`] method for the most recently undone record and
    /// moves it back to the undo stack.
    ///
    /// Returns `None` if there is nothing to redo.
    ///
    /// # Errors
    /// If the record can not be redone, it is disposed and dropped from the
    /// history and the error is returned. The remaining records are kept.
    ///
    /// [`redo`]: Reversible::redo
    pub fn redo(&mut self, target: &mut A::Target) -> Option<Result> {
        let result = self.redo_step(target)?;
        self.emit();
        Some(result)
    }

    /// Marks the target as currently being in a saved or unsaved state.
    pub fn set_saved(&mut self, saved: bool) {
        self.saved = saved.then(|| self.undo_len());
        self.emit();
    }

    /// Disposes every record in the history without undoing them.
    pub fn clear(&mut self) {
        let was_saved = self.is_saved();
        let n = self.len();
        self.history.clear();
        self.saved = was_saved.then_some(0);
        log::debug!("cleared {n} records");
        self.emit();
    }

    /// Revert the changes done to the target since the saved state.
    pub fn revert(&mut self, target: &mut A::Target) -> Option<Result> {
        self.saved.and_then(|saved| self.go_to(target, saved))
    }

    /// Repeatedly undoes or redoes until `index` records are on the undo stack.
    ///
    /// Signals are emitted once, for the state reached at the end.
    /// Returns `None` if `index` is past the end of the history.
    ///
    /// # Errors
    /// If an error occurs when calling [`undo`] or [`redo`] the error is
    /// returned and the remaining steps are not taken.
    ///
    /// [`undo`]: UndoManager::undo
    /// [`redo`]: UndoManager::redo
    pub fn go_to(&mut self, target: &mut A::Target, index: usize) -> Option<Result> {
        if index > self.len() {
            return None;
        }
        let step = if index > self.undo_len() {
            Self::redo_step
        } else {
            Self::undo_step
        };
        let mut result = Ok(());
        while self.undo_len() != index {
            match step(self, target) {
                Some(Ok(())) => (),
                Some(Err(err)) => {
                    result = Err(err);
                    break;
                }
                None => break,
            }
        }
        self.emit();
        Some(result)
    }

    fn undo_step(&mut self, target: &mut A::Target) -> Option<Result> {
        let old = self.undo_len();
        let mut entry = self.history.pop_undo()?;
        let result = entry.undo(target);
        match result {
            Ok(()) => {
                log::debug!("undid edit {old}");
                self.history.push_redo(entry);
            }
            Err(err) => {
                log::warn!("discarding edit {old} that could not be undone: {err}");
                entry.dispose();
                // The edit stays applied, so every state before it is gone.
                let current = self.undo_len();
                self.saved = self
                    .saved
                    .and_then(|saved| saved.checked_sub(1))
                    .filter(|&saved| saved >= current);
                self.socket.discarded(err);
            }
        }
        Some(result)
    }

    fn redo_step(&mut self, target: &mut A::Target) -> Option<Result> {
        let old = self.undo_len();
        let mut entry = self.history.pop_redo()?;
        let result = entry.redo(target);
        match result {
            Ok(()) => {
                log::debug!("redid edit {}", old + 1);
                self.push(entry);
            }
            Err(err) => {
                log::warn!("discarding edit {} that could not be redone: {err}", old + 1);
                entry.dispose();
                // Every state after the dropped edit is gone.
                self.saved = self.saved.filter(|&saved| saved <= old);
                self.socket.discarded(err);
            }
        }
        Some(result)
    }

    fn push(&mut self, entry: Entry<A>) {
        if self.history.push(entry) {
            self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
        }
    }

    /// Undoes the most recent record and disposes it instead of keeping it for redo.
    ///
    /// Does not emit, the caller is expected to call [`emit`](UndoManager::emit).
    pub(crate) fn discard(&mut self, target: &mut A::Target) -> Option<Result> {
        let result = self.undo_step(target)?;
        if result.is_ok() {
            if let Some(entry) = self.history.pop_redo() {
                entry.dispose();
            }
        }
        Some(result)
    }

    pub(crate) fn emit(&mut self) {
        let state = self.state();
        self.socket.sync(state);
    }
}

impl<A: Reversible + ToString, S> UndoManager<A, S> {
    /// Returns the string of the record which will be undone
    /// in the next call to [`undo`](UndoManager::undo).
    pub fn undo_text(&self) -> Option<String> {
        self.history.peek_undo().map(|e| e.get().to_string())
    }

    /// Returns the string of the record which will be redone
    /// in the next call to [`redo`](UndoManager::redo).
    pub fn redo_text(&self) -> Option<String> {
        self.history.peek_redo().map(|e| e.get().to_string())
    }
}

impl<A: Reversible> Default for UndoManager<A> {
    fn default() -> UndoManager<A> {
        UndoManager::new()
    }
}
