//! Undo-redo engine for scenario editors.
//!
//! The editor applies an edit to the scenario map and then records a
//! matching [`UndoRecord`] with the [`UndoManager`]. Undo and redo move the
//! record between the two stacks of the [`History`] and reverse or re-apply
//! it on the map. Ownership of elements is explicit: a live element is owned
//! by the [`Map`], and an element taken off the map is owned by exactly one
//! record until the record puts it back or is disposed.
//!
//! # Features
//!
//! * [`UndoRecord`] covers adding, removing and changing elements and
//!   batches of those edits.
//! * [`UndoManager`] provides linear undo-redo with a configurable limit.
//!   Records evicted by the limit, invalidated by a new edit, or cleared
//!   are disposed exactly once.
//! * A record whose element has been removed behind the history's back is
//!   reported as [`Error::StaleReference`] and dropped instead of panicking.
//! * [`Scene`] is a generational arena implementing [`Map`], so a stale
//!   handle is detected with a generation check.
//! * The target can be marked as saved and the manager tracks and signals
//!   when it leaves or returns to the saved state.
//! * Configurable display formatting of the history. Colored output with the
//!   `colored` feature, time stamps with the `chrono` feature.
//!
//! # Examples
//!
//! ```
//! use scenario_undo::{Map, Marker, Scene, UndoManager, UndoRecord};
//!
//! let mut scene = Scene::new();
//! let mut manager = UndoManager::new();
//!
//! let a = scene.insert(Marker::new("a"));
//! manager.record(UndoRecord::add_element(a));
//! let b = scene.insert(Marker::new("b"));
//! manager.record(UndoRecord::add_element(b));
//! let marker = scene.remove(a).unwrap();
//! manager.record(UndoRecord::remove_element(a, marker));
//! assert_eq!(scene.len(), 1);
//!
//! manager.undo(&mut scene).unwrap().unwrap();
//! manager.undo(&mut scene).unwrap().unwrap();
//! manager.undo(&mut scene).unwrap().unwrap();
//! assert!(scene.is_empty());
//! assert!(manager.undo(&mut scene).is_none());
//!
//! manager.redo(&mut scene).unwrap().unwrap();
//! manager.redo(&mut scene).unwrap().unwrap();
//! assert_eq!(scene.len(), 2);
//! ```

#![deny(missing_docs)]

mod doctest;
mod element;
mod entry;
mod error;
mod format;
mod history;
mod manager;
mod record;
mod scene;
mod socket;

#[doc(hidden)]
pub use doctest::Marker;
pub use element::{Element, ElementId, Map};
pub use entry::Entry;
pub use error::{Error, Result};
pub use history::History;
pub use manager::{Builder, Checkpoint, Display, UndoManager};
pub use record::{Placement, UndoRecord};
pub use scene::Scene;
pub use socket::{Signal, Slot};

/// Base functionality for all records.
///
/// A record is created after its edit has been applied to the target and
/// knows how to revert and re-apply that edit.
pub trait Reversible {
    /// The target type used.
    type Target;

    /// Restores the state of the target as it was before the edit was applied.
    ///
    /// # Errors
    /// Returns an error if the state the record refers to is no longer in
    /// the target. The target must be left as it was before the call.
    fn undo(&mut self, target: &mut Self::Target) -> Result;

    /// Reapplies the edit on the target.
    ///
    /// # Errors
    /// Returns an error if the state the record refers to is no longer in
    /// the target. The target must be left as it was before the call.
    fn redo(&mut self, target: &mut Self::Target) -> Result;

    /// Releases what the record still owns.
    ///
    /// Called once when the record leaves the history without being
    /// undone or redone again. The default implementation does nothing.
    fn dispose(self)
    where
        Self: Sized,
    {
    }
}
