//! Notifies the editor when the undo manager changes state.

use crate::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// The parts of the manager state an editor shows in its menus.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct State {
    pub can_undo: bool,
    pub can_redo: bool,
    pub saved: bool,
}

/// Remembers the last state seen by the slot and only reports differences.
///
/// The state is tracked while no slot is connected too, so connecting a
/// slot later does not replay old changes.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S> {
    slot: Option<S>,
    state: State,
}

impl<S> Socket<S> {
    pub fn new(slot: Option<S>, state: State) -> Socket<S> {
        Socket { slot, state }
    }

    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.slot.replace(slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.slot.take()
    }
}

impl<S: Slot> Socket<S> {
    /// Emits a signal for every field of `state` that changed.
    pub fn sync(&mut self, state: State) {
        let old = std::mem::replace(&mut self.state, state);
        let Some(slot) = &mut self.slot else {
            return;
        };
        if old.can_undo != state.can_undo {
            slot.on_emit(Signal::Undo(state.can_undo));
        }
        if old.can_redo != state.can_redo {
            slot.on_emit(Signal::Redo(state.can_redo));
        }
        if old.saved != state.saved {
            slot.on_emit(Signal::Saved(state.saved));
        }
    }

    pub fn discarded(&mut self, err: Error) {
        if let Some(slot) = &mut self.slot {
            slot.on_emit(Signal::Discarded(err));
        }
    }
}

/// A state change of the undo manager.
///
/// See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Emitted when the ability to undo has changed.
    Undo(bool),
    /// Emitted when the ability to redo has changed.
    Redo(bool),
    /// Emitted when the scenario enters or leaves its saved state.
    Saved(bool),
    /// Emitted when a record is dropped from the history because it could
    /// not be undone or redone.
    Discarded(Error),
}

/// Receives the signals of an undo manager.
///
/// Signals are only emitted when something actually changed, so the editor
/// can use them to enable and disable its undo and redo buttons, or to mark
/// the scenario as modified.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use scenario_undo::{Map, Marker, Scene, Signal, UndoManager, UndoRecord};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut scene = Scene::new();
/// let mut manager: UndoManager<UndoRecord<Scene<Marker>>, _> =
///     UndoManager::builder().connect(sender).build();
///
/// let a = scene.insert(Marker::new("a"));
/// manager.record(UndoRecord::add_element(a));
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(false)));
/// assert_eq!(iter.next(), None);
///
/// manager.undo(&mut scene);
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(true)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes the state change done to the undo manager.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

/// Signals are dropped once the receiver hangs up.
impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

/// Collects the signals, which is handy when batching UI updates.
impl Slot for Vec<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.push(signal);
    }
}

#[cfg(test)]
mod tests {
    use super::{Signal, Socket, State};
    use crate::{ElementId, Error};

    #[test]
    fn sync_reports_changes_only() {
        let mut socket = Socket::<Vec<Signal>>::new(Some(Vec::new()), State::default());
        socket.sync(State::default());
        socket.sync(State {
            can_undo: true,
            saved: true,
            ..State::default()
        });
        socket.sync(State {
            can_undo: true,
            can_redo: true,
            saved: true,
        });
        let err = Error::StaleReference(ElementId::new(0, 1));
        socket.discarded(err);
        assert_eq!(
            socket.disconnect().unwrap(),
            [
                Signal::Undo(true),
                Signal::Saved(true),
                Signal::Redo(true),
                Signal::Discarded(err),
            ]
        );
    }

    #[test]
    fn state_is_tracked_while_disconnected() {
        let mut socket = Socket::<Vec<Signal>>::new(None, State::default());
        socket.sync(State {
            can_undo: true,
            ..State::default()
        });
        socket.connect(Vec::new());
        socket.sync(State {
            can_undo: true,
            ..State::default()
        });
        assert!(socket.disconnect().unwrap().is_empty());
    }
}
