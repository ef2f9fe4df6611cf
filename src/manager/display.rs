use crate::format::{Format, Row};
use crate::{Entry, Reversible, UndoManager};
use std::fmt;

/// Configurable display formatting for the [`UndoManager`].
///
/// Lists the records newest first, down to `0` for the state before the
/// first record. The record at the top of the undo stack is labelled
/// `HEAD`, records above it can be redone and are dimmed when colored.
///
/// # Examples
/// ```
/// # use scenario_undo::{Map, Marker, Scene, UndoManager, UndoRecord};
/// let mut scene = Scene::new();
/// let mut manager: UndoManager<UndoRecord<Scene<Marker>>> = UndoManager::new();
/// let a = scene.insert(Marker::new("a"));
/// manager.record(UndoRecord::add_element(a));
/// manager.set_saved(true);
///
/// let text = manager.display().detailed(false).to_string();
/// # #[cfg(not(feature = "colored"))]
/// assert_eq!(text, "1 [HEAD, SAVED] Add element 0v1\n0\n");
/// ```
pub struct Display<'a, A: Reversible, S> {
    manager: &'a UndoManager<A, S>,
    format: Format,
}

impl<A: Reversible, S> Display<'_, A, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show the time of each record and its full message (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show the saved position (on by default).
    pub fn saved(&mut self, on: bool) -> &mut Self {
        self.format.saved = on;
        self
    }
}

impl<A: Reversible + fmt::Display, S> Display<'_, A, S> {
    fn row<'e>(&self, index: usize, entry: Option<&'e Entry<A>>) -> Row<'e> {
        let head = self.manager.undo_len();
        Row {
            index,
            head: index == head,
            saved: self.manager.saved == Some(index),
            undone: index > head,
            message: entry.map(|entry| entry as &dyn fmt::Display),
            #[cfg(feature = "chrono")]
            timestamp: entry.map(Entry::timestamp),
        }
    }
}

impl<'a, A: Reversible, S> From<&'a UndoManager<A, S>> for Display<'a, A, S> {
    fn from(manager: &'a UndoManager<A, S>) -> Self {
        Display {
            manager,
            format: Format::default(),
        }
    }
}

impl<A: Reversible + fmt::Display, S> fmt::Display for Display<'_, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self.manager.history.entries().rev();
        for (index, entry) in (1..=self.manager.len()).rev().zip(entries) {
            self.format.row(f, &self.row(index, Some(entry)))?;
        }
        self.format.row(f, &self.row(0, None))
    }
}
