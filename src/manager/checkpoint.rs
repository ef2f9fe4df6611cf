use crate::socket::Slot;
use crate::{Result, Reversible, UndoManager};

#[derive(Debug)]
enum CheckpointStep {
    Record(Option<usize>),
    Undo,
    Redo,
}

/// Wraps an undo manager and gives it checkpoint functionality.
///
/// Everything done through the checkpoint can be reverted with
/// [`cancel`](Checkpoint::cancel), for example when an interactive drag is
/// aborted. Records cancelled this way are disposed. Redo records that were
/// discarded when the cancelled records were made do not come back.
///
/// # Examples
/// ```
/// # use scenario_undo::{Map, Marker, Scene, UndoManager, UndoRecord};
/// let mut scene = Scene::new();
/// let mut manager = UndoManager::new();
/// let a = scene.insert(Marker::new("a"));
/// manager.record(UndoRecord::add_element(a));
///
/// let mut cp = manager.checkpoint();
/// let b = scene.insert(Marker::new("b"));
/// cp.record(UndoRecord::add_element(b));
/// cp.cancel(&mut scene).unwrap().unwrap();
///
/// assert!(scene.contains(a));
/// assert!(!scene.contains(b));
/// assert_eq!(manager.len(), 1);
/// ```
#[derive(Debug)]
pub struct Checkpoint<'a, A: Reversible, S> {
    manager: &'a mut UndoManager<A, S>,
    steps: Vec<CheckpointStep>,
}

impl<A: Reversible, S> Checkpoint<'_, A, S> {
    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<A, S> {
        self.manager.checkpoint()
    }
}

impl<A: Reversible, S: Slot> Checkpoint<'_, A, S> {
    /// Calls the [`record`](UndoManager::record) method.
    pub fn record(&mut self, record: A) {
        let saved = self.manager.saved;
        self.manager.record(record);
        self.steps.push(CheckpointStep::Record(saved));
    }

    /// Calls the [`undo`](UndoManager::undo) method.
    pub fn undo(&mut self, target: &mut A::Target) -> Option<Result> {
        let result = self.manager.undo(target)?;
        if result.is_ok() {
            self.steps.push(CheckpointStep::Undo);
        }
        Some(result)
    }

    /// Calls the [`redo`](UndoManager::redo) method.
    pub fn redo(&mut self, target: &mut A::Target) -> Option<Result> {
        let result = self.manager.redo(target)?;
        if result.is_ok() {
            self.steps.push(CheckpointStep::Redo);
        }
        Some(result)
    }

    /// Commits the changes and consumes the checkpoint.
    pub fn commit(self) {}

    /// Cancels the changes and consumes the checkpoint.
    ///
    /// # Errors
    /// If an error occur when canceling the changes, the error is returned
    /// and the remaining changes are not canceled.
    pub fn cancel(self, target: &mut A::Target) -> Option<Result> {
        for step in self.steps.into_iter().rev() {
            let result = match step {
                CheckpointStep::Record(saved) => {
                    let result = self.manager.discard(target);
                    if let Some(Ok(())) = result {
                        let len = self.manager.len();
                        self.manager.saved = saved.filter(|&saved| saved <= len);
                    }
                    self.manager.emit();
                    result
                }
                CheckpointStep::Undo => self.manager.redo(target),
                CheckpointStep::Redo => self.manager.undo(target),
            };
            match result {
                Some(Ok(())) => (),
                o => return o,
            }
        }
        Some(Ok(()))
    }
}

impl<'a, A: Reversible, S> From<&'a mut UndoManager<A, S>> for Checkpoint<'a, A, S> {
    fn from(manager: &'a mut UndoManager<A, S>) -> Self {
        Checkpoint {
            manager,
            steps: Vec::new(),
        }
    }
}
