//! The records kept in the history.

use crate::{Element, ElementId, Error, Map, Result, Reversible};
use std::fmt::{self, Debug, Display, Formatter};

/// Where the element a record refers to currently lives.
pub enum Placement<E> {
    /// The element is on the map and the record only holds its handle.
    Live(ElementId),
    /// The element is off the map and owned by the record.
    Detached(ElementId, E),
}

impl<E> Placement<E> {
    /// Returns the handle of the element.
    pub fn id(&self) -> ElementId {
        match *self {
            Placement::Live(id) | Placement::Detached(id, _) => id,
        }
    }

    /// Returns `true` if the element is on the map.
    pub fn is_live(&self) -> bool {
        matches!(self, Placement::Live(_))
    }

    /// Takes the element off the map.
    fn detach<M: Map<Element = E>>(&mut self, map: &mut M) -> Result {
        match *self {
            Placement::Live(id) => {
                let element = map.remove(id).ok_or(Error::StaleReference(id))?;
                *self = Placement::Detached(id, element);
                Ok(())
            }
            Placement::Detached(id, _) => Err(Error::StaleReference(id)),
        }
    }

    /// Puts the owned element back on the map.
    fn attach<M: Map<Element = E>>(&mut self, map: &mut M) -> Result {
        let id = self.id();
        match std::mem::replace(self, Placement::Live(id)) {
            Placement::Detached(id, element) => match map.restore(id, element) {
                Ok(()) => Ok(()),
                Err((err, element)) => {
                    *self = Placement::Detached(id, element);
                    Err(err)
                }
            },
            Placement::Live(id) => Err(Error::Occupied(id)),
        }
    }
}

impl<E: Element> Placement<E> {
    fn dispose(self) {
        if let Placement::Detached(_, element) = self {
            element.dispose();
        }
    }
}

impl<E> Debug for Placement<E> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Placement::Live(id) => f.debug_tuple("Live").field(id).finish(),
            Placement::Detached(id, _) => f.debug_tuple("Detached").field(id).finish(),
        }
    }
}

/// A reversible edit of a scenario map.
///
/// The editor performs the edit on the map first and then records the
/// matching variant. Undoing and redoing moves ownership of elements
/// between the map and the record, so an element is always either live on
/// the map or owned by exactly one record.
///
/// # Examples
/// ```
/// # use scenario_undo::{Map, Marker, Reversible, Scene, UndoRecord};
/// let mut scene = Scene::new();
/// let a = scene.insert(Marker::new("a"));
/// let mut record = UndoRecord::<Scene<Marker>>::add_element(a);
///
/// record.undo(&mut scene).unwrap();
/// assert!(!scene.contains(a));
/// record.redo(&mut scene).unwrap();
/// assert!(scene.contains(a));
/// ```
pub enum UndoRecord<M: Map> {
    /// An element was placed on the map.
    AddElement(Placement<M::Element>),
    /// An element was taken off the map.
    RemoveElement(Placement<M::Element>),
    /// A property of an element was changed.
    PropertyChanged {
        /// The edited element.
        id: ElementId,
        /// The value to swap back in on the next undo or redo.
        property: <M::Element as Element>::Property,
    },
    /// Records undone and redone as a single step.
    ///
    /// If a sub-record fails, the sub-records already reversed by the same
    /// call are applied again, so the map is left as it was. Should that
    /// rollback fail as well, the failure is logged and the batch is left
    /// partly reversed. The manager then disposes the batch, which disposes
    /// any element a sub-record still owns. With [`Scene`](crate::Scene) a
    /// rollback only re-applies edits that just succeeded and can not fail.
    Batch {
        /// Text shown for the whole batch.
        label: String,
        /// The records in the order they were made.
        records: Vec<UndoRecord<M>>,
    },
}

impl<M: Map> UndoRecord<M> {
    /// Records that the element `id` was placed on the map.
    pub fn add_element(id: ElementId) -> UndoRecord<M> {
        UndoRecord::AddElement(Placement::Live(id))
    }

    /// Records that the element `id` was taken off the map.
    ///
    /// The record takes ownership of the removed element.
    pub fn remove_element(id: ElementId, element: M::Element) -> UndoRecord<M> {
        UndoRecord::RemoveElement(Placement::Detached(id, element))
    }

    /// Records that a property of `id` was changed from `previous`.
    ///
    /// See [`Element::swap_property`] for how the editor obtains `previous`.
    pub fn property_changed(
        id: ElementId,
        previous: <M::Element as Element>::Property,
    ) -> UndoRecord<M> {
        UndoRecord::PropertyChanged {
            id,
            property: previous,
        }
    }

    /// Groups `records` into a single step.
    pub fn batch(label: impl Into<String>, records: Vec<UndoRecord<M>>) -> UndoRecord<M> {
        UndoRecord::Batch {
            label: label.into(),
            records,
        }
    }

    fn swap_property(
        map: &mut M,
        id: ElementId,
        property: &mut <M::Element as Element>::Property,
    ) -> Result {
        let element = map.get_mut(id).ok_or(Error::StaleReference(id))?;
        element.swap_property(property);
        Ok(())
    }
}

impl<M: Map> Reversible for UndoRecord<M> {
    type Target = M;

    fn undo(&mut self, map: &mut M) -> Result {
        match self {
            UndoRecord::AddElement(placement) => placement.detach(map),
            UndoRecord::RemoveElement(placement) => placement.attach(map),
            UndoRecord::PropertyChanged { id, property } => {
                UndoRecord::swap_property(map, *id, property)
            }
            UndoRecord::Batch { records, .. } => {
                for i in (0..records.len()).rev() {
                    if let Err(err) = records[i].undo(map) {
                        // Put the batch back the way it was before this call.
                        for record in &mut records[i + 1..] {
                            if let Err(e) = record.redo(map) {
                                log::warn!("could not roll back batch after failed undo: {e}");
                            }
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }

    fn redo(&mut self, map: &mut M) -> Result {
        match self {
            UndoRecord::AddElement(placement) => placement.attach(map),
            UndoRecord::RemoveElement(placement) => placement.detach(map),
            UndoRecord::PropertyChanged { id, property } => {
                UndoRecord::swap_property(map, *id, property)
            }
            UndoRecord::Batch { records, .. } => {
                for i in 0..records.len() {
                    if let Err(err) = records[i].redo(map) {
                        for record in records[..i].iter_mut().rev() {
                            if let Err(e) = record.undo(map) {
                                log::warn!("could not roll back batch after failed redo: {e}");
                            }
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }

    fn dispose(self) {
        match self {
            UndoRecord::AddElement(placement) | UndoRecord::RemoveElement(placement) => {
                placement.dispose()
            }
            UndoRecord::PropertyChanged { .. } => (),
            UndoRecord::Batch { records, .. } => records.into_iter().for_each(Reversible::dispose),
        }
    }
}

impl<M: Map> Debug for UndoRecord<M> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UndoRecord::AddElement(placement) => {
                f.debug_tuple("AddElement").field(placement).finish()
            }
            UndoRecord::RemoveElement(placement) => {
                f.debug_tuple("RemoveElement").field(placement).finish()
            }
            UndoRecord::PropertyChanged { id, .. } => f
                .debug_struct("PropertyChanged")
                .field("id", id)
                .finish_non_exhaustive(),
            UndoRecord::Batch { label, records } => f
                .debug_struct("Batch")
                .field("label", label)
                .field("records", records)
                .finish(),
        }
    }
}

impl<M: Map> Display for UndoRecord<M> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UndoRecord::AddElement(placement) => write!(f, "Add element {}", placement.id()),
            UndoRecord::RemoveElement(placement) => {
                write!(f, "Remove element {}", placement.id())
            }
            UndoRecord::PropertyChanged { id, .. } => write!(f, "Change property of element {id}"),
            UndoRecord::Batch { label, .. } => f.write_str(label),
        }
    }
}
