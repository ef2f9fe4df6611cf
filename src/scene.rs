//! A generational arena that owns the live elements of a scenario.

use crate::{Element, ElementId, Error, Map};

#[derive(Clone, Debug)]
struct Slot<E> {
    element: Option<E>,
    // Generation of the element currently or last held by the slot.
    generation: u32,
    // Highest generation ever issued for the slot.
    issued: u32,
    // The index is on the free list. Restoring leaves it there.
    listed: bool,
}

/// Map of placed scenario elements.
///
/// When an element is removed its slot is put on a free list. A fresh
/// insert reuses the slot with a generation that was never issued before,
/// so old handles to the slot stay invalid. A detached element can be put
/// back under its old handle with [`restore`](Map::restore), which is what
/// undo and redo use to keep handles stable across history steps.
///
/// A slot whose generations are used up is retired and never reused.
///
/// # Examples
/// ```
/// # use scenario_undo::{Map, Marker, Scene};
/// let mut scene = Scene::new();
/// let a = scene.insert(Marker::new("a"));
/// assert!(scene.get(a).unwrap().on_map);
///
/// let marker = scene.remove(a).unwrap();
/// assert!(!marker.on_map);
/// assert!(!scene.contains(a));
///
/// scene.restore(a, marker).unwrap();
/// assert!(scene.contains(a));
/// ```
#[derive(Clone, Debug)]
pub struct Scene<E> {
    slots: Vec<Slot<E>>,
    free: Vec<u32>,
    len: usize,
}

impl<E> Scene<E> {
    /// Returns a new empty scene.
    pub fn new() -> Scene<E> {
        Scene::with_capacity(0)
    }

    /// Returns a new empty scene with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Scene<E> {
        Scene {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns an iterator over the live elements and their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &E)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let element = slot.element.as_ref()?;
            Some((ElementId::new(i as u32, slot.generation), element))
        })
    }

    /// Returns the handles of the live elements.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    fn slot(&self, id: ElementId) -> Option<&Slot<E>> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.element.is_some() && slot.generation == id.generation())
    }
}

impl<E: Element> Scene<E> {
    /// Removes the element and disposes it outside of any history.
    ///
    /// Records still referring to the element will report a stale reference.
    /// Returns `false` if the handle was not live.
    pub fn despawn(&mut self, id: ElementId) -> bool {
        match self.remove(id) {
            Some(element) => {
                element.dispose();
                true
            }
            None => false,
        }
    }
}

impl<E: Element> Map for Scene<E> {
    type Element = E;

    /// # Panics
    /// Panics if the scene needs more than `u32::MAX` slots.
    fn insert(&mut self, mut element: E) -> ElementId {
        element.add_to_map();
        // Entries on the free list are checked lazily since a restore may
        // have occupied the slot again.
        while let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.listed = false;
            if slot.element.is_some() {
                continue;
            }
            let Some(generation) = slot.issued.checked_add(1) else {
                log::debug!("retired slot {index}, its generations are used up");
                continue;
            };
            slot.issued = generation;
            slot.generation = generation;
            slot.element = Some(element);
            self.len += 1;
            log::trace!("reused slot {index} at generation {generation}");
            return ElementId::new(index, generation);
        }
        let index = u32::try_from(self.slots.len()).expect("scene can not hold more slots");
        self.slots.push(Slot {
            element: Some(element),
            generation: 1,
            issued: 1,
            listed: false,
        });
        self.len += 1;
        log::trace!("allocated slot {index}");
        ElementId::new(index, 1)
    }

    fn restore(&mut self, id: ElementId, mut element: E) -> Result<(), (Error, E)> {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return Err((Error::StaleReference(id), element));
        };
        if id.generation() == 0 || id.generation() > slot.issued {
            return Err((Error::StaleReference(id), element));
        }
        if slot.element.is_some() {
            return Err((Error::Occupied(id), element));
        }
        element.add_to_map();
        slot.generation = id.generation();
        slot.element = Some(element);
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, id: ElementId) -> Option<E> {
        self.slot(id)?;
        let slot = &mut self.slots[id.index() as usize];
        let mut element = slot.element.take()?;
        if !slot.listed {
            slot.listed = true;
            self.free.push(id.index());
        }
        self.len -= 1;
        element.remove_from_map();
        Some(element)
    }

    fn get(&self, id: ElementId) -> Option<&E> {
        self.slot(id)?.element.as_ref()
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut E> {
        self.slot(id)?;
        self.slots[id.index() as usize].element.as_mut()
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<E> Default for Scene<E> {
    fn default() -> Self {
        Scene::new()
    }
}
