use crate::Element;
use std::cell::Cell;
use std::rc::Rc;

/// This is the element used in all the examples.
///
/// Not part of the API and can change at any time.
#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct Marker {
    /// Name shown in the editor.
    pub name: &'static str,
    /// The property changed by the examples.
    pub speed: u32,
    /// Set while the marker is placed on a map.
    pub on_map: bool,
    disposed: Rc<Cell<usize>>,
}

impl Marker {
    /// Returns a new marker that is not placed on a map.
    pub fn new(name: &'static str) -> Marker {
        Marker {
            name,
            speed: 0,
            on_map: false,
            disposed: Rc::default(),
        }
    }

    /// Shared counter of how many times this marker has been disposed.
    pub fn disposals(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.disposed)
    }
}

impl Element for Marker {
    type Property = u32;

    fn add_to_map(&mut self) {
        self.on_map = true;
    }

    fn remove_from_map(&mut self) {
        self.on_map = false;
    }

    fn dispose(self) {
        self.disposed.set(self.disposed.get() + 1);
    }

    fn swap_property(&mut self, speed: &mut u32) {
        std::mem::swap(&mut self.speed, speed);
    }
}
