//! The boundary to the element model and the map container.
//!
//! The engine never implements these traits for real scenario elements.
//! It only calls through them when a record is undone, redone or disposed.

use crate::Error;
use std::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generational handle to an element placed on a [`Map`].
///
/// A handle is live while the slot at `index` holds an element with the
/// same `generation`. Handles are cheap to copy and never own the element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    /// Creates a handle from its raw parts.
    pub const fn new(index: u32, generation: u32) -> ElementId {
        ElementId { index, generation }
    }

    /// Returns the slot index of the handle.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation of the handle.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Lifecycle of a scenario element.
///
/// The hooks let the element model react when the engine moves an element
/// on or off the map, for example to show or hide its visuals.
///
/// # Examples
/// ```
/// # use scenario_undo::Element;
/// struct Waypoint {
///     speed: f32,
///     visible: bool,
/// }
///
/// impl Element for Waypoint {
///     type Property = f32;
///
///     fn add_to_map(&mut self) {
///         self.visible = true;
///     }
///
///     fn remove_from_map(&mut self) {
///         self.visible = false;
///     }
///
///     fn swap_property(&mut self, speed: &mut f32) {
///         std::mem::swap(&mut self.speed, speed);
///     }
/// }
/// ```
pub trait Element {
    /// The value exchanged by property edits.
    type Property;

    /// Called after the element has been placed on the map.
    fn add_to_map(&mut self) {}

    /// Called after the element has been taken off the map.
    fn remove_from_map(&mut self) {}

    /// Releases the resources held by the element.
    ///
    /// Consumes the element so it can only run once.
    fn dispose(self)
    where
        Self: Sized,
    {
    }

    /// Exchanges the element's property with `property`.
    ///
    /// After the call `property` holds the value the element had before.
    fn swap_property(&mut self, property: &mut Self::Property);
}

/// The map container that owns live elements.
pub trait Map {
    /// The element type stored on the map.
    type Element: Element;

    /// Places a new element on the map and returns a fresh handle to it.
    fn insert(&mut self, element: Self::Element) -> ElementId;

    /// Places a detached element back on the map under its previous handle.
    ///
    /// # Errors
    /// The element is handed back together with [`Error::Occupied`] if the
    /// slot is in use, or [`Error::StaleReference`] if the handle was never
    /// issued by this map.
    fn restore(
        &mut self,
        id: ElementId,
        element: Self::Element,
    ) -> Result<(), (Error, Self::Element)>;

    /// Takes the element off the map and hands ownership to the caller.
    ///
    /// Returns `None` if the handle is not live.
    fn remove(&mut self, id: ElementId) -> Option<Self::Element>;

    /// Returns a reference to the live element.
    fn get(&self, id: ElementId) -> Option<&Self::Element>;

    /// Returns a mutable reference to the live element.
    fn get_mut(&mut self, id: ElementId) -> Option<&mut Self::Element>;

    /// Returns `true` if the handle is live.
    fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of live elements.
    fn len(&self) -> usize;

    /// Returns `true` if no element is live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
