use crate::ElementId;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when a record can not be reversed against the map.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Error, Hash, Eq, PartialEq)]
pub enum Error {
    /// The element the record refers to is no longer live on the map,
    /// or the handle was never issued by it.
    #[error("element {0} is no longer on the map")]
    StaleReference(ElementId),
    /// A detached element could not be restored because its slot is in use.
    #[error("slot of element {0} is occupied by another element")]
    Occupied(ElementId),
}

impl Error {
    /// Returns the handle of the element the error refers to.
    pub fn element(&self) -> ElementId {
        match *self {
            Error::StaleReference(id) | Error::Occupied(id) => id,
        }
    }
}

/// A specialized Result type for undo-redo operations.
pub type Result<T = ()> = std::result::Result<T, Error>;
