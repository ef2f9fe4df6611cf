use crate::{Result, Reversible};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use std::fmt::{self, Display, Formatter};

/// Wrapper around a record that contains additional metadata.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry<A> {
    record: A,
    #[cfg(feature = "chrono")]
    timestamp: DateTime<Utc>,
}

impl<A> Entry<A> {
    /// Returns the record.
    pub fn get(&self) -> &A {
        &self.record
    }

    /// Returns the time the record was made.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<A> From<A> for Entry<A> {
    fn from(record: A) -> Self {
        Entry {
            record,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }
}

impl<A: Reversible> Reversible for Entry<A> {
    type Target = A::Target;

    fn undo(&mut self, target: &mut A::Target) -> Result {
        self.record.undo(target)
    }

    fn redo(&mut self, target: &mut A::Target) -> Result {
        self.record.redo(target)
    }

    fn dispose(self) {
        self.record.dispose()
    }
}

impl<A: Display> Display for Entry<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.record as &dyn Display).fmt(f)
    }
}
