use crate::socket::{Socket, State};
use crate::{History, Reversible, UndoManager};
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// Builder for an [`UndoManager`].
///
/// # Examples
/// ```
/// # use scenario_undo::{Marker, Scene, Signal, UndoManager, UndoRecord};
/// let manager: UndoManager<UndoRecord<Scene<Marker>>, _> = UndoManager::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// # assert_eq!(manager.limit(), 100);
/// ```
#[derive(Debug)]
pub struct Builder<A, S = ()> {
    capacity: usize,
    limit: NonZeroUsize,
    saved: bool,
    slot: Option<S>,
    pd: PhantomData<A>,
}

impl<A, S> Builder<A, S> {
    /// Sets the capacity for the undo stack.
    pub fn capacity(mut self, capacity: usize) -> Builder<A, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the `limit` of the undo stack.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<A, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Sets if the target is initially in a saved state.
    /// By default the target is in a saved state.
    pub fn saved(mut self, saved: bool) -> Builder<A, S> {
        self.saved = saved;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<A, S> {
        self.slot = Some(slot);
        self
    }
}

impl<A: Reversible, S> Builder<A, S> {
    /// Builds the undo manager.
    pub fn build(self) -> UndoManager<A, S> {
        UndoManager {
            history: History::with_capacity(self.limit, self.capacity),
            saved: self.saved.then_some(0),
            socket: Socket::new(
                self.slot,
                State {
                    saved: self.saved,
                    ..State::default()
                },
            ),
        }
    }
}

impl<A, S> Default for Builder<A, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            saved: true,
            slot: None,
            pd: PhantomData,
        }
    }
}
