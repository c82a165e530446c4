//! Arena internals: every node of a [`List2`](super::List2) is a slot in a
//! [`Vector`](crate::collections::contiguous::Vector), linked by index rather than by
//! pointer. Vacated slots form an intrusive free list and carry a generation counter
//! so that a handle to a departed node can be told apart from a handle to the slot's
//! next occupant.

pub(crate) struct Slot<T> {
    pub(crate) generation: u32,
    pub(crate) state: SlotState<T>,
}

pub(crate) enum SlotState<T> {
    Vacant { next_free: Option<u32> },
    Occupied(Entry<T>),
}

pub(crate) struct Entry<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
}

impl<T> Slot<T> {
    pub(crate) const fn entry(&self) -> Option<&Entry<T>> {
        match &self.state {
            SlotState::Vacant { .. } => None,
            SlotState::Occupied(entry) => Some(entry),
        }
    }

    pub(crate) const fn entry_mut(&mut self) -> Option<&mut Entry<T>> {
        match &mut self.state {
            SlotState::Vacant { .. } => None,
            SlotState::Occupied(entry) => Some(entry),
        }
    }
}
