use std::fmt::{self, Debug, Display, Formatter};
use std::mem;

use super::iter::{Iter, IterMut};
use super::slot::{Entry, Slot, SlotState};
use crate::alloc::{Global, RawAllocator};
use crate::collections::contiguous::Vector;
use crate::collections::cursor::Cursor;
use crate::util::error::{AllocError, CapacityOverflow, List2Error, StaleHandle};
use crate::util::wipe;

/// A stable address for a node in a [`List2`].
///
/// A handle stays valid until its node is removed; it is `Copy`, so callers can stash
/// as many as they like. Using a handle after its node has departed is detected, not
/// undefined: the slot's generation counter no longer matches and the operation
/// reports [`StaleHandle`](crate::util::error::StaleHandle). A handle minted by one
/// List2 has no meaning in another; at worst such a handle resolves to a wrong node,
/// never to unsound memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// A list with links in both directions.
///
/// Nodes live in a slot arena backed by [`Vector`], linked by index rather than by
/// pointer, with vacated slots kept on a free list for reuse. Mid-list insertion and
/// removal go through [`NodeHandle`]s, which are validated on every use.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the List2.
///
/// | Method | Complexity |
/// |-|-|
/// | `push_front` | `O(1)`*, `O(n)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `pop_front` | `O(1)` |
/// | `pop_back` | `O(1)` |
/// | `insert_after` | `O(1)`*, `O(n)` |
/// | `remove` | `O(1)` |
/// | `get` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* When no vacant slot is available the arena grows, which may reallocate.
pub struct List2<T, A: RawAllocator = Global> {
    pub(crate) slots: Vector<Slot<T>, A>,
    pub(crate) head: Option<u32>,
    pub(crate) tail: Option<u32>,
    pub(crate) free: Option<u32>,
    pub(crate) len: usize,
}

impl<T> List2<T> {
    /// Creates a new empty List2. The arena is allocated as nodes are pushed.
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::linked::List2;
    /// # use nanods::collections::linked::list2::List2Error;
    /// let mut list = List2::new();
    /// let a = list.push_back('a')?;
    /// list.push_back('c')?;
    /// list.insert_after(a, 'b')?;
    /// assert_eq!(list.pop_front(), Some('a'));
    /// assert_eq!(list.pop_front(), Some('b'));
    /// assert_eq!(list.pop_front(), Some('c'));
    /// # Ok::<(), List2Error>(())
    /// ```
    pub const fn new() -> List2<T> {
        List2::new_in(Global)
    }

    /// As [`List2::new`], but the arena is zeroed before release and vacated slots
    /// are zeroed on removal.
    pub const fn secure() -> List2<T> {
        List2 {
            slots: Vector::secure(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }
}

impl<T, A: RawAllocator> List2<T, A> {
    /// Creates a new empty List2 whose arena acquires memory through `alloc`.
    pub const fn new_in(alloc: A) -> List2<T, A> {
        List2 {
            slots: Vector::new_in(alloc),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// As [`List2::new_in`], but with the secure wipe behavior of
    /// [`List2::secure`].
    pub const fn secure_in(alloc: A) -> List2<T, A> {
        List2 {
            slots: Vector::secure_in(alloc),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the List2.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the List2 contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if removed values' slots are zeroed and the arena is zeroed
    /// before release.
    pub const fn is_secure(&self) -> bool {
        self.slots.is_secure()
    }

    /// Pushes the provided value onto the front of the List2.
    ///
    /// # Errors
    /// [`AllocError`] if the arena cannot grow; the List2 is unchanged.
    pub fn push_front(&mut self, value: T) -> Result<NodeHandle, AllocError> {
        let index = self.alloc_slot(Entry {
            value,
            prev: None,
            next: self.head,
        })?;

        match self.head {
            Some(old) => self.slot_entry_mut(old).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
        Ok(self.handle_at(index))
    }

    /// Pushes the provided value onto the back of the List2.
    ///
    /// # Errors
    /// [`AllocError`] if the arena cannot grow; the List2 is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<NodeHandle, AllocError> {
        let index = self.alloc_slot(Entry {
            value,
            prev: self.tail,
            next: None,
        })?;

        match self.tail {
            Some(old) => self.slot_entry_mut(old).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        Ok(self.handle_at(index))
    }

    /// Inserts the provided value directly after the node `after` refers to. The tail
    /// moves when inserting after the tail.
    ///
    /// # Errors
    /// [`List2Error::StaleHandle`] if the referenced node has departed,
    /// [`List2Error::Alloc`] if the arena cannot grow. The List2 is unchanged either
    /// way.
    pub fn insert_after(&mut self, after: NodeHandle, value: T) -> Result<NodeHandle, List2Error> {
        let at = self.resolve(after)?;
        let next = self.slot_entry(at).next;

        let index = self.alloc_slot(Entry {
            value,
            prev: Some(at),
            next,
        })?;

        self.slot_entry_mut(at).next = Some(index);
        match next {
            Some(n) => self.slot_entry_mut(n).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.len += 1;
        Ok(self.handle_at(index))
    }

    /// Removes the node `handle` refers to, relinking its neighbors (or the ends of
    /// the list) around it.
    ///
    /// # Errors
    /// [`StaleHandle`] if the referenced node has already departed; the List2 is
    /// unchanged.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T, StaleHandle> {
        let index = self.resolve(handle)?;
        let entry = self.release_slot(index);

        match entry.prev {
            Some(p) => self.slot_entry_mut(p).next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(n) => self.slot_entry_mut(n).prev = entry.prev,
            None => self.tail = entry.prev,
        }
        self.len -= 1;
        Ok(entry.value)
    }

    /// Pops the value off the front of the List2, returning an owned value if the
    /// List2 has length greater than 0.
    pub fn pop_front(&mut self) -> Option<T> {
        let handle = self.handle_front()?;
        match self.remove(handle) {
            Ok(value) => Some(value),
            // A handle minted from the live head cannot be stale.
            Err(_) => unreachable!(),
        }
    }

    /// Pops the value off the back of the List2, returning an owned value if the
    /// List2 has length greater than 0.
    pub fn pop_back(&mut self) -> Option<T> {
        let handle = self.handle_back()?;
        match self.remove(handle) {
            Ok(value) => Some(value),
            // A handle minted from the live tail cannot be stale.
            Err(_) => unreachable!(),
        }
    }

    /// Returns a reference to the value of the node `handle` refers to.
    ///
    /// # Errors
    /// [`StaleHandle`] if the referenced node has departed.
    pub fn get(&self, handle: NodeHandle) -> Result<&T, StaleHandle> {
        let index = self.resolve(handle)?;
        Ok(&self.slot_entry(index).value)
    }

    /// Returns a mutable reference to the value of the node `handle` refers to.
    ///
    /// # Errors
    /// [`StaleHandle`] if the referenced node has departed.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Result<&mut T, StaleHandle> {
        let index = self.resolve(handle)?;
        Ok(&mut self.slot_entry_mut(index).value)
    }

    /// Returns a handle to the first node, or None if the List2 is empty.
    pub fn handle_front(&self) -> Option<NodeHandle> {
        Some(self.handle_at(self.head?))
    }

    /// Returns a handle to the last node, or None if the List2 is empty.
    pub fn handle_back(&self) -> Option<NodeHandle> {
        Some(self.handle_at(self.tail?))
    }

    /// Returns a handle to the node after the one `handle` refers to, or None at the
    /// tail.
    ///
    /// # Errors
    /// [`StaleHandle`] if the referenced node has departed.
    pub fn next(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, StaleHandle> {
        let index = self.resolve(handle)?;
        Ok(self.slot_entry(index).next.map(|n| self.handle_at(n)))
    }

    /// Returns a handle to the node before the one `handle` refers to, or None at the
    /// head.
    ///
    /// # Errors
    /// [`StaleHandle`] if the referenced node has departed.
    pub fn prev(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, StaleHandle> {
        let index = self.resolve(handle)?;
        Ok(self.slot_entry(index).prev.map(|p| self.handle_at(p)))
    }

    /// Returns a reference to the first element, or None if the List2 is empty.
    pub fn front(&self) -> Option<&T> {
        Some(&self.slot_entry(self.head?).value)
    }

    /// Returns a mutable reference to the first element, or None if the List2 is
    /// empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        Some(&mut self.slot_entry_mut(head).value)
    }

    /// Returns a reference to the last element, or None if the List2 is empty.
    pub fn back(&self) -> Option<&T> {
        Some(&self.slot_entry(self.tail?).value)
    }

    /// Returns a mutable reference to the last element, or None if the List2 is
    /// empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.tail?;
        Some(&mut self.slot_entry_mut(tail).value)
    }

    /// Drops every element. The arena and its free list are retained for reuse.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter {
            list: self,
            curr: self.head,
            remaining: self.len,
        }
    }

    /// Returns a mutable iterator over the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::over(self)
    }

    /// Returns a [`Cursor`] walking the elements front to back.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::over_list2(self)
    }
}

impl<T, A: RawAllocator> List2<T, A> {
    /// Checks `handle` against the arena: in bounds, matching generation, occupied.
    fn resolve(&self, handle: NodeHandle) -> Result<u32, StaleHandle> {
        let slot = self.slots.get(handle.index as usize).ok_or(StaleHandle)?;
        if slot.generation != handle.generation || slot.entry().is_none() {
            return Err(StaleHandle);
        }
        Ok(handle.index)
    }

    fn handle_at(&self, index: u32) -> NodeHandle {
        NodeHandle {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Direct entry access for an index already known to be occupied.
    fn slot_entry(&self, index: u32) -> &Entry<T> {
        match self.slots[index as usize].entry() {
            Some(entry) => entry,
            // Link indices always refer to occupied slots.
            None => unreachable!(),
        }
    }

    fn slot_entry_mut(&mut self, index: u32) -> &mut Entry<T> {
        match self.slots[index as usize].entry_mut() {
            Some(entry) => entry,
            // Link indices always refer to occupied slots.
            None => unreachable!(),
        }
    }

    /// Places `entry` in a vacant slot, growing the arena when none is free. The new
    /// slot is not linked into the chain and `len` is untouched.
    fn alloc_slot(&mut self, entry: Entry<T>) -> Result<u32, AllocError> {
        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                self.free = match slot.state {
                    SlotState::Vacant { next_free } => next_free,
                    // Slots on the free list are vacant by construction.
                    SlotState::Occupied(_) => unreachable!(),
                };
                slot.state = SlotState::Occupied(entry);
                Ok(index)
            },
            None => {
                let index = match u32::try_from(self.slots.len()) {
                    Ok(index) => index,
                    Err(_) => return Err(CapacityOverflow.into()),
                };
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Occupied(entry),
                })?;
                Ok(index)
            },
        }
    }

    /// Vacates the slot at `index`, bumping its generation and pushing it onto the
    /// free list. The chain links and `len` are untouched. A secure List2 zeroes the
    /// slot's storage once the entry has moved out.
    fn release_slot(&mut self, index: u32) -> Entry<T> {
        let secure = self.slots.is_secure();
        let next_free = self.free;
        let slot = &mut self.slots[index as usize];

        let state = mem::replace(&mut slot.state, SlotState::Vacant { next_free });
        let entry = match state {
            SlotState::Occupied(entry) => entry,
            // resolve and the link indices both guarantee occupancy.
            SlotState::Vacant { .. } => unreachable!(),
        };
        slot.generation = slot.generation.wrapping_add(1);

        if secure && size_of::<Slot<T>>() != 0 {
            let generation = slot.generation;
            let raw: *mut Slot<T> = slot;
            // SAFETY: raw addresses a live slot inside the arena; the occupant has
            // moved out, so overwriting the storage invalidates no value.
            unsafe {
                wipe::wipe_region(raw.cast(), size_of::<Slot<T>>());
                raw.write(Slot {
                    generation,
                    state: SlotState::Vacant { next_free },
                });
            }
        }

        self.free = Some(index);
        entry
    }

    /// Walks the chain both ways and audits it against the recorded length, ends and
    /// free list. Test use only.
    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        let mut count = 0;
        let mut prev: Option<u32> = None;
        let mut curr = self.head;
        while let Some(index) = curr {
            let entry = self.slot_entry(index);
            assert_eq!(entry.prev, prev, "back link should mirror the forward walk");
            count += 1;
            prev = Some(index);
            curr = entry.next;
        }
        assert_eq!(count, self.len);
        assert_eq!(prev, self.tail);

        let mut vacant = 0;
        let mut free = self.free;
        while let Some(index) = free {
            vacant += 1;
            free = match self.slots[index as usize].state {
                SlotState::Vacant { next_free } => next_free,
                SlotState::Occupied(_) => panic!("free list reached an occupied slot"),
            };
        }
        assert_eq!(self.len + vacant, self.slots.len());
    }
}

impl<T> Default for List2<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List2<T> {
    /// # Panics
    /// Panics on allocation failure; collect from iterators only where that is
    /// acceptable, otherwise push in a loop and handle the error.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List2::new();
        for item in iter {
            match list.push_back(item) {
                Ok(_) => {},
                Err(err) => panic!("{err}"),
            }
        }
        list
    }
}

impl<T: PartialEq, A: RawAllocator> PartialEq for List2<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: RawAllocator> Eq for List2<T, A> {}

impl<T: Debug, A: RawAllocator> Debug for List2<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("List2")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("secure", &self.is_secure())
            .finish()
    }
}

impl<T: Debug, A: RawAllocator> Display for List2<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
