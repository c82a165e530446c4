//! The universal read cursor: one type that walks any collection in the crate.

use std::mem::MaybeUninit;
use std::slice;

use super::hash::Map;
use super::hash::map::Values;
use super::linked::List;
use super::linked::list::Iter as ListIter;
use super::linked::List2;
use super::linked::list2::slot::Slot;
use crate::alloc::RawAllocator;

/// A read-only cursor over any collection in the crate.
///
/// Every container's `cursor()` method returns this same type, so code that walks a
/// collection can be written once against `Cursor` regardless of which container
/// backs it. The cursor borrows its collection; the borrow checker guarantees the
/// collection outlives the cursor and cannot be mutated while one is live.
///
/// Map cursors visit values in the map's iteration order; all other cursors visit
/// elements front to back (or oldest to newest for a ring).
///
/// # Examples
/// ```
/// # use nanods::collections::contiguous::Vector;
/// # use nanods::collections::linked::List;
/// # use nanods::collections::cursor::Cursor;
/// # use nanods::collections::contiguous::vector::AllocError;
/// fn sum(mut cursor: Cursor<'_, i32>) -> i32 {
///     let mut total = 0;
///     while let Some(value) = cursor.advance() {
///         total += value;
///     }
///     total
/// }
///
/// let mut vec = Vector::new();
/// let mut list = List::new();
/// for i in 1..=3 {
///     vec.push(i)?;
///     list.push_back(i)?;
/// }
/// assert_eq!(sum(vec.cursor()), 6);
/// assert_eq!(sum(list.cursor()), 6);
/// # Ok::<(), AllocError>(())
/// ```
pub struct Cursor<'a, T>(Inner<'a, T>);

enum Inner<'a, T> {
    Slice(slice::Iter<'a, T>),
    Ring {
        data: &'a [MaybeUninit<T>],
        head: usize,
        len: usize,
        offset: usize,
    },
    List(ListIter<'a, T>),
    List2 {
        slots: &'a [Slot<T>],
        curr: Option<u32>,
        remaining: usize,
    },
    Map(Values<'a, T>),
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn over_slice(slice: &'a [T]) -> Cursor<'a, T> {
        Cursor(Inner::Slice(slice.iter()))
    }

    pub(crate) fn over_ring(data: &'a [MaybeUninit<T>], head: usize, len: usize) -> Cursor<'a, T> {
        Cursor(Inner::Ring {
            data,
            head,
            len,
            offset: 0,
        })
    }

    pub(crate) fn over_list<A: RawAllocator>(list: &'a List<T, A>) -> Cursor<'a, T> {
        Cursor(Inner::List(list.iter()))
    }

    pub(crate) fn over_list2<A: RawAllocator>(list: &'a List2<T, A>) -> Cursor<'a, T> {
        Cursor(Inner::List2 {
            slots: list.slots.as_ref(),
            curr: list.head,
            remaining: list.len,
        })
    }

    pub(crate) fn over_map<A: RawAllocator>(map: &'a Map<T, A>) -> Cursor<'a, T> {
        Cursor(Inner::Map(map.values()))
    }

    /// Returns true if at least one element remains ahead of the cursor.
    pub fn has_next(&self) -> bool {
        match &self.0 {
            Inner::Slice(iter) => !iter.as_slice().is_empty(),
            Inner::Ring { len, offset, .. } => offset < len,
            Inner::List(iter) => iter.len() > 0,
            Inner::List2 { remaining, .. } => *remaining > 0,
            Inner::Map(values) => values.len() > 0,
        }
    }

    /// Steps the cursor forward, returning a reference to the element it stepped
    /// over, or None once the collection is exhausted.
    pub fn advance(&mut self) -> Option<&'a T> {
        match &mut self.0 {
            Inner::Slice(iter) => iter.next(),
            Inner::Ring {
                data,
                head,
                len,
                offset,
            } => {
                if *offset == *len {
                    return None;
                }
                let slot: &'a MaybeUninit<T> = &data[(*head + *offset) % data.len()];
                *offset += 1;
                // SAFETY: Offsets below len address initialized slots of the ring.
                Some(unsafe { slot.assume_init_ref() })
            },
            Inner::List(iter) => iter.next(),
            Inner::List2 {
                slots,
                curr,
                remaining,
            } => {
                let index = (*curr)?;
                let slot: &'a Slot<T> = &slots[index as usize];
                let entry = match slot.entry() {
                    Some(entry) => entry,
                    // Chain indices always refer to occupied slots.
                    None => unreachable!(),
                };
                *curr = entry.next;
                *remaining -= 1;
                Some(&entry.value)
            },
            Inner::Map(values) => values.next(),
        }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            Inner::Slice(iter) => iter.size_hint(),
            Inner::Ring { len, offset, .. } => (len - offset, Some(len - offset)),
            Inner::List(iter) => iter.size_hint(),
            Inner::List2 { remaining, .. } => (*remaining, Some(*remaining)),
            Inner::Map(values) => values.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}
