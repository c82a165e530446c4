use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use super::List2;
use super::slot::Slot;
use crate::alloc::{Global, RawAllocator};

/// A borrowing iterator over a [`List2`], front to back.
pub struct Iter<'a, T, A: RawAllocator = Global> {
    pub(crate) list: &'a List2<T, A>,
    pub(crate) curr: Option<u32>,
    pub(crate) remaining: usize,
}

impl<'a, T, A: RawAllocator> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.curr?;
        let entry = match self.list.slots[index as usize].entry() {
            Some(entry) => entry,
            // Chain indices always refer to occupied slots.
            None => unreachable!(),
        };
        self.curr = entry.next;
        self.remaining -= 1;
        Some(&entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, A: RawAllocator> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: RawAllocator> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            curr: self.curr,
            remaining: self.remaining,
        }
    }
}

impl<T: Debug, A: RawAllocator> Debug for Iter<'_, T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutably borrowing iterator over a [`List2`], front to back.
pub struct IterMut<'a, T> {
    slots: *mut Slot<T>,
    curr: Option<u32>,
    remaining: usize,
    _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn over<A: RawAllocator>(list: &'a mut List2<T, A>) -> IterMut<'a, T> {
        IterMut {
            curr: list.head,
            remaining: list.len,
            slots: list.slots.as_mut().as_mut_ptr(),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.curr?;
        // SAFETY: Chain indices are in bounds of the arena for the lifetime of the
        // borrow, and the walk visits each slot exactly once, so the mutable
        // references it hands out never alias.
        let slot = unsafe { &mut *self.slots.add(index as usize) };
        let entry = match slot.entry_mut() {
            Some(entry) => entry,
            // Chain indices always refer to occupied slots.
            None => unreachable!(),
        };
        self.curr = entry.next;
        self.remaining -= 1;
        Some(&mut entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// An owning iterator that drains a [`List2`] front to back.
pub struct IntoIter<T, A: RawAllocator = Global>(pub(crate) List2<T, A>);

impl<T, A: RawAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T, A: RawAllocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAllocator> IntoIterator for List2<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a List2<T, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a mut List2<T, A> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
