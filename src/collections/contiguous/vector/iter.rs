use std::fmt::{self, Debug, Formatter};
use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use super::Vector;
use super::super::raw::RawBuf;
use crate::alloc::{Global, RawAllocator};

impl<T, A: RawAllocator> IntoIterator for Vector<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);
        IntoIter {
            // SAFETY: vec is never dropped, so the buffer has exactly one owner: the
            // iterator.
            buf: unsafe { ptr::read(&vec.buf) },
            front: 0,
            len: vec.len,
            secure: vec.secure,
        }
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator that drains a [`Vector`] front to back. Elements that are never
/// taken are dropped with the iterator, and the backing buffer is released with the
/// Vector's secure flag honored.
pub struct IntoIter<T, A: RawAllocator = Global> {
    pub(crate) buf: RawBuf<T, A>,
    pub(crate) front: usize,
    pub(crate) len: usize,
    pub(crate) secure: bool,
}

impl<T, A: RawAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.len {
            None
        } else {
            let index = self.front;
            self.front += 1;
            // SAFETY: index < len, so the slot is initialized; front has moved past
            // it, making this the only live copy.
            Some(unsafe { self.buf.ptr.add(index).read() })
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, A: RawAllocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAllocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        for index in self.front..self.len {
            // SAFETY: Slots in front..len were never yielded and are still
            // initialized.
            unsafe { ptr::drop_in_place(self.buf.ptr.add(index).as_ptr()) };
        }
        self.buf.release(self.secure);
    }
}

impl<T: Debug, A: RawAllocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let remaining = self.len - self.front;
        f.debug_struct("IntoIter").field("remaining", &remaining).finish()
    }
}
