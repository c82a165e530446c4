use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use super::super::raw::RawBuf;
use crate::alloc::{Global, RawAllocator};
use crate::collections::cursor::Cursor;
use crate::util::arith;
use crate::util::error::{AllocError, IndexOutOfBounds};

/// Capacity of the first allocation made by [`Vector::push`].
const FIRST_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection.
///
/// Capacity starts at 0; the first push allocates [`FIRST_CAP`] slots and each
/// subsequent growth doubles, with every byte-size computation overflow-checked before
/// the backend is asked for memory. All fallible operations leave the Vector unchanged
/// when they fail. A Vector constructed with [`secure`](Vector::secure) zeroes its
/// backing allocation before releasing it.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `clear` | `O(n)` |
/// | `map` | `O(n)` |
/// | `filter` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` takes
/// `O(n)`.
///
/// \** If the Vector already has capacity for the requested total, `reserve` is
/// `O(1)`.
pub struct Vector<T, A: RawAllocator = Global> {
    pub(crate) buf: RawBuf<T, A>,
    pub(crate) len: usize,
    pub(crate) secure: bool,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated on
    /// first push.
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector::new_in(Global)
    }

    /// As [`Vector::new`], but the backing allocation is zeroed before release.
    pub const fn secure() -> Vector<T> {
        Vector::secure_in(Global)
    }

    /// Creates a new Vector with capacity exactly equal to the provided value.
    pub fn with_cap(cap: usize) -> Result<Vector<T>, AllocError> {
        Vector::with_cap_in(cap, Global)
    }
}

impl<T, A: RawAllocator> Vector<T, A> {
    /// Creates a new empty Vector that acquires memory through `alloc`.
    pub const fn new_in(alloc: A) -> Vector<T, A> {
        Vector {
            buf: RawBuf::new_in(alloc),
            len: 0,
            secure: false,
        }
    }

    /// As [`Vector::new_in`], but the backing allocation is zeroed before release.
    pub const fn secure_in(alloc: A) -> Vector<T, A> {
        Vector {
            buf: RawBuf::new_in(alloc),
            len: 0,
            secure: true,
        }
    }

    /// Creates a new Vector with the provided capacity, acquired through `alloc`.
    pub fn with_cap_in(cap: usize, alloc: A) -> Result<Vector<T, A>, AllocError> {
        let mut vec = Vector::new_in(alloc);
        vec.reserve(cap)?;
        Ok(vec)
    }

    /// Returns the length of the Vector.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. The capacity is guaranteed to be
    /// exactly the value produced by the growth policy or requested via
    /// [`reserve`](Vector::reserve).
    pub const fn cap(&self) -> usize {
        self.buf.cap
    }

    /// Returns true if the backing memory will be zeroed before release.
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the allocation backend this Vector acquires memory through.
    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Grows the capacity to exactly `cap`. Does nothing if the Vector already has at
    /// least that much capacity.
    ///
    /// # Errors
    /// [`CapacityOverflow`] if `cap` elements would exceed the addressable byte size,
    /// [`OutOfMemory`](crate::alloc::OutOfMemory) if the backend refuses. The Vector
    /// is unchanged on failure.
    pub fn reserve(&mut self, cap: usize) -> Result<(), AllocError> {
        self.buf.grow_to(cap)?;
        Ok(())
    }

    /// Pushes the provided value onto the end of the Vector, growing the capacity if
    /// required.
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::contiguous::Vector;
    /// # use nanods::collections::contiguous::vector::AllocError;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i)?;
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// # Ok::<(), AllocError>(())
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        if self.len == self.cap() {
            self.grow()?;
        }
        // SAFETY: The capacity has just been adjusted to fit the new item.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Pushes the provided value onto the end of the Vector, assuming that there is
    /// enough capacity to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has spare capacity, using
    /// methods like [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap) to
    /// arrange it. Using this method on a full Vector is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees len < cap, so the write is in bounds of the
        // allocation.
        unsafe { self.buf.ptr.add(self.len).write(value) };
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the
    /// Vector has length greater than 0. The vacated slot's storage is not cleared.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: len has just been decremented, so the slot at len is initialized
            // and no longer reachable through the Vector; this is the only live copy.
            Some(unsafe { self.buf.ptr.add(self.len).read() })
        }
    }

    /// Returns a reference to the element at `index`, or None if it is out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.deref().get(index)
    }

    /// Returns a mutable reference to the element at `index`, or None if it is out of
    /// bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.deref_mut().get_mut(index)
    }

    /// Overwrites the element at `index` with `value`, returning the previous element.
    ///
    /// # Errors
    /// [`IndexOutOfBounds`] if `index >= len`; the Vector is unchanged.
    pub fn replace(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }
        Ok(mem::replace(&mut self.deref_mut()[index], value))
    }

    /// Drops every element. The capacity (and its allocation) is retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops every element past the first `len`. Does nothing if the Vector is already
    /// that short.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.len -= 1;
            // SAFETY: The slot at the decremented len is initialized, in bounds and
            // about to become unreachable.
            unsafe { ptr::drop_in_place(self.buf.ptr.add(self.len).as_ptr()) };
        }
    }

    /// Produces a new Vector by applying `f` to every element in order. Uses the same
    /// backend and secure flag as self.
    ///
    /// Fails atomically: if any allocation fails, the partial output is released and
    /// the error returned.
    pub fn map<U, F>(&self, mut f: F) -> Result<Vector<U, A>, AllocError>
    where
        F: FnMut(&T) -> U,
    {
        let mut out = Vector {
            buf: RawBuf::new_in(self.allocator().clone()),
            len: 0,
            secure: self.secure,
        };
        out.reserve(self.len)?;

        for item in self.iter() {
            // SAFETY: The output was created with capacity for every element of self.
            unsafe { out.push_unchecked(f(item)) };
        }

        Ok(out)
    }

    /// Produces a new Vector containing clones of the elements for which `predicate`
    /// holds, preserving order. Uses the same backend and secure flag as self.
    ///
    /// Fails atomically, as [`map`](Vector::map) does.
    pub fn filter<P>(&self, mut predicate: P) -> Result<Vector<T, A>, AllocError>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        let mut out = Vector {
            buf: RawBuf::new_in(self.allocator().clone()),
            len: 0,
            secure: self.secure,
        };

        for item in self.iter() {
            if predicate(item) {
                out.push(item.clone())?;
            }
        }

        Ok(out)
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.deref().iter()
    }

    /// Returns a mutable iterator over the elements, front to back.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.deref_mut().iter_mut()
    }

    /// Returns a [`Cursor`] walking the elements front to back.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::over_slice(self)
    }

    /// Clones self into a new Vector, reporting allocation failure instead of
    /// panicking.
    pub fn try_clone(&self) -> Result<Vector<T, A>, AllocError>
    where
        T: Clone,
    {
        self.map(T::clone)
    }
}

impl<T, A: RawAllocator> Vector<T, A> {
    pub(crate) fn grow(&mut self) -> Result<(), AllocError> {
        let new_cap = if self.cap() == 0 {
            FIRST_CAP
        } else {
            // A doubled capacity that wraps is rejected before any allocation.
            arith::checked_mul(self.cap(), GROWTH_FACTOR)?
        };

        self.buf.grow_to(new_cap)?;
        Ok(())
    }

    pub(crate) fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "index {} out of bounds for collection with {} elements",
            index,
            self.len
        );
    }
}

impl<T, A: RawAllocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        // The buffer would release itself, but only an explicit release carries the
        // wipe flag.
        self.buf.release(self.secure);
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: RawAllocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: All slots below len are initialized, the pointer is aligned (or
        // dangling-but-aligned for cap 0) and len * size_of::<T>() was checked against
        // isize::MAX when the buffer grew.
        unsafe { slice::from_raw_parts(self.buf.ptr.as_ptr(), self.len) }
    }
}

impl<T, A: RawAllocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As Deref; the mutable borrow of self makes the slice exclusive.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr.as_ptr(), self.len) }
    }
}

impl<T, A: RawAllocator> Index<usize> for Vector<T, A> {
    type Output = T;

    /// # Panics
    /// Panics if the provided index is out of bounds. See [`Vector::get`] for the
    /// checked equivalent.
    fn index(&self, index: usize) -> &Self::Output {
        self.check_index(index);
        &self.deref()[index]
    }
}

impl<T, A: RawAllocator> IndexMut<usize> for Vector<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.check_index(index);
        &mut self.deref_mut()[index]
    }
}

impl<T, A: RawAllocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T, A: RawAllocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T, A: RawAllocator> Borrow<[T]> for Vector<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T, A: RawAllocator> BorrowMut<[T]> for Vector<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    /// # Panics
    /// Panics on allocation failure; collect from iterators only where that is
    /// acceptable, otherwise push in a loop and handle the error.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Vector::new();
        for item in iter {
            match vec.push(item) {
                Ok(()) => {},
                Err(err) => panic!("{err}"),
            }
        }
        vec
    }
}

// SAFETY: Vectors rely on unique pointers and are therefore safe to Send when both the
// elements and the backend are.
unsafe impl<T: Send, A: RawAllocator + Send> Send for Vector<T, A> {}
// SAFETY: Vector's safe API obeys all rules of the borrow checker, so no interior
// mutability occurs.
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for Vector<T, A> {}

impl<T: PartialEq, A: RawAllocator> PartialEq for Vector<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: RawAllocator> Eq for Vector<T, A> {}

impl<T: Debug, A: RawAllocator> Debug for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &self.deref())
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("secure", &self.secure)
            .finish()
    }
}

impl<T: Debug, A: RawAllocator> Display for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
