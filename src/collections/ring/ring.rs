use std::fmt::{self, Debug, Display, Formatter};
use std::mem::MaybeUninit;

use crate::collections::cursor::Cursor;
use crate::util::error::{Empty, Full};
use crate::util::wipe;

/// A fixed capacity FIFO ring buffer.
///
/// The `N` slots live inline in the Ring itself, so a Ring never allocates and never
/// fails for lack of memory: a write to a full Ring is rejected with [`Full`], which
/// hands the value back to the caller. Reads come out in write order. A Ring
/// constructed with [`secure`](Ring::secure) zeroes each slot as soon as its value
/// leaves the buffer.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Ring.
///
/// | Method | Complexity |
/// |-|-|
/// | `write` | `O(1)` |
/// | `read` | `O(1)` |
/// | `peek` | `O(1)` |
/// | `len` | `O(1)` |
/// | `clear` | `O(n)` |
pub struct Ring<T, const N: usize> {
    pub(crate) data: [MaybeUninit<T>; N],
    pub(crate) head: usize,
    pub(crate) len: usize,
    pub(crate) secure: bool,
}

impl<T, const N: usize> Ring<T, N> {
    /// Creates a new empty Ring with all `N` slots uninitialized.
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::ring::Ring;
    /// let mut ring: Ring<u8, 4> = Ring::new();
    /// assert!(ring.write(1).is_ok());
    /// assert_eq!(ring.read(), Ok(1));
    /// ```
    pub const fn new() -> Ring<T, N> {
        Ring {
            data: [const { MaybeUninit::uninit() }; N],
            head: 0,
            len: 0,
            secure: false,
        }
    }

    /// As [`Ring::new`], but each slot is zeroed as soon as its value leaves the
    /// buffer, and [`clear`](Ring::clear) zeroes the whole storage.
    pub const fn secure() -> Ring<T, N> {
        Ring {
            data: [const { MaybeUninit::uninit() }; N],
            head: 0,
            len: 0,
            secure: true,
        }
    }

    /// Returns the number of elements in the Ring.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Ring contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if every slot is occupied.
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the fixed capacity `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if vacated slots are zeroed.
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Writes the provided value into the next free slot.
    ///
    /// # Errors
    /// [`Full`] if every slot is occupied; the rejected value rides back in the error.
    pub fn write(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }
        // len < N here, so N > 0 and the index is in bounds.
        let slot = (self.head + self.len) % N;
        self.data[slot].write(value);
        self.len += 1;
        Ok(())
    }

    /// Reads the oldest value out of the Ring.
    ///
    /// # Errors
    /// [`Empty`] if the Ring contains no elements.
    pub fn read(&mut self) -> Result<T, Empty> {
        if self.is_empty() {
            return Err(Empty);
        }
        let slot = self.head;
        // SAFETY: len > 0, so the slot at head holds an initialized value, and the
        // cursor advance below makes this the only live copy.
        let value = unsafe { self.data[slot].assume_init_read() };
        if self.secure {
            // SAFETY: The slot is inline storage of size_of::<T>() bytes and its
            // contents have been moved out.
            unsafe { wipe::wipe_region(self.data[slot].as_mut_ptr().cast(), size_of::<T>()) };
        }
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Ok(value)
    }

    /// Returns a reference to the oldest value without removing it.
    ///
    /// # Errors
    /// [`Empty`] if the Ring contains no elements.
    pub fn peek(&self) -> Result<&T, Empty> {
        if self.is_empty() {
            return Err(Empty);
        }
        // SAFETY: len > 0, so the slot at head holds an initialized value.
        Ok(unsafe { self.data[self.head].assume_init_ref() })
    }

    /// Drops every element. A secure Ring zeroes the entire inline storage, occupied
    /// or not.
    pub fn clear(&mut self) {
        for offset in 0..self.len {
            let slot = (self.head + offset) % N;
            // SAFETY: Offsets below len address initialized slots, each dropped
            // exactly once; len is reset before the loop can be observed again.
            unsafe { self.data[slot].assume_init_drop() };
        }
        if self.secure && N != 0 && size_of::<T>() != 0 {
            // SAFETY: The whole array is inline storage and no slot is live anymore.
            unsafe {
                wipe::wipe_region(self.data.as_mut_ptr().cast(), size_of::<T>() * N);
            }
        }
        self.head = 0;
        self.len = 0;
    }

    /// Returns an iterator over the elements, oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter { ring: self, offset: 0 }
    }

    /// Returns a [`Cursor`] walking the elements oldest to newest.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::over_ring(&self.data, self.head, self.len)
    }
}

impl<T, const N: usize> Drop for Ring<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for Ring<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for Ring<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const N: usize> Eq for Ring<T, N> {}

impl<T, const N: usize> Debug for Ring<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("head", &self.head)
            .field("len", &self.len)
            .field("cap", &N)
            .field("secure", &self.secure)
            .finish()
    }
}

impl<T: Debug, const N: usize> Display for Ring<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

/// A borrowing iterator over a [`Ring`], oldest to newest.
pub struct Iter<'a, T, const N: usize> {
    ring: &'a Ring<T, N>,
    offset: usize,
}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Iter {
            ring: self.ring,
            offset: self.offset,
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset == self.ring.len {
            return None;
        }
        let slot = (self.ring.head + self.offset) % N;
        self.offset += 1;
        // SAFETY: Offsets below len address initialized slots.
        Some(unsafe { self.ring.data[slot].assume_init_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

impl<'a, T, const N: usize> IntoIterator for &'a Ring<T, N> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug, const N: usize> Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
