use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;

use super::iter::{Iter, IterMut};
use super::node::{Link, Node};
use crate::alloc::{self, Global, RawAllocator};
use crate::collections::cursor::Cursor;
use crate::util::error::AllocError;

/// A list with links in one direction.
///
/// Every element lives in its own node, so pushes allocate exactly one node through
/// the backend and never move existing elements. Both ends are reachable in constant
/// time, but removal is only possible at the front; see [`List2`] for a list that can
/// remove anywhere.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the List.
///
/// | Method | Complexity |
/// |-|-|
/// | `push_front` | `O(1)` |
/// | `push_back` | `O(1)` |
/// | `pop_front` | `O(1)` |
/// | `front` | `O(1)` |
/// | `back` | `O(1)` |
/// | `contains` | `O(n)` |
/// | `clear` | `O(n)` |
///
/// As a general note, modern computer architecture isn't kind to linked lists, so
/// [`Vector`](crate::collections::contiguous::Vector) should be preferred unless the
/// constant time end operations are being heavily utilized.
///
/// [`List2`]: crate::collections::linked::List2
pub struct List<T, A: RawAllocator = Global> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    pub(crate) len: usize,
    pub(crate) secure: bool,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> List<T> {
    /// Creates a new empty List. Memory will be allocated per element as they are
    /// pushed.
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::linked::List;
    /// # use nanods::collections::linked::list::AllocError;
    /// let mut list = List::new();
    /// list.push_back(1)?;
    /// list.push_back(2)?;
    /// list.push_front(0)?;
    /// assert_eq!(list.pop_front(), Some(0));
    /// assert_eq!(list.pop_front(), Some(1));
    /// # Ok::<(), AllocError>(())
    /// ```
    pub const fn new() -> List<T> {
        List::new_in(Global)
    }

    /// As [`List::new`], but each node is zeroed before its memory is released.
    pub const fn secure() -> List<T> {
        List::secure_in(Global)
    }
}

impl<T, A: RawAllocator> List<T, A> {
    /// Creates a new empty List that acquires node memory through `alloc`.
    pub const fn new_in(alloc: A) -> List<T, A> {
        List {
            head: None,
            tail: None,
            len: 0,
            secure: false,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// As [`List::new_in`], but each node is zeroed before its memory is released.
    pub const fn secure_in(alloc: A) -> List<T, A> {
        List {
            head: None,
            tail: None,
            len: 0,
            secure: true,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the List.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the List contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if node memory is zeroed before release.
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the allocation backend this List acquires node memory through.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pushes the provided value onto the front of the List.
    ///
    /// # Errors
    /// [`AllocError`] if the node allocation fails; the List is unchanged.
    pub fn push_front(&mut self, value: T) -> Result<(), AllocError> {
        let node = alloc::box_in(&self.alloc, Node { value, next: self.head })?;
        self.head = Some(node);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;
        Ok(())
    }

    /// Pushes the provided value onto the back of the List.
    ///
    /// # Errors
    /// [`AllocError`] if the node allocation fails; the List is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError> {
        let node = alloc::box_in(&self.alloc, Node { value, next: None })?;
        match self.tail {
            Some(tail) => {
                // SAFETY: tail points to a live node owned by this List, and head
                // borrows nothing from it while we link the new node in.
                unsafe { (*tail.as_ptr()).next = Some(node) };
            },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Pops the value off the front of the List, returning an owned value if the List
    /// has length greater than 0.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head?;
        // SAFETY: head points to a live node owned by this List; the links are
        // rewritten below so the node is unreachable once unboxed.
        self.head = unsafe { (*node.as_ptr()).next };
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        // SAFETY: The node came from box_in with this backend and is now unreachable.
        let node = unsafe { alloc::unbox_in(&self.alloc, node, self.secure) };
        Some(node.value)
    }

    /// Returns a reference to the first element, or None if the List is empty.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: head, when set, points to a live node owned by this List.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the first element, or None if the List is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: As front; the mutable borrow of self makes the reference exclusive.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns a reference to the last element, or None if the List is empty.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: tail, when set, points to a live node owned by this List.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the last element, or None if the List is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: As back; the mutable borrow of self makes the reference exclusive.
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns true if an element equal to `value` is in the List.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    /// Drops every element and releases every node.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            curr: self.head,
            remaining: self.len,
            _phantom: PhantomData,
        }
    }

    /// Returns a mutable iterator over the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            curr: self.head,
            remaining: self.len,
            _phantom: PhantomData,
        }
    }

    /// Returns a [`Cursor`] walking the elements front to back.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::over_list(self)
    }
}

impl<T, A: RawAllocator> List<T, A> {
    /// Walks the chain and checks it against the recorded length and tail. Test use
    /// only.
    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        let mut count = 0;
        let mut last: Link<T> = None;
        let mut curr = self.head;
        while let Some(node) = curr {
            count += 1;
            last = Some(node);
            // SAFETY: Every reachable node is live and owned by this List.
            curr = unsafe { (*node.as_ptr()).next };
        }
        assert_eq!(count, self.len);
        assert_eq!(last, self.tail);
    }
}

impl<T, A: RawAllocator> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List<T> {
    /// # Panics
    /// Panics on allocation failure; collect from iterators only where that is
    /// acceptable, otherwise push in a loop and handle the error.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        for item in iter {
            match list.push_back(item) {
                Ok(()) => {},
                Err(err) => panic!("{err}"),
            }
        }
        list
    }
}

// SAFETY: Lists rely on unique pointers and are therefore safe to Send when both the
// elements and the backend are.
unsafe impl<T: Send, A: RawAllocator + Send> Send for List<T, A> {}
// SAFETY: List's safe API obeys all rules of the borrow checker, so no interior
// mutability occurs.
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for List<T, A> {}

impl<T: PartialEq, A: RawAllocator> PartialEq for List<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: RawAllocator> Eq for List<T, A> {}

impl<T: Debug, A: RawAllocator> Debug for List<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("secure", &self.secure)
            .finish()
    }
}

impl<T: Debug, A: RawAllocator> Display for List<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
