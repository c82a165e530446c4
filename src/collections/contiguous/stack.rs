//! A LIFO stack composed over [`Vector`].

use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Deref;
use std::slice;

use super::Vector;
use crate::alloc::{Global, RawAllocator};
use crate::collections::cursor::Cursor;
use crate::util::error::AllocError;

/// A LIFO stack.
///
/// Stack is a newtype over [`Vector`] that narrows the API to stack discipline: the
/// only element reachable for mutation is the top. It shares Vector's growth policy,
/// typed allocation failure and secure release behavior.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Stack.
///
/// | Method | Complexity |
/// |-|-|
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `peek` | `O(1)` |
/// | `len` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* If the Stack doesn't have enough capacity for the new element, `push` takes
/// `O(n)`.
pub struct Stack<T, A: RawAllocator = Global>(Vector<T, A>);

impl<T> Stack<T> {
    /// Creates a new Stack with length and capacity 0. Memory will be allocated on
    /// first push.
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::contiguous::Stack;
    /// # use nanods::collections::contiguous::vector::AllocError;
    /// let mut stack = Stack::new();
    /// stack.push('a')?;
    /// stack.push('b')?;
    /// assert_eq!(stack.pop(), Some('b'));
    /// assert_eq!(stack.pop(), Some('a'));
    /// assert_eq!(stack.pop(), None);
    /// # Ok::<(), AllocError>(())
    /// ```
    pub const fn new() -> Stack<T> {
        Stack(Vector::new())
    }

    /// As [`Stack::new`], but the backing allocation is zeroed before release.
    pub const fn secure() -> Stack<T> {
        Stack(Vector::secure())
    }
}

impl<T, A: RawAllocator> Stack<T, A> {
    /// Creates a new empty Stack that acquires memory through `alloc`.
    pub const fn new_in(alloc: A) -> Stack<T, A> {
        Stack(Vector::new_in(alloc))
    }

    /// As [`Stack::new_in`], but the backing allocation is zeroed before release.
    pub const fn secure_in(alloc: A) -> Stack<T, A> {
        Stack(Vector::secure_in(alloc))
    }

    /// Returns the number of elements on the Stack.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the Stack contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the current capacity of the Stack.
    pub const fn cap(&self) -> usize {
        self.0.cap()
    }

    /// Returns true if the backing memory will be zeroed before release.
    pub const fn is_secure(&self) -> bool {
        self.0.is_secure()
    }

    /// Grows the capacity to exactly `cap`, as [`Vector::reserve`].
    pub fn reserve(&mut self, cap: usize) -> Result<(), AllocError> {
        self.0.reserve(cap)
    }

    /// Pushes the provided value onto the top of the Stack.
    ///
    /// # Errors
    /// [`AllocError`] if growth is required and fails; the Stack is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        self.0.push(value)
    }

    /// Pops the top value off the Stack, returning an owned value if the Stack has
    /// length greater than 0.
    pub fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }

    /// Returns a reference to the top value without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.0.get(self.len().checked_sub(1)?)
    }

    /// Returns a mutable reference to the top value without removing it.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        let index = self.len().checked_sub(1)?;
        self.0.get_mut(index)
    }

    /// Drops every element. The capacity is retained.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns an iterator over the elements, bottom to top.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Returns a [`Cursor`] walking the elements bottom to top.
    pub fn cursor(&self) -> Cursor<'_, T> {
        self.0.cursor()
    }

    /// Consumes the Stack, returning the underlying [`Vector`] with the bottom element
    /// first.
    pub fn into_vector(self) -> Vector<T, A> {
        self.0
    }
}

impl<T, A: RawAllocator> From<Vector<T, A>> for Stack<T, A> {
    /// Reinterprets a Vector as a Stack; the last element becomes the top.
    fn from(vec: Vector<T, A>) -> Stack<T, A> {
        Stack(vec)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq, A: RawAllocator> PartialEq for Stack<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq, A: RawAllocator> Eq for Stack<T, A> {}

impl<T: Debug, A: RawAllocator> Debug for Stack<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("contents", &self.0.deref())
            .field("len", &self.len())
            .field("cap", &self.cap())
            .field("secure", &self.is_secure())
            .finish()
    }
}

impl<T: Debug, A: RawAllocator> Display for Stack<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::OutOfMemory;
    use crate::util::testing::FailAfter;

    #[test]
    fn test_lifo_order() {
        let mut stack = Stack::new();
        for i in 0..5 {
            stack.push(i).unwrap();
        }
        assert_eq!(stack.len(), 5);

        for i in (0..5).rev() {
            assert_eq!(stack.pop(), Some(i), "Pops should come in reverse order.");
        }
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_peek() {
        let mut stack = Stack::new();
        assert_eq!(stack.peek(), None, "Peek on an empty Stack should be None.");

        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(stack.peek(), Some(&2));
        assert_eq!(stack.len(), 2, "Peek should not remove the element.");

        *stack.peek_mut().unwrap() = 9;
        assert_eq!(stack.pop(), Some(9));
        assert_eq!(stack.peek(), Some(&1));
    }

    #[test]
    fn test_failing_backend() {
        let mut stack = Stack::new_in(FailAfter::new(0));
        assert_eq!(stack.push(0), Err(OutOfMemory.into()));
        assert!(stack.is_empty(), "A failed push should leave the Stack empty.");
    }

    #[test]
    fn test_vector_round_trip() {
        let mut vec = Vector::new();
        for i in 0..3 {
            vec.push(i).unwrap();
        }

        let mut stack = Stack::from(vec);
        assert_eq!(stack.pop(), Some(2), "The Vector's last element is the top.");

        let vec = stack.into_vector();
        assert_eq!(&*vec, &[0, 1]);
    }

    #[test]
    fn test_formatting() {
        let mut stack = Stack::new();
        for i in 0..3 {
            stack.push(i).unwrap();
        }
        assert_eq!(format!("{stack}"), "![0, 1, 2]");
        assert!(
            format!("{stack:?}").contains("contents: [0, 1, 2]"),
            "Debug should render the contents slice."
        );
    }

    #[test]
    fn test_cursor() {
        let mut stack = Stack::new();
        for i in 0..3 {
            stack.push(i).unwrap();
        }
        let walked: Vec<i32> = stack.cursor().copied().collect();
        assert_eq!(walked, [0, 1, 2], "The cursor walks bottom to top.");
    }
}
