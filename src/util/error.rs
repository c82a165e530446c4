use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant};

/// A checked index was outside the populated range of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A capacity-to-byte-size computation would overflow the platform's addressable size.
///
/// The operation that produced this error has not modified its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The allocation backend reported failure for a well-formed request.
///
/// The operation that produced this error has not modified its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfMemory;

impl Display for OutOfMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Allocation failed!")
    }
}

impl Error for OutOfMemory {}

/// A destructive read was attempted on a container with no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl Display for Empty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Container is empty!")
    }
}

impl Error for Empty {}

/// A write was attempted on a ring buffer whose every slot is occupied.
///
/// The rejected value is handed back so the caller can retry after making room.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that the ring buffer refused to accept.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Debug for Full<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // No Debug bound on T; the payload isn't part of the diagnostic.
        write!(f, "Full(..)")
    }
}

impl<T> Display for Full<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Ring buffer is full!")
    }
}

impl<T> Error for Full<T> {}

/// A node handle didn't resolve to a live node of the list it was given to.
///
/// Produced when the handle's slot has been vacated or recycled since the handle was
/// issued. This is the reportable form of what would otherwise be a use-after-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleHandle;

impl Display for StaleHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Node handle is stale or does not belong to this list!")
    }
}

impl Error for StaleHandle {}

/// Either of the two ways acquiring memory can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, IsVariant)]
pub enum AllocError {
    CapacityOverflow(CapacityOverflow),
    OutOfMemory(OutOfMemory),
}

/// Everything that can go wrong with a handle-addressed list mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, IsVariant)]
pub enum List2Error {
    Alloc(AllocError),
    StaleHandle(StaleHandle),
}

impl From<CapacityOverflow> for List2Error {
    fn from(value: CapacityOverflow) -> Self {
        List2Error::Alloc(value.into())
    }
}

impl From<OutOfMemory> for List2Error {
    fn from(value: OutOfMemory) -> Self {
        List2Error::Alloc(value.into())
    }
}
