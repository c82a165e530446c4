//! A variable size contiguous collection with typed allocation failure.

pub mod iter;
pub mod vector;

mod tests;

#[doc(inline)]
pub use iter::IntoIter;
#[doc(inline)]
pub use vector::Vector;

#[doc(inline)]
pub use crate::util::error::{AllocError, CapacityOverflow, IndexOutOfBounds, OutOfMemory};
