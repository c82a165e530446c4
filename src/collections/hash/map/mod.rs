//! A string-keyed map with seeded hashing and chained buckets.

pub mod iter;
pub mod map;


#[doc(inline)]
pub use iter::{Iter, Keys, Values, ValuesMut};
#[doc(inline)]
pub use map::Map;

#[doc(inline)]
pub use crate::util::error::{AllocError, CapacityOverflow, OutOfMemory};
