//! String-keyed hashing: the seeded FNV-1a function and the chained-bucket [`Map`]
//! built on it.

pub mod map;

pub(crate) mod fnv;

#[doc(inline)]
pub use map::Map;
