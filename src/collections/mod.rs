//! The container types, grouped by storage shape.
//!
//! # Method
//! All containers share the crate's resource discipline: typed allocation failure,
//! overflow-checked capacity arithmetic, an injected
//! [`RawAllocator`](crate::alloc::RawAllocator) backend and opt-in secure wipe of
//! backing memory on release. Contiguous types implement
//! [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which saves this crate
//! from writing some of the more repetitive functionality.

pub mod contiguous;
pub mod cursor;
pub mod hash;
pub mod linked;
pub mod ring;
