//! NanoDS: a small library of generic containers with an explicit resource discipline.
//!
//! # Purpose
//! Every container here shares one contract: allocation failure is reported as a typed
//! value instead of aborting, all capacity-to-byte-size arithmetic is overflow-checked
//! before it reaches the allocator, and any container can opt in to having its backing
//! memory zeroed before release. The hash map additionally seeds its hash function
//! per-instance so adversarially chosen keys can't force worst-case bucket chains
//! across runs.
//!
//! # Containers
//! - [`Vector`](collections::contiguous::Vector): growable contiguous buffer.
//! - [`Stack`](collections::contiguous::Stack): LIFO view composed over `Vector`.
//! - [`List`](collections::linked::List): singly linked list with O(1) ends (no
//!   `pop_back`, by design).
//! - [`List2`](collections::linked::List2): doubly linked list over a slot arena,
//!   addressable through validated [`NodeHandle`](collections::linked::NodeHandle)s.
//! - [`Ring`](collections::ring::Ring): fixed-capacity circular buffer with no heap
//!   allocation at all.
//! - [`Map`](collections::hash::Map): string-keyed hash map over chained buckets with
//!   seeded FNV-1a hashing.
//! - [`Cursor`](collections::cursor::Cursor): one cursor type that walks any of the
//!   above uniformly.
//!
//! # Error Handling
//! Fallible operations return strongly typed errors via [`Result`], using enums for
//! static dispatch with small structs (often ZSTs) that implement
//! [`Error`](std::error::Error). Expected misses (`pop` on empty, lookup of an absent
//! key) are [`Option`]s. Programmer errors (indexing out of bounds) panic through the
//! panicking convenience layer only; every checked operation returns a value instead.
//!
//! # Allocation
//! Containers do not assume the global allocator. Each heap-using container is generic
//! over a [`RawAllocator`](alloc::RawAllocator) backend, defaulting to
//! [`Global`](alloc::Global), and takes the backend by value through its `*_in`
//! constructors. This crate does not use [`Vec`] at all.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
pub mod collections;

pub(crate) mod util;
