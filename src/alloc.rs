//! The allocation backend abstraction used by every heap-allocating container.
//!
//! Rather than a process-wide mutable allocator record, each container is generic over
//! a [`RawAllocator`] and receives its backend by value through the container's `*_in`
//! constructors. [`Global`] is the default and forwards to [`std::alloc`]. Hosts that
//! want arena or pool allocation implement the trait and hand an instance to each
//! container they create, which keeps behavior deterministic and testable without any
//! global setup ordering.
//!
//! Failure is a value: backends report [`OutOfMemory`] instead of calling
//! [`handle_alloc_error`](std::alloc::handle_alloc_error), so callers can branch on
//! allocation failure like any other error.

use std::alloc;
use std::alloc::Layout;
use std::ptr::{self, NonNull};

#[doc(inline)]
pub use crate::util::error::OutOfMemory;
use crate::util::wipe;

/// A malloc/realloc/free triple behind which all container storage is acquired.
///
/// Zero-sized requests never reach a backend: containers use dangling pointers for
/// empty and zero-sized-type storage, so implementations may assume every layout they
/// see has a non-zero size.
///
/// Backends are held by value inside containers and cloned into derived containers
/// (e.g. the output of [`Vector::map`](crate::collections::contiguous::Vector::map)),
/// so implementations are expected to be cheap handles.
pub trait RawAllocator: Clone {
    /// Acquires a block of memory fitting `layout`.
    ///
    /// # Safety
    /// `layout` must have a non-zero size.
    unsafe fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory>;

    /// Grows or shrinks a previously acquired block to `new_size` bytes, moving it if
    /// necessary. On failure the original block is untouched and still owned by the
    /// caller.
    ///
    /// # Safety
    /// `ptr` must have been acquired from this backend with `old_layout`, and
    /// `new_size` must be non-zero and must not overflow [`isize::MAX`] when rounded
    /// up to `old_layout`'s alignment.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, OutOfMemory>;

    /// Releases a previously acquired block.
    ///
    /// # Safety
    /// `ptr` must have been acquired from this backend with `layout` and must not be
    /// used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The default backend: the process's global allocator via [`std::alloc`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl RawAllocator for Global {
    unsafe fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
        // SAFETY: The caller guarantees a non-zero layout size.
        let raw = unsafe { alloc::alloc(layout) };
        NonNull::new(raw).ok_or(OutOfMemory)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, OutOfMemory> {
        // SAFETY: The caller guarantees that ptr/old_layout name a live allocation in
        // this backend and that new_size is valid for the alignment.
        let raw = unsafe { alloc::realloc(ptr.as_ptr(), old_layout, new_size) };
        NonNull::new(raw).ok_or(OutOfMemory)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller guarantees that ptr/layout name a live allocation in this
        // backend.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    }
}

/// Allocates a single `T` through `alloc` and moves `value` into it.
pub(crate) fn box_in<T, A: RawAllocator>(
    alloc: &A,
    value: T,
) -> Result<NonNull<T>, OutOfMemory> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        let ptr = NonNull::<T>::dangling();
        // SAFETY: Writes of zero-sized values are valid through any aligned pointer.
        unsafe { ptr.as_ptr().write(value) };
        return Ok(ptr);
    }

    // SAFETY: The layout has non-zero size.
    let raw = unsafe { alloc.allocate(layout)? };
    let ptr = raw.cast::<T>();
    // SAFETY: The allocation fits a T and is exclusively ours.
    unsafe { ptr.as_ptr().write(value) };
    Ok(ptr)
}

/// Moves the value out of a node allocated by [`box_in`] and releases the node,
/// zeroing the node's memory first when `wipe` is set.
///
/// # Safety
/// `ptr` must have been produced by [`box_in`] with the same backend and must not be
/// used afterwards.
pub(crate) unsafe fn unbox_in<T, A: RawAllocator>(alloc: &A, ptr: NonNull<T>, wipe: bool) -> T {
    // SAFETY: ptr refers to an initialized T owned by the caller; the heap copy is
    // abandoned below, making this the only live copy.
    let value = unsafe { ptr::read(ptr.as_ptr()) };

    let layout = Layout::new::<T>();
    if layout.size() != 0 {
        if wipe {
            // SAFETY: The node memory is still allocated for layout.size() bytes.
            unsafe { wipe::wipe_region(ptr.as_ptr().cast(), layout.size()) };
        }
        // SAFETY: The caller guarantees ptr came from box_in with this backend.
        unsafe { alloc.deallocate(ptr.cast(), layout) };
    }

    value
}
