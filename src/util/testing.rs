//! Shared helpers for unit tests: drop counting, a ZST probe and instrumented
//! allocation backends.

use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::rc::Rc;

use crate::alloc::{Global, RawAllocator};
use crate::util::error::OutOfMemory;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// A backend that delegates to [`Global`] while tallying every call, proving that a
/// container routes all of its memory traffic through the injected allocator.
#[derive(Debug, Clone, Default)]
pub struct Counting {
    pub allocs: Rc<Cell<usize>>,
    pub reallocs: Rc<Cell<usize>>,
    pub deallocs: Rc<Cell<usize>>,
}

impl Counting {
    pub fn new() -> Counting {
        Counting::default()
    }

    /// Allocations still outstanding.
    pub fn live(&self) -> usize {
        self.allocs.get() - self.deallocs.get()
    }
}

impl RawAllocator for Counting {
    unsafe fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
        self.allocs.set(self.allocs.get() + 1);
        // SAFETY: Forwarded contract; the caller guarantees a non-zero layout.
        unsafe { Global.allocate(layout) }
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, OutOfMemory> {
        self.reallocs.set(self.reallocs.get() + 1);
        // SAFETY: Forwarded contract; the caller guarantees a live allocation.
        unsafe { Global.reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocs.set(self.deallocs.get() + 1);
        // SAFETY: Forwarded contract; the caller guarantees a live allocation.
        unsafe { Global.deallocate(ptr, layout) }
    }
}

/// A backend that grants a fixed number of acquisitions and then reports
/// [`OutOfMemory`] forever, for exercising failure paths deterministically.
#[derive(Debug, Clone)]
pub struct FailAfter {
    remaining: Rc<Cell<usize>>,
}

impl FailAfter {
    pub fn new(successes: usize) -> FailAfter {
        FailAfter {
            remaining: Rc::new(Cell::new(successes)),
        }
    }

    fn spend(&self) -> Result<(), OutOfMemory> {
        let left = self.remaining.get();
        if left == 0 {
            return Err(OutOfMemory);
        }
        self.remaining.set(left - 1);
        Ok(())
    }
}

impl RawAllocator for FailAfter {
    unsafe fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, OutOfMemory> {
        self.spend()?;
        // SAFETY: Forwarded contract; the caller guarantees a non-zero layout.
        unsafe { Global.allocate(layout) }
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, OutOfMemory> {
        self.spend()?;
        // SAFETY: Forwarded contract; the caller guarantees a live allocation.
        unsafe { Global.reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // Releases always succeed.
        // SAFETY: Forwarded contract; the caller guarantees a live allocation.
        unsafe { Global.deallocate(ptr, layout) }
    }
}
