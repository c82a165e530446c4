//! The raw growable buffer underneath [`Vector`](super::Vector): a pointer, a
//! capacity and the allocation backend, with no knowledge of which slots are
//! initialized.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::alloc::RawAllocator;
use crate::util::arith;
use crate::util::error::AllocError;
use crate::util::wipe;

pub(crate) struct RawBuf<T, A: RawAllocator> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T, A: RawAllocator> RawBuf<T, A> {
    /// An empty buffer: dangling pointer, no allocation.
    pub(crate) const fn new_in(alloc: A) -> RawBuf<T, A> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    pub(crate) const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Grows the buffer to exactly `new_cap` slots. No-op if the buffer is already at
    /// least that large. On failure the buffer is unchanged.
    ///
    /// Capacity is byte-size-checked through [`arith::array_layout`] before the
    /// backend is involved. Zero-sized types never allocate; their capacity is pure
    /// bookkeeping.
    pub(crate) fn grow_to(&mut self, new_cap: usize) -> Result<(), AllocError> {
        if new_cap <= self.cap {
            return Ok(());
        }
        if size_of::<T>() == 0 {
            self.cap = new_cap;
            return Ok(());
        }

        let new_layout = arith::array_layout::<T>(new_cap)?;

        let raw = if self.cap == 0 {
            // SAFETY: new_cap > 0 and T is not zero-sized, so the layout has non-zero
            // size.
            unsafe { self.alloc.allocate(new_layout)? }
        } else {
            // SAFETY: ptr was acquired from this backend with the live layout, and
            // the new size has just been validated against isize::MAX.
            unsafe {
                self.alloc
                    .reallocate(self.ptr.cast(), self.live_layout(), new_layout.size())?
            }
        };

        self.ptr = raw.cast();
        self.cap = new_cap;
        Ok(())
    }

    /// Releases the allocation, zeroing it first when `wipe` is set, and resets the
    /// buffer to empty. Idempotent.
    pub(crate) fn release(&mut self, wipe: bool) {
        if self.cap != 0 && size_of::<T>() != 0 {
            let layout = self.live_layout();
            if wipe {
                // SAFETY: The allocation is still live for layout.size() bytes.
                unsafe { wipe::wipe_region(self.ptr.as_ptr().cast(), layout.size()) };
            }
            // SAFETY: ptr was acquired from this backend with this layout.
            unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    fn live_layout(&self) -> Layout {
        match arith::array_layout::<T>(self.cap) {
            Ok(layout) => layout,
            // The capacity was validated when the buffer last grew.
            Err(_) => unreachable!(),
        }
    }
}

impl<T, A: RawAllocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        self.release(false);
    }
}
