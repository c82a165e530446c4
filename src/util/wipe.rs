//! Secure-wipe primitives: zero a memory region before it is released, so sensitive
//! element data can't linger in freed allocations.

use std::ptr;
use std::sync::atomic::{Ordering, compiler_fence};

/// Zeroes `bytes` bytes starting at `ptr`. The fence keeps the store from being
/// elided as a dead write ahead of a following deallocation.
///
/// # Safety
/// `ptr` must be valid for writes of `bytes` bytes.
pub(crate) unsafe fn wipe_region(ptr: *mut u8, bytes: usize) {
    if bytes == 0 {
        return;
    }
    // SAFETY: The caller guarantees the region is writable for `bytes` bytes.
    unsafe { ptr::write_bytes(ptr, 0, bytes) };
    compiler_fence(Ordering::SeqCst);
}

/// Overwrites a string's bytes with zeroes, in place. The length is unchanged; NUL is
/// valid UTF-8, so the string stays well formed.
pub(crate) fn wipe_string(s: &mut String) {
    // SAFETY: The pointer and length come from the string itself.
    unsafe { wipe_region(s.as_mut_ptr(), s.len()) };
}
