//! Overflow-checked size arithmetic. Every capacity-to-byte-size conversion in the
//! crate routes through here before any allocator is involved.

use std::alloc::Layout;

use super::error::CapacityOverflow;

/// The largest allocation size a single object may occupy.
pub(crate) const MAX_BYTES: usize = isize::MAX as usize;

/// Multiplies two magnitudes, failing instead of wrapping.
pub(crate) const fn checked_mul(a: usize, b: usize) -> Result<usize, CapacityOverflow> {
    match a.checked_mul(b) {
        Some(product) => Ok(product),
        None => Err(CapacityOverflow),
    }
}

/// Builds the [`Layout`] for `cap` elements of `T`, rejecting any byte size that
/// overflows or exceeds [`MAX_BYTES`].
pub(crate) fn array_layout<T>(cap: usize) -> Result<Layout, CapacityOverflow> {
    let bytes = checked_mul(cap, size_of::<T>())?;
    if bytes > MAX_BYTES {
        return Err(CapacityOverflow);
    }
    Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_mul() {
        assert_eq!(checked_mul(3, 4), Ok(12));
        assert_eq!(checked_mul(0, usize::MAX), Ok(0));
        assert_eq!(checked_mul(usize::MAX, 2), Err(CapacityOverflow));
    }

    #[test]
    fn test_array_layout_rejects_huge_capacities() {
        assert!(array_layout::<u64>(8).is_ok());
        assert_eq!(array_layout::<u64>(usize::MAX / 4), Err(CapacityOverflow));
        assert_eq!(array_layout::<u8>(MAX_BYTES + 1), Err(CapacityOverflow));
    }

    #[test]
    fn test_array_layout_zero_sized() {
        let layout = array_layout::<()>(usize::MAX).expect("ZSTs never overflow");
        assert_eq!(layout.size(), 0);
    }
}
