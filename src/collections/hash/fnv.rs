//! Seeded 32-bit FNV-1a.
//!
//! The seed is folded into the offset basis before any input byte is mixed, so two
//! maps with different seeds distribute the same keys differently. That denies an
//! input-crafting adversary a universal set of colliding keys, since the seed of a
//! freshly built map is drawn from runtime entropy.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
pub(crate) const FNV_PRIME: u32 = 0x0100_0193;

/// Hashes `bytes` with FNV-1a, starting from the offset basis perturbed by `seed`.
pub(crate) fn hash_seeded(seed: u32, bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS ^ seed;
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Draws a seed from runtime entropy: the sub-second clock mixed with address space
/// layout and a process-wide draw counter. Not cryptographic, but different per
/// process and per construction, which is all the anti-collision scheme asks for.
pub(crate) fn entropy_seed() -> u32 {
    static DRAWS: AtomicU32 = AtomicU32::new(0);

    let nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.subsec_nanos(),
        Err(_) => 0,
    };
    let probe = 0_u8;
    let address = &probe as *const u8 as usize as u64;
    // The counter keeps two draws distinct even under a coarse clock.
    let draw = DRAWS.fetch_add(1, Ordering::Relaxed).wrapping_mul(0x9E37_79B9);
    nanos ^ draw ^ (address as u32) ^ ((address >> 32) as u32)
}
