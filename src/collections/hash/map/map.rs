use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ptr::NonNull;

use super::iter::{Iter, Keys, Values, ValuesMut};
use crate::alloc::{self, Global, RawAllocator};
use crate::collections::contiguous::Vector;
use crate::collections::cursor::Cursor;
use crate::collections::hash::fnv;
use crate::util::error::AllocError;
use crate::util::wipe;

/// Buckets allocated the first time a key is set.
pub(crate) const DEFAULT_BUCKETS: usize = 16;

pub(crate) type BucketLink<V> = Option<NonNull<MapNode<V>>>;

pub(crate) struct MapNode<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: BucketLink<V>,
}

/// A string-keyed map.
///
/// Collisions are chained: the bucket array holds chain heads and each entry is a
/// separately allocated node, prepended on insertion. Keys are hashed with seeded
/// FNV-1a and the seed is drawn per map at construction, so colliding keys crafted
/// against one map say nothing about another. The bucket count is fixed once
/// allocated; there is no automatic rehash, so the load factor grows with the entry
/// count and lookups degrade gracefully rather than reallocating behind the caller's
/// back. Size the map with [`with_buckets`](Map::with_buckets) when the population is
/// known to be large.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the Map.
/// - `b`: The number of buckets.
///
/// | Method | Complexity |
/// |-|-|
/// | `set` | `O(n/b)` expected |
/// | `get` | `O(n/b)` expected |
/// | `remove` | `O(n/b)` expected |
/// | `len` | `O(1)` |
/// | `clear` | `O(n + b)` |
pub struct Map<V, A: RawAllocator = Global> {
    pub(crate) buckets: Vector<BucketLink<V>, A>,
    pub(crate) len: usize,
    pub(crate) seed: u32,
}

impl<V> Map<V> {
    /// Creates a new empty Map with a seed drawn from runtime entropy. The bucket
    /// array is allocated on first [`set`](Map::set).
    ///
    /// # Examples
    /// ```
    /// # use nanods::collections::hash::Map;
    /// # use nanods::collections::hash::map::AllocError;
    /// let mut map = Map::new();
    /// assert_eq!(map.set("one", 1)?, None);
    /// assert_eq!(map.set("one", 10)?, Some(1));
    /// assert_eq!(map.get("one"), Some(&10));
    /// assert_eq!(map.get("two"), None);
    /// # Ok::<(), AllocError>(())
    /// ```
    pub fn new() -> Map<V> {
        Map::new_in(Global)
    }

    /// As [`Map::new`], but removed entries' node memory and key bytes are zeroed
    /// before release.
    pub fn secure() -> Map<V> {
        Map::secure_in(Global)
    }

    /// Creates a new empty Map hashing with the provided seed. Deterministic;
    /// intended for tests and reproducible layouts.
    pub const fn with_seed(seed: u32) -> Map<V> {
        Map {
            buckets: Vector::new(),
            len: 0,
            seed,
        }
    }

    /// Creates a new Map with `buckets` buckets allocated up front instead of the
    /// lazy default.
    ///
    /// # Errors
    /// [`AllocError`] if the bucket array cannot be allocated.
    pub fn with_buckets(buckets: usize) -> Result<Map<V>, AllocError> {
        let mut map = Map::new();
        map.allocate_buckets(buckets)?;
        Ok(map)
    }
}

impl<V, A: RawAllocator> Map<V, A> {
    /// Creates a new empty Map that acquires memory through `alloc`, seeded from
    /// runtime entropy.
    pub fn new_in(alloc: A) -> Map<V, A> {
        Map {
            buckets: Vector::new_in(alloc),
            len: 0,
            seed: fnv::entropy_seed(),
        }
    }

    /// As [`Map::new_in`], but with the secure wipe behavior of [`Map::secure`].
    pub fn secure_in(alloc: A) -> Map<V, A> {
        Map {
            buckets: Vector::secure_in(alloc),
            len: 0,
            seed: fnv::entropy_seed(),
        }
    }

    /// Returns the number of entries in the Map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Map contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets, which is 0 until the first set (or
    /// [`with_buckets`](Map::with_buckets)) and fixed afterwards.
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the seed this Map hashes with.
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns true if removed entries are zeroed before their memory is released.
    pub const fn is_secure(&self) -> bool {
        self.buckets.is_secure()
    }

    /// Entries per bucket; a rough measure of expected chain length. 0.0 for a map
    /// with no buckets yet.
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.len as f64 / self.buckets.len() as f64
    }

    /// Sets `key` to `value`. An existing entry is overwritten in place and the
    /// previous value returned; a new entry is prepended to its bucket's chain.
    ///
    /// # Errors
    /// [`AllocError`] if the bucket array or the entry node cannot be allocated; no
    /// entry is added or altered on failure.
    pub fn set(&mut self, key: &str, value: V) -> Result<Option<V>, AllocError> {
        if self.buckets.is_empty() {
            self.allocate_buckets(DEFAULT_BUCKETS)?;
        }
        let index = self.bucket_index(key);

        let mut curr = self.buckets[index];
        while let Some(node) = curr {
            // SAFETY: Chain nodes are live and owned by this Map; the mutable borrow
            // of self makes the access exclusive.
            let node = unsafe { &mut *node.as_ptr() };
            if node.key == key {
                return Ok(Some(mem::replace(&mut node.value, value)));
            }
            curr = node.next;
        }

        let node = alloc::box_in(
            self.buckets.allocator(),
            MapNode {
                key: key.to_owned(),
                value,
                next: self.buckets[index],
            },
        )?;
        self.buckets[index] = Some(node);
        self.len += 1;
        Ok(None)
    }

    /// Returns a reference to the value stored under `key`, or None if the key is
    /// absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut curr = *self.buckets.get(self.bucket_index_checked(key)?)?;
        while let Some(node) = curr {
            // SAFETY: Chain nodes are live and owned by this Map.
            let node = unsafe { &*node.as_ptr() };
            if node.key == key {
                return Some(&node.value);
            }
            curr = node.next;
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`, or None if the
    /// key is absent.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut curr = *self.buckets.get(self.bucket_index_checked(key)?)?;
        while let Some(node) = curr {
            // SAFETY: Chain nodes are live and owned by this Map; the mutable borrow
            // of self makes the reference exclusive.
            let node = unsafe { &mut *node.as_ptr() };
            if node.key == key {
                return Some(&mut node.value);
            }
            curr = node.next;
        }
        None
    }

    /// Returns true if `key` has an entry in the Map.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key`, returning its value if the key was
    /// present. A secure Map zeroes the node's memory and the key's bytes before
    /// release.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index_checked(key)?;
        let secure = self.buckets.is_secure();

        let mut prev: BucketLink<V> = None;
        let mut curr = self.buckets[index];
        while let Some(node) = curr {
            // SAFETY: Chain nodes are live and owned by this Map; the mutable borrow
            // of self makes the access exclusive.
            let next = unsafe { (*node.as_ptr()).next };
            // SAFETY: As above.
            if unsafe { (*node.as_ptr()).key == key } {
                match prev {
                    // SAFETY: prev is a live chain node preceding the match.
                    Some(p) => unsafe { (*p.as_ptr()).next = next },
                    None => self.buckets[index] = next,
                }
                self.len -= 1;

                let backend = self.buckets.allocator().clone();
                // SAFETY: The node came from box_in with this backend and has been
                // unlinked from its chain.
                let mut node = unsafe { alloc::unbox_in(&backend, node, secure) };
                if secure {
                    wipe::wipe_string(&mut node.key);
                }
                return Some(node.value);
            }
            prev = curr;
            curr = next;
        }
        None
    }

    /// Removes every entry. The bucket array is retained.
    pub fn clear(&mut self) {
        let secure = self.buckets.is_secure();
        let backend = self.buckets.allocator().clone();

        for bucket in self.buckets.iter_mut() {
            let mut curr = bucket.take();
            while let Some(node) = curr {
                // SAFETY: Chain nodes are live and owned by this Map; the bucket head
                // has been cleared, so each node is released exactly once.
                curr = unsafe { (*node.as_ptr()).next };
                // SAFETY: The node came from box_in with this backend.
                let mut node = unsafe { alloc::unbox_in(&backend, node, secure) };
                if secure {
                    wipe::wipe_string(&mut node.key);
                }
            }
        }
        self.len = 0;
    }

    /// Returns an iterator over `(key, value)` pairs, bucket by bucket; within a
    /// bucket the most recently inserted entry comes first.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::over(&self.buckets, self.len)
    }

    /// Returns an iterator over the keys, in [`iter`](Map::iter) order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over the values, in [`iter`](Map::iter) order.
    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    /// Returns a mutable iterator over the values, in [`iter`](Map::iter) order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::over(&self.buckets, self.len)
    }

    /// Returns a [`Cursor`] walking the values in [`iter`](Map::iter) order.
    pub fn cursor(&self) -> Cursor<'_, V> {
        Cursor::over_map(self)
    }
}

impl<V, A: RawAllocator> Map<V, A> {
    fn allocate_buckets(&mut self, buckets: usize) -> Result<(), AllocError> {
        self.buckets.reserve(buckets)?;
        for _ in 0..buckets {
            // SAFETY: The capacity was reserved directly above.
            unsafe { self.buckets.push_unchecked(None) };
        }
        Ok(())
    }

    fn bucket_index(&self, key: &str) -> usize {
        fnv::hash_seeded(self.seed, key.as_bytes()) as usize % self.buckets.len()
    }

    /// As [`bucket_index`](Map::bucket_index), but None when no buckets exist yet.
    fn bucket_index_checked(&self, key: &str) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        Some(self.bucket_index(key))
    }
}

impl<V, A: RawAllocator> Drop for Map<V, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V> Default for Map<V> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: Maps rely on unique pointers and are therefore safe to Send when both the
// values and the backend are.
unsafe impl<V: Send, A: RawAllocator + Send> Send for Map<V, A> {}
// SAFETY: Map's safe API obeys all rules of the borrow checker, so no interior
// mutability occurs.
unsafe impl<V: Sync, A: RawAllocator + Sync> Sync for Map<V, A> {}

impl<V: Debug, A: RawAllocator> Debug for Map<V, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("len", &self.len)
            .field("buckets", &self.buckets.len())
            .field("secure", &self.is_secure())
            .finish()
    }
}
