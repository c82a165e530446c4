use std::marker::PhantomData;

use super::map::BucketLink;
use crate::alloc::RawAllocator;
use crate::collections::contiguous::Vector;

/// A borrowing iterator over a [`Map`](super::Map)'s entries, bucket by bucket.
pub struct Iter<'a, V> {
    buckets: &'a [BucketLink<V>],
    bucket: usize,
    curr: BucketLink<V>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn over<A: RawAllocator>(
        buckets: &'a Vector<BucketLink<V>, A>,
        remaining: usize,
    ) -> Iter<'a, V> {
        let mut iter = Iter {
            buckets: buckets.as_ref(),
            bucket: 0,
            curr: None,
            remaining,
        };
        iter.seek_populated();
        iter
    }

    /// Advances `bucket` until `curr` names a chain head, or past the end.
    fn seek_populated(&mut self) {
        while self.curr.is_none() && self.bucket < self.buckets.len() {
            self.curr = self.buckets[self.bucket];
            self.bucket += 1;
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.curr?;
        // SAFETY: Chain nodes are live for the lifetime of the borrow.
        let node = unsafe { &*node.as_ptr() };
        self.curr = node.next;
        self.seek_populated();
        self.remaining -= 1;
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets,
            bucket: self.bucket,
            curr: self.curr,
            remaining: self.remaining,
        }
    }
}

/// A borrowing iterator over a [`Map`](super::Map)'s keys.
pub struct Keys<'a, V>(pub(crate) Iter<'a, V>);

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.next()?.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// A borrowing iterator over a [`Map`](super::Map)'s values.
pub struct Values<'a, V>(pub(crate) Iter<'a, V>);

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.next()?.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values(self.0.clone())
    }
}

/// A mutably borrowing iterator over a [`Map`](super::Map)'s values.
pub struct ValuesMut<'a, V> {
    buckets: *const BucketLink<V>,
    bucket_count: usize,
    bucket: usize,
    curr: BucketLink<V>,
    remaining: usize,
    _phantom: PhantomData<&'a mut V>,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn over<A: RawAllocator>(
        buckets: &'a Vector<BucketLink<V>, A>,
        remaining: usize,
    ) -> ValuesMut<'a, V> {
        let mut iter = ValuesMut {
            buckets: buckets.as_ref().as_ptr(),
            bucket_count: buckets.len(),
            bucket: 0,
            curr: None,
            remaining,
            _phantom: PhantomData,
        };
        iter.seek_populated();
        iter
    }

    fn seek_populated(&mut self) {
        while self.curr.is_none() && self.bucket < self.bucket_count {
            // SAFETY: bucket < bucket_count, so the read is in bounds of the bucket
            // array, which outlives the borrow.
            self.curr = unsafe { *self.buckets.add(self.bucket) };
            self.bucket += 1;
        }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.curr?;
        // SAFETY: Chain nodes are live for the lifetime of the borrow, and the walk
        // visits each node exactly once, so the mutable references it hands out never
        // alias.
        let node = unsafe { &mut *node.as_ptr() };
        self.curr = node.next;
        self.seek_populated();
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}
