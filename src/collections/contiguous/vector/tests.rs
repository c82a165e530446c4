#![cfg(test)]

use std::iter;

use super::*;
use crate::util::error::AllocError;
use crate::util::panic::assert_panics;
use crate::util::testing::{CountedDrop, Counting, FailAfter, ZeroSizedType};

#[test]
fn test_push_and_pop() {
    let mut vec = Vector::new();
    for i in 0..5 {
        vec.push(i).unwrap();
    }
    assert_eq!(vec.len(), 5);
    assert_eq!(&*vec, &[0, 1, 2, 3, 4], "Pushes should append in order.");

    assert_eq!(vec.pop(), Some(4), "Pop should return the last element.");
    assert_eq!(vec.pop(), Some(3));
    assert_eq!(vec.len(), 3);

    vec.clear();
    assert_eq!(vec.pop(), None, "Pop on an empty Vector should return None.");
    assert!(vec.is_empty());
}

#[test]
fn test_growth_policy() {
    let mut vec = Vector::new();
    assert_eq!(vec.cap(), 0, "No allocation should occur before the first push.");

    vec.push(0_u64).unwrap();
    assert_eq!(vec.cap(), 8, "The first push should allocate 8 slots.");

    for i in 1..8 {
        vec.push(i).unwrap();
    }
    assert_eq!(vec.cap(), 8, "Capacity should be untouched while slots remain.");

    vec.push(8).unwrap();
    assert_eq!(vec.cap(), 16, "A full Vector should double on push.");

    vec.reserve(100).unwrap();
    assert_eq!(vec.cap(), 100, "Reserve should grow to exactly the request.");
    vec.reserve(10).unwrap();
    assert_eq!(vec.cap(), 100, "Reserve below the capacity should do nothing.");
}

#[test]
fn test_capacity_overflow() {
    let mut vec = Vector::<u64>::new();
    vec.push(1).unwrap();

    let err = vec.reserve(usize::MAX).unwrap_err();
    assert!(
        err.is_capacity_overflow(),
        "A byte size past isize::MAX should be rejected before allocating."
    );
    assert_eq!(
        &*vec,
        &[1],
        "The Vector should be unchanged after a rejected reserve."
    );
    assert_eq!(vec.cap(), 8);
}

#[test]
fn test_failing_backend() {
    let mut vec = Vector::new_in(FailAfter::new(0));
    assert_eq!(
        vec.push(0),
        Err(AllocError::OutOfMemory(OutOfMemory)),
        "The backend's refusal should surface as an error."
    );
    assert_eq!(vec.len(), 0, "A failed push should leave the Vector empty.");
    assert_eq!(vec.cap(), 0, "A failed push should not record capacity.");

    let mut vec = Vector::new_in(FailAfter::new(1));
    for i in 0..8 {
        vec.push(i).unwrap();
    }
    assert!(vec.push(8).is_err(), "The doubling reallocation should fail.");
    assert_eq!(
        &*vec,
        &[0, 1, 2, 3, 4, 5, 6, 7],
        "All elements should survive a failed growth."
    );
    assert_eq!(vec.cap(), 8);
}

#[test]
fn test_injected_backend_balance() {
    let backend = Counting::new();
    let mut vec = Vector::new_in(backend.clone());
    for i in 0..100 {
        vec.push(i).unwrap();
    }
    assert!(
        backend.allocs.get() >= 1,
        "All memory should come from the injected backend."
    );

    drop(vec);
    assert_eq!(backend.live(), 0, "Drop should return every allocation.");
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::new();
    for _ in 0..100 {
        vec.push(ZeroSizedType).unwrap();
    }
    assert_eq!(vec.len(), 100);
    assert_eq!(vec[99], ZeroSizedType, "Indexing should work for ZSTs.");
    assert_eq!(vec.pop(), Some(ZeroSizedType));
    assert_eq!(vec.len(), 99);

    let backend = Counting::new();
    let vec2 = {
        let mut v = Vector::new_in(backend.clone());
        for _ in 0..10 {
            v.push(ZeroSizedType).unwrap();
        }
        v
    };
    drop(vec2);
    assert_eq!(backend.allocs.get(), 0, "ZSTs should never touch the backend.");
}

#[test]
fn test_get_and_replace() {
    let mut vec = Vector::new();
    for i in 0..5 {
        vec.push(i * 10).unwrap();
    }

    assert_eq!(vec.get(2), Some(&20));
    assert_eq!(vec.get(5), None, "Out of bounds get should return None.");

    *vec.get_mut(0).unwrap() = 7;
    assert_eq!(vec[0], 7);

    assert_eq!(
        vec.replace(1, 99),
        Ok(10),
        "Replace should return the previous element."
    );
    assert_eq!(vec[1], 99);
    assert_eq!(
        vec.replace(5, 0),
        Err(IndexOutOfBounds { index: 5, len: 5 }),
        "Replace past the end should report the index and length."
    );

    assert_panics!({
        let vec = Vector::from_iter(0..3);
        vec[3]
    });
}

#[test]
fn test_truncate_and_drop() {
    let counter = CountedDrop::new(0);
    let mut vec = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(10));

    vec.truncate(4);
    assert_eq!(counter.take(), 6, "Truncate should drop the removed elements.");
    assert_eq!(vec.len(), 4);

    vec.truncate(8);
    assert_eq!(vec.len(), 4, "Truncate past the length should do nothing.");

    drop(vec);
    assert_eq!(counter.take(), 4, "Drop should drop the remaining elements.");
}

#[test]
fn test_map_and_filter() {
    let vec = Vector::from_iter(0..6);

    let doubled = vec.map(|i| i * 2).unwrap();
    assert_eq!(&*doubled, &[0, 2, 4, 6, 8, 10]);
    assert_eq!(
        doubled.cap(),
        vec.len(),
        "Map should reserve exactly the source length."
    );

    let even = vec.filter(|i| i % 2 == 0).unwrap();
    assert_eq!(&*even, &[0, 2, 4], "Filter should keep order.");

    assert_eq!(
        vec.map(|i| *i).unwrap(),
        vec,
        "Map under the identity should reproduce the Vector."
    );
    assert_eq!(
        vec.filter(|_| true).unwrap(),
        vec,
        "Filter under an always-true predicate should reproduce the Vector."
    );

    assert_eq!(
        &*vec,
        &[0, 1, 2, 3, 4, 5],
        "The source should be untouched by map and filter."
    );

    let mut vec = Vector::new_in(FailAfter::new(1));
    for i in 0..5 {
        vec.push(i).unwrap();
    }
    assert!(
        vec.map(|i| i + 1).is_err(),
        "Map should report the backend's refusal."
    );
}

#[test]
fn test_secure_flag_propagation() {
    let vec = Vector::<u8>::secure();
    assert!(vec.is_secure());
    assert!(!Vector::<u8>::new().is_secure());

    let mut vec = Vector::secure();
    for i in 0..5_u8 {
        vec.push(i).unwrap();
    }
    assert!(vec.map(|i| i + 1).unwrap().is_secure());
    assert!(vec.filter(|_| true).unwrap().is_secure());
    assert!(vec.try_clone().unwrap().is_secure());
}

#[test]
fn test_iterators() {
    let mut vec = Vector::from_iter(0_usize..5);
    let collected = Vector::from_iter(vec.iter().cloned());
    assert_eq!(vec, collected, "Collected iter should be equal.");

    for i in vec.iter_mut() {
        *i *= 2;
    }
    assert_eq!(*vec, [0_usize, 2, 4, 6, 8]);

    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.len(), 3);

    let counter = CountedDrop::new(0);
    let vec = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(10));
    let mut iter = vec.into_iter();
    let _ = iter.next();
    assert_eq!(counter.take(), 1);
    drop(iter);
    assert_eq!(
        counter.take(),
        9,
        "Dropping a partly consumed owned iterator should drop the rest."
    );
}

#[test]
fn test_cursor() {
    let vec = Vector::from_iter(0..4);
    let mut cursor = vec.cursor();
    assert!(cursor.has_next());
    assert_eq!(cursor.advance(), Some(&0));
    assert_eq!(cursor.by_ref().count(), 3, "A cursor should be an Iterator.");
    assert!(!cursor.has_next());
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_formatting() {
    let vec = Vector::from_iter(0..3);
    assert_eq!(format!("{vec}"), "![0, 1, 2]");
    let repr = format!("{vec:?}");
    assert!(repr.contains("len: 3"), "Debug should include the length.");
    assert!(repr.contains("cap: 8"), "Debug should include the capacity.");
}
