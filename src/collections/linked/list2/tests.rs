#![cfg(test)]

use std::iter;

use super::*;
use crate::util::error::OutOfMemory;
use crate::util::testing::{CountedDrop, Counting, FailAfter};

#[test]
fn test_two_ended_symmetry() {
    let mut list = List2::new();
    list.push_back(2).unwrap();
    list.push_back(3).unwrap();
    list.push_front(1).unwrap();
    list.push_front(0).unwrap();
    list.verify_links();

    assert_eq!(list.len(), 4);
    assert_eq!(list.front(), Some(&0));
    assert_eq!(list.back(), Some(&3));

    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(list.pop_front(), Some(0));
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), Some(1));
    assert_eq!(list.pop_back(), None);
    assert_eq!(list.pop_front(), None);
    list.verify_links();
}

#[test]
fn test_insert_after() {
    let mut list = List2::new();
    let a = list.push_back('a').unwrap();
    let c = list.push_back('c').unwrap();

    list.insert_after(a, 'b').unwrap();
    list.verify_links();
    assert_eq!(
        Vec::from_iter(list.iter().copied()),
        ['a', 'b', 'c'],
        "Insertion should land between the handle and its successor."
    );

    list.insert_after(c, 'd').unwrap();
    list.verify_links();
    assert_eq!(
        list.back(),
        Some(&'d'),
        "Inserting after the tail should move the tail."
    );
}

#[test]
fn test_remove_by_handle() {
    let mut list = List2::new();
    let a = list.push_back(0).unwrap();
    let b = list.push_back(1).unwrap();
    let c = list.push_back(2).unwrap();

    assert_eq!(list.remove(b), Ok(1), "Mid removal should relink neighbors.");
    list.verify_links();
    assert_eq!(Vec::from_iter(list.iter().copied()), [0, 2]);

    assert_eq!(list.remove(a), Ok(0), "Head removal should move the head.");
    list.verify_links();
    assert_eq!(list.front(), Some(&2));

    assert_eq!(list.remove(c), Ok(2), "Tail removal should empty the list.");
    list.verify_links();
    assert!(list.is_empty());
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);
}

#[test]
fn test_stale_handle_detection() {
    let mut list = List2::new();
    let a = list.push_back(0).unwrap();
    list.push_back(1).unwrap();

    assert_eq!(list.remove(a), Ok(0));
    assert_eq!(
        list.remove(a),
        Err(StaleHandle),
        "A departed node's handle should be rejected."
    );
    assert_eq!(list.get(a), Err(StaleHandle));
    assert_eq!(list.next(a), Err(StaleHandle));
    assert_eq!(list.prev(a), Err(StaleHandle));
    assert!(list.insert_after(a, 9).unwrap_err().is_stale_handle());

    // The vacated slot is reused, but under a new generation.
    let b = list.push_back(2).unwrap();
    assert_eq!(
        list.remove(a),
        Err(StaleHandle),
        "The old handle should not resolve to the slot's new occupant."
    );
    assert_eq!(list.get(b), Ok(&2));
    list.verify_links();
}

#[test]
fn test_slot_reuse() {
    let mut list = List2::new();
    for i in 0..4 {
        list.push_back(i).unwrap();
    }
    let arena = list.slots.len();

    assert_eq!(list.pop_front(), Some(0));
    assert_eq!(list.pop_back(), Some(3));
    list.push_back(4).unwrap();
    list.push_back(5).unwrap();
    list.verify_links();

    assert_eq!(
        list.slots.len(),
        arena,
        "Vacated slots should be reused before the arena grows."
    );
    assert_eq!(Vec::from_iter(list.iter().copied()), [1, 2, 4, 5]);
}

#[test]
fn test_handles_and_neighbors() {
    let mut list = List2::new();
    let a = list.push_back('a').unwrap();
    let b = list.push_back('b').unwrap();
    let c = list.push_back('c').unwrap();

    assert_eq!(list.handle_front(), Some(a));
    assert_eq!(list.handle_back(), Some(c));
    assert_eq!(list.next(a), Ok(Some(b)));
    assert_eq!(list.prev(c), Ok(Some(b)));
    assert_eq!(list.next(c), Ok(None), "The tail has no successor.");
    assert_eq!(list.prev(a), Ok(None), "The head has no predecessor.");

    *list.get_mut(b).unwrap() = 'B';
    assert_eq!(list.get(b), Ok(&'B'));
}

#[test]
fn test_failing_backend() {
    let mut list = List2::new_in(FailAfter::new(1));
    for i in 0..8 {
        list.push_back(i).unwrap();
    }
    assert_eq!(
        list.push_back(8),
        Err(OutOfMemory.into()),
        "The arena's failed growth should surface as an error."
    );
    assert_eq!(list.len(), 8, "A failed push should leave the list as it was.");
    list.verify_links();
}

#[test]
fn test_injected_backend_balance() {
    let backend = Counting::new();
    let mut list = List2::new_in(backend.clone());
    for i in 0..100 {
        list.push_back(i).unwrap();
    }
    assert!(backend.allocs.get() >= 1);

    drop(list);
    assert_eq!(backend.live(), 0, "Drop should release the arena.");
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut list = List2::new();
    for _ in 0..10 {
        list.push_back(counter.clone()).unwrap();
    }

    drop(list.pop_back());
    assert_eq!(counter.take(), 1);

    drop(list);
    assert_eq!(counter.take(), 9, "Drop should drop the remaining elements.");
}

#[test]
fn test_clear() {
    let counter = CountedDrop::new(0);
    let mut list = List2::new();
    for _ in 0..5 {
        list.push_back(counter.clone()).unwrap();
    }

    list.clear();
    assert_eq!(counter.take(), 5, "Clear should drop every element.");
    assert!(list.is_empty());
    list.verify_links();

    list.push_back(counter.clone()).unwrap();
    assert_eq!(list.len(), 1, "The list should be reusable after clear.");
}

#[test]
fn test_iterators() {
    let mut list = List2::from_iter(0..5);
    assert_eq!(Vec::from_iter(list.iter().copied()), [0, 1, 2, 3, 4]);
    assert_eq!(list.iter().len(), 5);

    for i in list.iter_mut() {
        *i *= 2;
    }
    assert_eq!(Vec::from_iter(list.iter().copied()), [0, 2, 4, 6, 8]);

    assert_eq!(Vec::from_iter(list), [0, 2, 4, 6, 8]);

    let counter = CountedDrop::new(0);
    let list = List2::from_iter(iter::repeat_with(|| counter.clone()).take(10));
    let mut into = list.into_iter();
    let _ = into.next();
    assert_eq!(counter.take(), 1);
    drop(into);
    assert_eq!(
        counter.take(),
        9,
        "Dropping a partly consumed owned iterator should drop the rest."
    );
}

#[test]
fn test_cursor() {
    let list = List2::from_iter(0..3);
    let mut cursor = list.cursor();
    assert!(cursor.has_next());
    assert_eq!(cursor.advance(), Some(&0));
    assert_eq!(cursor.advance(), Some(&1));
    assert_eq!(cursor.advance(), Some(&2));
    assert!(!cursor.has_next());
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_secure_slot_wipe() {
    let mut list = List2::secure();
    assert!(list.is_secure());
    let handle = list.push_back(0xDEAD_BEEF_u32).unwrap();
    assert_eq!(list.remove(handle), Ok(0xDEAD_BEEF));

    // White box: the vacated slot's value storage should hold no trace of the
    // removed element.
    let slot = &list.slots[0];
    let bytes = unsafe {
        std::slice::from_raw_parts(
            (slot as *const super::slot::Slot<u32>).cast::<u8>(),
            size_of::<super::slot::Slot<u32>>(),
        )
    };
    assert!(
        !bytes
            .windows(4)
            .any(|w| w == 0xDEAD_BEEF_u32.to_ne_bytes()),
        "A secure removal should leave no copy of the value in the slot."
    );
    list.verify_links();
}
