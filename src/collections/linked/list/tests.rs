#![cfg(test)]

use std::iter;

use super::*;
use crate::util::error::OutOfMemory;
use crate::util::testing::{CountedDrop, Counting, FailAfter};

#[test]
fn test_push_and_pop_order() {
    let mut list = List::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();
    list.push_front(0).unwrap();
    list.verify_links();

    assert_eq!(list.len(), 3);
    assert_eq!(list.pop_front(), Some(0), "Pops should come front first.");
    assert_eq!(list.pop_front(), Some(1));
    assert_eq!(list.pop_front(), Some(2));
    assert_eq!(list.pop_front(), None);
    list.verify_links();
}

#[test]
fn test_ends() {
    let mut list = List::new();
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);

    list.push_back(1).unwrap();
    assert_eq!(
        list.front(),
        list.back(),
        "A single element is both the front and the back."
    );

    list.push_back(2).unwrap();
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&2));

    *list.front_mut().unwrap() = 10;
    *list.back_mut().unwrap() = 20;
    assert_eq!(list.pop_front(), Some(10));
    assert_eq!(list.pop_front(), Some(20));

    assert_eq!(
        list.back(),
        None,
        "Popping the last element should clear the back pointer."
    );
    list.verify_links();
}

#[test]
fn test_contains() {
    let list = List::from_iter(0..5);
    assert!(list.contains(&3));
    assert!(!list.contains(&7));
}

#[test]
fn test_failing_backend() {
    let mut list = List::new_in(FailAfter::new(2));
    list.push_back(0).unwrap();
    list.push_back(1).unwrap();
    assert_eq!(
        list.push_back(2),
        Err(OutOfMemory.into()),
        "The backend's refusal should surface as an error."
    );
    assert_eq!(list.len(), 2, "A failed push should leave the List as it was.");
    list.verify_links();
}

#[test]
fn test_injected_backend_balance() {
    let backend = Counting::new();
    let mut list = List::new_in(backend.clone());
    for i in 0..10 {
        list.push_back(i).unwrap();
    }
    assert_eq!(
        backend.allocs.get(),
        10,
        "Each push should allocate exactly one node."
    );

    drop(list);
    assert_eq!(backend.live(), 0, "Drop should release every node.");
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut list = List::new();
    for _ in 0..10 {
        list.push_back(counter.clone()).unwrap();
    }

    drop(list.pop_front());
    assert_eq!(counter.take(), 1);

    drop(list);
    assert_eq!(counter.take(), 9, "Drop should drop the remaining elements.");
}

#[test]
fn test_clear() {
    let mut list = List::from_iter(0..5);
    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.front(), None);

    list.push_back(9).unwrap();
    assert_eq!(list.len(), 1, "The List should be reusable after clear.");
    list.verify_links();
}

#[test]
fn test_iterators() {
    let mut list = List::from_iter(0..5);
    assert_eq!(
        Vec::from_iter(list.iter().copied()),
        [0, 1, 2, 3, 4],
        "Iteration should run front to back."
    );
    assert_eq!(list.iter().len(), 5);

    for i in list.iter_mut() {
        *i *= 2;
    }
    assert_eq!(Vec::from_iter(list.iter().copied()), [0, 2, 4, 6, 8]);

    assert_eq!(Vec::from_iter(list), [0, 2, 4, 6, 8]);

    let counter = CountedDrop::new(0);
    let list = List::from_iter(iter::repeat_with(|| counter.clone()).take(10));
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
fn test_equality() {
    assert_eq!(List::from_iter(0..3), List::from_iter(0..3));
    assert_ne!(List::from_iter(0..3), List::from_iter(0..4));
    assert_ne!(List::from_iter([0, 1, 2]), List::from_iter([0, 1, 3]));
}

#[test]
fn test_cursor() {
    let list = List::from_iter(0..3);
    let mut cursor = list.cursor();
    assert!(cursor.has_next());
    assert_eq!(cursor.advance(), Some(&0));
    assert_eq!(cursor.advance(), Some(&1));
    assert_eq!(cursor.advance(), Some(&2));
    assert!(!cursor.has_next());
    assert_eq!(cursor.advance(), None);
}

#[test]
fn test_secure_flag() {
    let mut list = List::secure();
    assert!(list.is_secure());
    list.push_back([0_u8; 32]).unwrap();
    assert_eq!(list.pop_front(), Some([0_u8; 32]));
}
