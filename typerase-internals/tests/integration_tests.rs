//! Integration tests for the typerase-internals crate.
//!
//! These tests only use the public surface of the crate, the way the
//! `typerase` crate does:
//!
//! - `test_custom_forward_only_sequence`: a user-defined singly linked list
//!   walked through erased cursors
//! - `test_each_builtin_layout`: every built-in container type yields the same
//!   elements in the same order
//! - `test_value_refs_from_cursors`: elements read through cursors keep their
//!   tag and address
//! - `test_random_access_deque_jumps`: jumping back and forth in a deque
//! - `test_tag_identity`: tags compare by type, not by name

use std::collections::{LinkedList, VecDeque};

use typerase_internals::{
    RawCursor, RawValueRef,
    sequence::{Capabilities, Category, Layout, Linked, LinkedSequence, Position, Sequence},
    tag::TypeTag,
};

struct Node {
    value: f64,
    next: Option<Box<Node>>,
}

/// Singly linked list that grows at the front.
#[derive(Default)]
struct FrontList {
    head: Option<Box<Node>>,
}

impl FrontList {
    fn push_front(&mut self, value: f64) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
    }
}

#[derive(Clone)]
struct FrontListPosition<'a>(Option<&'a Node>);

impl PartialEq for FrontListPosition<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<'a> Position<'a> for FrontListPosition<'a> {
    type Item = f64;

    const CATEGORY: Category = Category::Forward;

    fn get(&self) -> Option<&'a f64> {
        self.0.map(|node| &node.value)
    }

    fn step_forward(&mut self) {
        self.0 = self.0.and_then(|node| node.next.as_deref());
    }
}

impl Sequence for FrontList {
    type Item = f64;
    type Layout = Linked;
}

impl LinkedSequence for FrontList {
    type Position<'a> = FrontListPosition<'a>;

    fn begin(&self) -> FrontListPosition<'_> {
        FrontListPosition(self.head.as_deref())
    }

    fn end(&self) -> FrontListPosition<'_> {
        FrontListPosition(None)
    }
}

fn walk<S: Sequence>(sequence: &S) -> Vec<RawValueRef<'_>> {
    let mut cursor = <S::Layout as Layout<S>>::begin(sequence);
    let end = <S::Layout as Layout<S>>::end(sequence);
    let mut out = Vec::new();
    while !cursor.position_eq(&end) {
        out.push(cursor.get().expect("cursor before the end is on an element"));
        cursor.advance(1);
    }
    out
}

fn copied<T: Copy + 'static>(values: &[RawValueRef<'_>]) -> Vec<T> {
    values
        .iter()
        .map(|value| {
            assert!(value.tag().is::<T>());
            // SAFETY: the tag was checked above
            *unsafe { value.downcast_unchecked::<T>() }
        })
        .collect()
}

#[test]
fn test_custom_forward_only_sequence() {
    let mut list = FrontList::default();
    for value in [1.0, 2.0, 3.0, 4.0] {
        list.push_front(value);
    }

    let begin = Linked::begin(&list);
    assert_eq!(
        begin.capabilities(),
        Capabilities::from_category(Category::Forward)
    );
    assert_eq!(begin.element_tag(), TypeTag::of::<f64>());
    assert_eq!(begin.sequence_tag(), TypeTag::of::<FrontList>());
    assert_eq!(Linked::size(&list), 4);

    assert_eq!(copied::<f64>(&walk(&list)), vec![4.0, 3.0, 2.0, 1.0]);

    let empty = FrontList::default();
    assert!(Linked::begin(&empty).position_eq(&Linked::end(&empty)));
    assert!(walk(&empty).is_empty());
}

#[test]
fn test_each_builtin_layout() {
    let expected = vec![42_i32, 57, 47, 15];

    let vec = expected.clone();
    let array = [42_i32, 57, 47, 15];
    let boxed: Box<[i32]> = expected.clone().into_boxed_slice();
    let deque: VecDeque<i32> = expected.iter().copied().collect();
    let list: LinkedList<i32> = expected.iter().copied().collect();

    assert_eq!(copied::<i32>(&walk(&vec)), expected);
    assert_eq!(copied::<i32>(&walk(&array)), expected);
    assert_eq!(copied::<i32>(&walk(&boxed)), expected);
    assert_eq!(copied::<i32>(&walk(&deque)), expected);
    assert_eq!(copied::<i32>(&walk(&list)), expected);
}

#[test]
fn test_value_refs_from_cursors() {
    let words = vec![String::from("alpha"), String::from("beta")];
    let values = walk(&words);
    assert_eq!(values.len(), 2);
    for (value, word) in values.iter().zip(&words) {
        assert_eq!(value.tag(), TypeTag::of::<String>());
        assert_eq!(
            value.as_ptr().as_ptr().cast_const().cast::<String>(),
            std::ptr::from_ref(word)
        );
    }
}

#[test]
fn test_random_access_deque_jumps() {
    let mut deque: VecDeque<u32> = (10..20).collect();
    deque.rotate_left(3);
    deque.push_front(99);

    let mut cursor: RawCursor<'_> = Linked::begin(&deque);
    assert!(cursor.capabilities().is_random_access());
    cursor.advance(5);
    // SAFETY: the element type is u32
    let at_five = *unsafe { cursor.get().unwrap().downcast_unchecked::<u32>() };
    assert_eq!(at_five, deque[5]);

    cursor.advance(-5);
    // SAFETY: the element type is u32
    let at_zero = *unsafe { cursor.get().unwrap().downcast_unchecked::<u32>() };
    assert_eq!(at_zero, 99);

    cursor.advance(11);
    assert!(cursor.get().is_none());
    assert!(cursor.position_eq(&Linked::end(&deque)));
}

#[test]
fn test_tag_identity() {
    type Alias = Vec<u8>;
    assert_eq!(TypeTag::of::<Alias>(), TypeTag::of::<Vec<u8>>());
    assert_ne!(TypeTag::of::<Vec<u8>>(), TypeTag::of::<Vec<i8>>());
    assert_eq!(TypeTag::of::<FrontList>().name(), std::any::type_name::<FrontList>());
}
