//! [`Sequence`] implementations for the `alloc` collections.

use alloc::{
    boxed::Box,
    collections::{LinkedList, VecDeque, linked_list},
    vec::Vec,
};

use crate::sequence::{
    Category, Contiguous, ContiguousSequence, Linked, LinkedSequence, Position, Sequence,
};

impl<T: 'static> Sequence for Vec<T> {
    type Item = T;
    type Layout = Contiguous;
}

impl<T: 'static> ContiguousSequence for Vec<T> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: 'static> Sequence for Box<[T]> {
    type Item = T;
    type Layout = Contiguous;
}

impl<T: 'static> ContiguousSequence for Box<[T]> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: 'static, const N: usize> Sequence for [T; N] {
    type Item = T;
    type Layout = Contiguous;
}

impl<T: 'static, const N: usize> ContiguousSequence for [T; N] {
    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: 'static> Sequence for VecDeque<T> {
    type Item = T;
    type Layout = Linked;
}

impl<T: 'static> LinkedSequence for VecDeque<T> {
    type Position<'a> = DequePosition<'a, T>;

    #[inline]
    fn begin(&self) -> DequePosition<'_, T> {
        DequePosition {
            deque: self,
            index: 0,
        }
    }

    #[inline]
    fn end(&self) -> DequePosition<'_, T> {
        DequePosition {
            deque: self,
            index: self.len(),
        }
    }

    #[inline]
    fn size(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// A [`Position`] into a [`VecDeque`].
///
/// A deque is stored in a ring buffer that may wrap around, so its elements
/// are not one slice; positions are indices instead.
pub struct DequePosition<'a, T> {
    /// The deque this position belongs to
    deque: &'a VecDeque<T>,
    /// Index of the current element, `deque.len()` at the end
    index: usize,
}

impl<T> Clone for DequePosition<'_, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            index: self.index,
        }
    }
}

impl<T> PartialEq for DequePosition<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.deque, other.deque) && self.index == other.index
    }
}

impl<T> core::fmt::Debug for DequePosition<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DequePosition")
            .field("index", &self.index)
            .field("len", &self.deque.len())
            .finish()
    }
}

impl<'a, T: 'static> Position<'a> for DequePosition<'a, T> {
    type Item = T;

    const CATEGORY: Category = Category::RandomAccess;

    #[inline]
    fn get(&self) -> Option<&'a T> {
        self.deque.get(self.index)
    }

    #[inline]
    fn step_forward(&mut self) {
        self.advance(1);
    }

    #[inline]
    fn step_backward(&mut self) {
        self.advance(-1);
    }

    fn advance(&mut self, step: isize) {
        match self.index.checked_add_signed(step) {
            Some(index) => self.index = index,
            None => panic!("cannot move a `VecDeque` position before its first element"),
        }
    }
}

impl<T: 'static> Sequence for LinkedList<T> {
    type Item = T;
    type Layout = Linked;
}

impl<T: 'static> LinkedSequence for LinkedList<T> {
    type Position<'a> = ListPosition<'a, T>;

    #[inline]
    fn begin(&self) -> ListPosition<'_, T> {
        ListPosition {
            list: self,
            index: 0,
            rest: self.iter(),
        }
    }

    #[inline]
    fn end(&self) -> ListPosition<'_, T> {
        ListPosition {
            list: self,
            index: self.len(),
            rest: linked_list::Iter::default(),
        }
    }

    #[inline]
    fn size(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// A [`Position`] into a [`LinkedList`].
///
/// Moving forward follows the node links. The standard list does not expose
/// its nodes, so moving backward walks again from the front of the list.
pub struct ListPosition<'a, T> {
    /// The list this position belongs to
    list: &'a LinkedList<T>,
    /// Index of the current element, `list.len()` at the end
    index: usize,
    /// The elements from the current one to the end of the list
    rest: linked_list::Iter<'a, T>,
}

impl<'a, T> ListPosition<'a, T> {
    /// Re-walks the list from the front so that `rest` starts at `index`.
    fn seek(&mut self, index: usize) {
        let mut rest = self.list.iter();
        if let Some(skip) = index.checked_sub(1) {
            rest.nth(skip);
        }
        self.index = index;
        self.rest = rest;
    }
}

impl<T> Clone for ListPosition<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            index: self.index,
            rest: self.rest.clone(),
        }
    }
}

impl<T> PartialEq for ListPosition<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.list, other.list) && self.index == other.index
    }
}

impl<T> core::fmt::Debug for ListPosition<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListPosition")
            .field("index", &self.index)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<'a, T: 'static> Position<'a> for ListPosition<'a, T> {
    type Item = T;

    const CATEGORY: Category = Category::Bidirectional;

    #[inline]
    fn get(&self) -> Option<&'a T> {
        self.rest.clone().next()
    }

    fn step_forward(&mut self) {
        assert!(
            self.rest.next().is_some(),
            "cannot move a `LinkedList` position past its end"
        );
        self.index += 1;
    }

    fn step_backward(&mut self) {
        self.advance(-1);
    }

    fn advance(&mut self, step: isize) {
        if step >= 0 {
            for _ in 0..step {
                self.step_forward();
            }
            return;
        }

        match self.index.checked_add_signed(step) {
            Some(index) => self.seek(index),
            None => panic!("cannot move a `LinkedList` position before its first element"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    fn collect_forward<'a, P>(mut position: P, end: &P) -> Vec<P::Item>
    where
        P: Position<'a>,
        P::Item: Clone,
    {
        let mut out = Vec::new();
        while position != *end {
            out.extend(position.get().cloned());
            position.step_forward();
        }
        out
    }

    #[test]
    fn test_deque_positions() {
        let mut deque = VecDeque::new();
        deque.push_back(true);
        deque.push_back(false);
        deque.push_front(true);

        let end = deque.end();
        assert_eq!(collect_forward(deque.begin(), &end), vec![true, true, false]);
        assert_eq!(end.get(), None);

        let mut position = deque.begin();
        position.advance(2);
        assert_eq!(position.get(), Some(&false));
        position.step_backward();
        assert_eq!(position.get(), Some(&true));
    }

    #[test]
    #[should_panic(expected = "before its first element")]
    fn test_deque_position_before_begin() {
        let deque: VecDeque<u8> = VecDeque::new();
        deque.begin().step_backward();
    }

    #[test]
    fn test_list_positions() {
        let list: LinkedList<i32> = [42, 57, 47, 15].into_iter().collect();

        let end = list.end();
        assert_eq!(collect_forward(list.begin(), &end), vec![42, 57, 47, 15]);

        let mut position = list.end();
        let mut backwards = Vec::new();
        while position != list.begin() {
            position.step_backward();
            backwards.extend(position.get().copied());
        }
        assert_eq!(backwards, vec![15, 47, 57, 42]);
    }

    #[test]
    fn test_list_position_jumps() {
        let list: LinkedList<i32> = (0..10).collect();

        let mut position = list.begin();
        position.advance(7);
        assert_eq!(position.get(), Some(&7));
        position.advance(-5);
        assert_eq!(position.get(), Some(&2));

        let mut copy = position.clone();
        copy.advance(1);
        assert_eq!(position.get(), Some(&2));
        assert_eq!(copy.get(), Some(&3));
        assert!(copy != position);
    }

    #[test]
    fn test_positions_of_different_containers_differ() {
        let a: LinkedList<u8> = LinkedList::new();
        let b: LinkedList<u8> = LinkedList::new();
        assert!(a.begin() == a.end());
        assert!(a.begin() != b.begin());
    }

    #[test]
    #[should_panic(expected = "past its end")]
    fn test_list_position_past_end() {
        let list: LinkedList<u8> = LinkedList::new();
        list.end().step_forward();
    }
}
