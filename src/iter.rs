use typerase_internals::RawCursor;

use crate::Value;

/// Iterator over the elements of an [`Iterable`].
///
/// Created by [`Iterable::iter`]. Iterating from the back is only possible
/// when [`Iterable::can_reverse_iterate`] returns `true`; otherwise
/// [`Iterator::next_back`](DoubleEndedIterator::next_back) panics.
///
/// [`Iterable`]: crate::Iterable
/// [`Iterable::iter`]: crate::Iterable::iter
/// [`Iterable::can_reverse_iterate`]: crate::Iterable::can_reverse_iterate
pub struct Iter<'a> {
    front: RawCursor<'a>,
    back: RawCursor<'a>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(front: RawCursor<'a>, back: RawCursor<'a>, remaining: usize) -> Self {
        Self {
            front,
            back,
            remaining,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Value<'a>;

    fn next(&mut self) -> Option<Value<'a>> {
        if self.remaining == 0 {
            return None;
        }
        let element = self.front.get()?;
        self.front.advance(1);
        self.remaining -= 1;
        Some(Value::from_element(element))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    #[track_caller]
    fn next_back(&mut self) -> Option<Value<'a>> {
        if self.remaining == 0 {
            return None;
        }
        self.back.advance(-1);
        let element = self.back.get()?;
        self.remaining -= 1;
        Some(Value::from_element(element))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl core::iter::FusedIterator for Iter<'_> {}

impl core::fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{collections::VecDeque, vec, vec::Vec};

    use crate::Registry;

    #[test]
    fn test_iter_meets_in_the_middle() {
        let registry = Registry::new();
        let deque: VecDeque<u8> = (1..=5).collect();
        let iterable = registry.wrap(&deque).as_iterable(&registry);

        let mut iter = iterable.iter();
        assert_eq!(iter.len(), 5);
        let mut seen = Vec::new();
        while let Some(value) = iter.next() {
            seen.push(value.reinterpret_as::<u8>().unwrap());
            if let Some(value) = iter.next_back() {
                seen.push(value.reinterpret_as::<u8>().unwrap());
            }
        }
        assert_eq!(seen, vec![1, 5, 2, 4, 3]);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_iter_over_iterable_ref() {
        let registry = Registry::new();
        let words = ["fee", "fih"];
        let iterable = registry.wrap(&words).as_iterable(&registry);
        let mut out = Vec::new();
        for value in &iterable {
            out.push(*value.downcast_ref::<&str>().unwrap());
        }
        assert_eq!(out, words);
    }
}
