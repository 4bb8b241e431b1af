use alloc::rc::Rc;
use core::cell::RefCell;

use typerase_internals::{RawCursor, sequence::Capabilities};

use crate::{TypeTag, Value};

/// A position inside a container whose type has been erased.
///
/// Cursors are created by [`Iterable::begin`] and [`Iterable::end`]. There
/// are two ways to copy one:
///
/// - [`Clone`] creates an *alias*: both handles share the same position, and
///   moving either one moves both.
/// - [`Cursor::duplicate`] creates a *detached* copy with a position of its
///   own. [`Cursor::post_increment`], [`Cursor::post_decrement`] and the `+`
///   and `-` operators also return detached copies.
///
/// The position is released when the last alias is dropped.
///
/// # Panics
///
/// Moving backward panics unless the container supports it; check
/// [`Iterable::can_reverse_iterate`] first. Dereferencing with
/// [`Cursor::get`] panics when the cursor is not on an element.
///
/// # Examples
///
/// ```
/// use typerase::Registry;
///
/// let registry = Registry::new();
/// let numbers = vec![4, 7, 4, 1];
/// let iterable = registry.wrap(&numbers).as_iterable(&registry);
///
/// let mut cursor = iterable.begin();
/// let alias = cursor.clone();
/// let detached = cursor.duplicate();
///
/// cursor += 2;
/// assert_eq!(alias.get().reinterpret_as::<i32>(), Ok(4));
/// assert_eq!(detached.get().reinterpret_as::<i32>(), Ok(4));
/// assert!(alias == cursor);
/// assert!(detached == iterable.begin());
/// ```
///
/// [`Iterable::begin`]: crate::Iterable::begin
/// [`Iterable::end`]: crate::Iterable::end
/// [`Iterable::can_reverse_iterate`]: crate::Iterable::can_reverse_iterate
#[derive(Clone)]
pub struct Cursor<'a> {
    inner: Rc<RefCell<RawCursor<'a>>>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(raw: RawCursor<'a>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(raw)),
        }
    }

    /// Creates a detached copy at the same position.
    #[inline]
    pub fn duplicate(&self) -> Self {
        Self::new(self.inner.borrow().duplicate())
    }

    /// Returns the number of handles sharing this position.
    #[inline]
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Returns the movements this cursor supports.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.inner.borrow().capabilities()
    }

    /// Returns the tag of the element type.
    #[inline]
    pub fn element_tag(&self) -> TypeTag {
        self.inner.borrow().element_tag()
    }

    /// Moves to the next element.
    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        self.advance(1)
    }

    /// Moves to the previous element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor cannot move backward.
    #[inline]
    #[track_caller]
    pub fn decrement(&mut self) -> &mut Self {
        self.advance(-1)
    }

    /// Moves by `step` elements, backward if `step` is negative.
    ///
    /// # Panics
    ///
    /// Panics if `step` is negative and the cursor cannot move backward.
    #[inline]
    #[track_caller]
    pub fn advance(&mut self, step: isize) -> &mut Self {
        self.inner.borrow_mut().advance(step);
        self
    }

    /// Moves backward by `step` elements, forward if `step` is negative.
    ///
    /// # Panics
    ///
    /// Panics if `step` is positive and the cursor cannot move backward.
    #[inline]
    #[track_caller]
    pub fn retreat(&mut self, step: isize) -> &mut Self {
        let Some(step) = step.checked_neg() else {
            panic!("cursor offset {step} cannot be negated");
        };
        self.advance(step)
    }

    /// Moves to the next element and returns a detached copy of the previous
    /// position.
    #[inline]
    pub fn post_increment(&mut self) -> Self {
        let previous = self.duplicate();
        self.increment();
        previous
    }

    /// Moves to the previous element and returns a detached copy of the
    /// previous position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor cannot move backward.
    #[inline]
    #[track_caller]
    pub fn post_decrement(&mut self) -> Self {
        let previous = self.duplicate();
        self.decrement();
        previous
    }

    /// Returns the element the cursor is on.
    ///
    /// If the element is itself a [`Value`], that value is returned.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not on an element, for instance at the end.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> Value<'a> {
        match self.try_get() {
            Some(value) => value,
            None => panic!(
                "dereferenced a cursor over `{}` that is not on an element",
                self.inner.borrow().sequence_tag()
            ),
        }
    }

    /// Returns the element the cursor is on, or `None` if it is not on an
    /// element.
    #[inline]
    pub fn try_get(&self) -> Option<Value<'a>> {
        let element = self.inner.borrow().get()?;
        Some(Value::from_element(element))
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        self.inner.borrow().position_eq(&other.inner.borrow())
    }
}

impl core::ops::AddAssign<isize> for Cursor<'_> {
    #[track_caller]
    fn add_assign(&mut self, step: isize) {
        self.advance(step);
    }
}

impl core::ops::SubAssign<isize> for Cursor<'_> {
    #[track_caller]
    fn sub_assign(&mut self, step: isize) {
        self.retreat(step);
    }
}

impl<'a> core::ops::Add<isize> for &Cursor<'a> {
    type Output = Cursor<'a>;

    #[track_caller]
    fn add(self, step: isize) -> Cursor<'a> {
        let mut copy = self.duplicate();
        copy.advance(step);
        copy
    }
}

impl<'a> core::ops::Sub<isize> for &Cursor<'a> {
    type Output = Cursor<'a>;

    #[track_caller]
    fn sub(self, step: isize) -> Cursor<'a> {
        let mut copy = self.duplicate();
        copy.retreat(step);
        copy
    }
}

impl core::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("raw", &*self.inner.borrow())
            .field("share_count", &self.share_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{collections::LinkedList, vec, vec::Vec};

    use super::*;
    use crate::Registry;

    fn read(cursor: &Cursor<'_>) -> i32 {
        cursor.get().reinterpret_as::<i32>().unwrap()
    }

    #[test]
    fn test_cursor_send_sync() {
        static_assertions::assert_not_impl_any!(Cursor<'static>: Send, Sync);
    }

    #[test]
    fn test_clone_aliases() {
        let registry = Registry::new();
        let values = vec![4, 7, 4, 1];
        let iterable = registry.wrap(&values).as_iterable(&registry);

        let mut cursor = iterable.begin();
        let mut alias = cursor.clone();
        assert_eq!(cursor.share_count(), 2);

        alias.increment();
        assert_eq!(read(&cursor), 7);
        cursor.advance(2);
        assert_eq!(read(&alias), 1);

        drop(alias);
        assert_eq!(cursor.share_count(), 1);
    }

    #[test]
    fn test_duplicate_detaches() {
        let registry = Registry::new();
        let list: LinkedList<i32> = [42, 57, 47, 15].into_iter().collect();
        let iterable = registry.wrap(&list).as_iterable(&registry);

        let cursor = iterable.begin();
        let mut copy = cursor.duplicate();
        assert_eq!(copy.share_count(), 1);
        copy.increment();
        assert_eq!(read(&cursor), 42);
        assert_eq!(read(&copy), 57);
        assert!(cursor != copy);
    }

    #[test]
    fn test_post_increment_and_operators() {
        let registry = Registry::new();
        let values = vec![10, 20, 30, 40];
        let iterable = registry.wrap(&values).as_iterable(&registry);

        let mut cursor = iterable.begin();
        let previous = cursor.post_increment();
        assert_eq!(read(&previous), 10);
        assert_eq!(read(&cursor), 20);

        let ahead = &cursor + 2;
        assert_eq!(read(&ahead), 40);
        assert_eq!(read(&cursor), 20);

        let behind = &ahead - 3;
        assert_eq!(read(&behind), 10);

        let previous = cursor.post_decrement();
        assert_eq!(read(&previous), 20);
        assert!(cursor == iterable.begin());

        cursor += 4;
        assert!(cursor == iterable.end());
        cursor -= 1;
        assert_eq!(read(&cursor), 40);
        cursor.retreat(-1);
        assert!(cursor.try_get().is_none());
    }

    #[test]
    #[should_panic(expected = "not on an element")]
    fn test_get_at_end() {
        let registry = Registry::new();
        let values: Vec<u8> = vec![1];
        let iterable = registry.wrap(&values).as_iterable(&registry);
        let _ = iterable.end().get();
    }

    #[test]
    fn test_cursors_of_different_types_differ() {
        let registry = Registry::new();
        let a: Vec<u8> = Vec::new();
        let b: [u8; 0] = [];
        let a = registry.wrap(&a).as_iterable(&registry);
        let b = registry.wrap(&b).as_iterable(&registry);
        assert!(a.begin() == a.end());
        assert!(a.begin() != b.begin());
    }
}
