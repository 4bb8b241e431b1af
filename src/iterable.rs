use typerase_internals::{RawCursor, RawValueRef, sequence::Capabilities};

use crate::{Cursor, Iter, OperationTable, TypeTag, Value};

/// A read-only view over a container whose type has been erased.
///
/// An `Iterable` pairs the [`OperationTable`] of the container type with a
/// reference to the container. It is obtained from a [`Value`] through
/// [`Registry::iterable`] or [`Value::as_iterable`] and hands out
/// [`Cursor`]s.
///
/// # Examples
///
/// ```
/// use std::collections::LinkedList;
///
/// use typerase::Registry;
///
/// let registry = Registry::new();
/// let list: LinkedList<i32> = [42, 57, 47, 15].into_iter().collect();
/// let iterable = registry.wrap(&list).as_iterable(&registry);
///
/// assert_eq!(iterable.size(), 4);
/// assert!(iterable.can_reverse_iterate());
///
/// let backwards: Vec<i32> = iterable
///     .iter()
///     .rev()
///     .map(|value| value.reinterpret_as::<i32>().unwrap())
///     .collect();
/// assert_eq!(backwards, [15, 47, 57, 42]);
/// ```
///
/// [`Registry::iterable`]: crate::Registry::iterable
#[derive(Clone)]
pub struct Iterable<'a> {
    table: OperationTable,
    /// Always tagged with the sequence tag of `table`
    container: RawValueRef<'a>,
}

impl<'a> Iterable<'a> {
    /// Creates a view of `container`.
    ///
    /// # Panics
    ///
    /// Panics if `container` is not of the container type of `table`.
    #[track_caller]
    pub(crate) fn new(table: OperationTable, container: Value<'a>) -> Self {
        assert_eq!(
            container.type_tag(),
            table.sequence_tag(),
            "operation table does not match the container type"
        );
        Self {
            table,
            container: container.as_raw(),
        }
    }

    /// Returns the number of elements in the container.
    ///
    /// This takes constant time for every container that knows its length,
    /// and walks the container otherwise.
    #[inline]
    pub fn size(&self) -> usize {
        // SAFETY:
        // 1. The container is tagged with the sequence tag of the table (checked
        //    in `Iterable::new`)
        unsafe { self.table.size(self.container) }
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    /// Returns `true` if cursors over the container can move backward.
    #[inline]
    pub fn can_reverse_iterate(&self) -> bool {
        self.capabilities().is_bidirectional()
    }

    /// Returns the movements cursors over the container support.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.table.capabilities()
    }

    /// Returns the tag of the element type.
    #[inline]
    pub fn element_tag(&self) -> TypeTag {
        self.table.element_tag()
    }

    /// Returns the operation table of the container type.
    #[inline]
    pub fn table(&self) -> &OperationTable {
        &self.table
    }

    /// Returns the container itself.
    #[inline]
    pub fn container(&self) -> Value<'a> {
        Value::from_raw(self.container)
    }

    /// Returns a cursor at the first element.
    #[inline]
    pub fn begin(&self) -> Cursor<'a> {
        Cursor::new(self.raw_begin())
    }

    /// Returns a cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<'a> {
        Cursor::new(self.raw_end())
    }

    /// Returns the element at `index`, or `None` if `index` is out of range.
    ///
    /// The element is reached by moving a cursor from the first element, so
    /// this takes linear time unless the container is random access.
    pub fn at(&self, index: usize) -> Option<Value<'a>> {
        if index >= self.size() {
            return None;
        }
        let step = isize::try_from(index).ok()?;
        let mut cursor = self.raw_begin();
        cursor.advance(step);
        cursor.get().map(Value::from_element)
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.raw_begin(), self.raw_end(), self.size())
    }

    fn raw_begin(&self) -> RawCursor<'a> {
        // SAFETY:
        // 1. The container is tagged with the sequence tag of the table (checked
        //    in `Iterable::new`)
        unsafe { self.table.begin(self.container) }
    }

    fn raw_end(&self) -> RawCursor<'a> {
        // SAFETY:
        // 1. The container is tagged with the sequence tag of the table (checked
        //    in `Iterable::new`)
        unsafe { self.table.end(self.container) }
    }
}

impl core::fmt::Debug for Iterable<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iterable")
            .field("sequence", &self.table.sequence_tag())
            .field("element", &self.table.element_tag())
            .field("capabilities", &self.table.capabilities())
            .finish()
    }
}

impl<'a> IntoIterator for &Iterable<'a> {
    type Item = Value<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for Iterable<'a> {
    type Item = Value<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
