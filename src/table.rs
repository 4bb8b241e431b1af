//! Per-type operation tables.

use core::marker::PhantomData;

use triomphe::Arc;
use typerase_internals::{
    RawCursor, RawValueRef,
    sequence::{Capabilities, Category, Layout, Sequence},
};
use unsize::CoerceUnsize;

use crate::TypeTag;

/// Container-level operations of one container type, with the type erased.
pub(crate) trait SequenceOps: 'static + Send + Sync {
    fn sequence_tag(&self) -> TypeTag;

    fn element_tag(&self) -> TypeTag;

    fn capabilities(&self) -> Capabilities;

    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The tag of `container` is [`SequenceOps::sequence_tag`].
    unsafe fn size(&self, container: RawValueRef<'_>) -> usize;

    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The tag of `container` is [`SequenceOps::sequence_tag`].
    unsafe fn begin<'a>(&self, container: RawValueRef<'a>) -> RawCursor<'a>;

    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The tag of `container` is [`SequenceOps::sequence_tag`].
    unsafe fn end<'a>(&self, container: RawValueRef<'a>) -> RawCursor<'a>;
}

struct SequenceTable<S>(PhantomData<fn() -> S>);

impl<S: Sequence> SequenceOps for SequenceTable<S> {
    fn sequence_tag(&self) -> TypeTag {
        TypeTag::of::<S>()
    }

    fn element_tag(&self) -> TypeTag {
        TypeTag::of::<S::Item>()
    }

    fn capabilities(&self) -> Capabilities {
        <S::Layout as Layout<S>>::CAPABILITIES
    }

    unsafe fn size(&self, container: RawValueRef<'_>) -> usize {
        // SAFETY:
        // 1. Guaranteed by the caller
        let sequence = unsafe { container.downcast_unchecked::<S>() };
        <S::Layout as Layout<S>>::size(sequence)
    }

    unsafe fn begin<'a>(&self, container: RawValueRef<'a>) -> RawCursor<'a> {
        // SAFETY:
        // 1. Guaranteed by the caller
        let sequence = unsafe { container.downcast_unchecked::<S>() };
        <S::Layout as Layout<S>>::begin(sequence)
    }

    unsafe fn end<'a>(&self, container: RawValueRef<'a>) -> RawCursor<'a> {
        // SAFETY:
        // 1. Guaranteed by the caller
        let sequence = unsafe { container.downcast_unchecked::<S>() };
        <S::Layout as Layout<S>>::end(sequence)
    }
}

/// The operations needed to iterate one container type after its type has
/// been erased.
///
/// A table is built once per container type by [`Registry::register`] and
/// never changes afterwards. Cloning a table only bumps a reference count.
///
/// # Examples
///
/// ```
/// use std::collections::LinkedList;
///
/// use typerase::{OperationTable, TypeTag, sequence::Category};
///
/// let table = OperationTable::of::<LinkedList<i32>>();
/// assert_eq!(table.element_tag(), TypeTag::of::<i32>());
/// assert_eq!(table.category(), Category::Bidirectional);
/// ```
///
/// [`Registry::register`]: crate::Registry::register
#[derive(Clone)]
pub struct OperationTable {
    ops: Arc<dyn SequenceOps>,
}

impl OperationTable {
    /// Builds the table of the container type `S`.
    ///
    /// Most code should go through [`Registry::register`] instead, which
    /// reuses the table of types that were seen before.
    ///
    /// [`Registry::register`]: crate::Registry::register
    pub fn of<S: Sequence>() -> Self {
        let ops = Arc::new(SequenceTable::<S>(PhantomData));
        let ops = ops.unsize(unsize::Coercion!(to dyn SequenceOps));
        Self { ops }
    }

    /// Returns the tag of the container type this table operates on.
    #[inline]
    pub fn sequence_tag(&self) -> TypeTag {
        self.ops.sequence_tag()
    }

    /// Returns the tag of the element type of the container.
    #[inline]
    pub fn element_tag(&self) -> TypeTag {
        self.ops.element_tag()
    }

    /// Returns the movements cursors of this container type support.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.ops.capabilities()
    }

    /// Returns the iteration category of this container type.
    #[inline]
    pub fn category(&self) -> Category {
        self.capabilities().category()
    }

    /// Returns `true` if both handles refer to the same table.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ops, &other.ops)
    }

    /// Returns the number of elements of `container`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The tag of `container` is the sequence tag of this table.
    #[inline]
    pub(crate) unsafe fn size(&self, container: RawValueRef<'_>) -> usize {
        debug_assert_eq!(container.tag(), self.sequence_tag());

        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.ops.size(container) }
    }

    /// Returns a cursor at the first element of `container`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The tag of `container` is the sequence tag of this table.
    #[inline]
    pub(crate) unsafe fn begin<'a>(&self, container: RawValueRef<'a>) -> RawCursor<'a> {
        debug_assert_eq!(container.tag(), self.sequence_tag());

        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.ops.begin(container) }
    }

    /// Returns a cursor one past the last element of `container`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The tag of `container` is the sequence tag of this table.
    #[inline]
    pub(crate) unsafe fn end<'a>(&self, container: RawValueRef<'a>) -> RawCursor<'a> {
        debug_assert_eq!(container.tag(), self.sequence_tag());

        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.ops.end(container) }
    }
}

impl core::fmt::Debug for OperationTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OperationTable")
            .field("sequence", &self.sequence_tag())
            .field("element", &self.element_tag())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        collections::{LinkedList, VecDeque},
        vec,
        vec::Vec,
    };

    use super::*;

    #[test]
    fn test_table_send_sync() {
        static_assertions::assert_impl_all!(OperationTable: Send, Sync, Clone);
    }

    #[test]
    fn test_table_metadata() {
        let table = OperationTable::of::<Vec<u16>>();
        assert_eq!(table.sequence_tag(), TypeTag::of::<Vec<u16>>());
        assert_eq!(table.element_tag(), TypeTag::of::<u16>());
        assert_eq!(table.category(), Category::RandomAccess);

        let table = OperationTable::of::<VecDeque<bool>>();
        assert_eq!(table.category(), Category::RandomAccess);

        let table = OperationTable::of::<LinkedList<()>>();
        assert_eq!(table.category(), Category::Bidirectional);
    }

    #[test]
    fn test_table_clone_shares() {
        let table = OperationTable::of::<[u8; 4]>();
        let clone = table.clone();
        assert!(table.ptr_eq(&clone));
        assert!(!table.ptr_eq(&OperationTable::of::<[u8; 4]>()));
    }

    #[test]
    fn test_table_operations() {
        let values = vec![4_i32, 7, 4, 1];
        let table = OperationTable::of::<Vec<i32>>();
        let container = RawValueRef::new(&values);

        // SAFETY: the container is a `Vec<i32>`
        assert_eq!(unsafe { table.size(container) }, 4);
        // SAFETY: the container is a `Vec<i32>`
        let mut cursor = unsafe { table.begin(container) };
        // SAFETY: the container is a `Vec<i32>`
        let end = unsafe { table.end(container) };
        cursor.advance(4);
        assert!(cursor.position_eq(&end));
    }

    #[test]
    fn test_table_debug() {
        let table = OperationTable::of::<Vec<u8>>();
        assert_eq!(
            alloc::format!("{table:?}"),
            "OperationTable { sequence: TypeTag(alloc::vec::Vec<u8>), element: TypeTag(u8), \
             capabilities: {FORWARD, BIDIRECTIONAL, RANDOM_ACCESS} }"
        );
    }
}
