//! Owned, type-erased cursor.
//!
//! This module encapsulates the fields of [`RawCursor`], ensuring they are
//! only visible within this module. This visibility restriction guarantees the
//! safety invariant: **the slot was produced for the container type of the
//! vtable, from the container the cursor points into**.
//!
//! # Safety Invariant
//!
//! A [`RawCursor`] can only be created by [`RawCursor::contiguous_begin`],
//! [`RawCursor::contiguous_end`] and [`RawCursor::linked`], which pick the
//! vtable from the same container type `S` they create the slot from. The
//! slot can only change through the vtable, and the vtable is never replaced.
//!
//! The [`RawCursor::drop`] implementation relies on this invariant to release
//! the boxed position of linked containers.

use alloc::boxed::Box;
use core::{marker::PhantomData, ptr::NonNull};

use crate::{
    cursor::vtable::{CursorVtable, stride},
    sequence::{Capabilities, ContiguousSequence, LinkedSequence},
    tag::TypeTag,
    util::Erased,
    value::RawValueRef,
};

/// A position inside a container borrowed for `'a`, whose concrete type is
/// unknown.
///
/// The cursor owns its slot: dropping it releases the slot, and
/// [`RawCursor::duplicate`] creates a new, independent slot at the same
/// position.
pub struct RawCursor<'a> {
    /// Pointer to the container the cursor points into
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer comes from a `&'a S` where `S` is the container type of
    ///    `vtable`.
    container: NonNull<Erased>,

    /// The position inside the container
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. For contiguous containers the slot is an address computed from the
    ///    start of the elements of `container`, possibly out of bounds.
    /// 2. For linked containers the slot was created from a
    ///    `Box<S::Position<'a>>` using `Box::into_raw` and is freed only by
    ///    the `Drop` implementation.
    slot: *mut Erased,

    /// Operations on `slot`
    vtable: &'static CursorVtable,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a Erased`
    _marker: PhantomData<&'a Erased>,
}

impl<'a> RawCursor<'a> {
    /// Creates a cursor at the first element of a contiguous container.
    #[inline]
    pub(crate) fn contiguous_begin<S: ContiguousSequence>(sequence: &'a S) -> Self {
        let slot = sequence.as_slice().as_ptr().cast::<Erased>().cast_mut();
        Self {
            container: NonNull::from(sequence).cast::<Erased>(),
            slot,
            vtable: CursorVtable::contiguous::<S>(),
            _marker: PhantomData,
        }
    }

    /// Creates a cursor one past the last element of a contiguous container.
    #[inline]
    pub(crate) fn contiguous_end<S: ContiguousSequence>(sequence: &'a S) -> Self {
        let elements = sequence.as_slice();
        let slot = elements
            .as_ptr()
            .cast::<Erased>()
            .cast_mut()
            .wrapping_byte_add(elements.len().wrapping_mul(stride::<S::Item>()));
        Self {
            container: NonNull::from(sequence).cast::<Erased>(),
            slot,
            vtable: CursorVtable::contiguous::<S>(),
            _marker: PhantomData,
        }
    }

    /// Creates a cursor that owns `position`.
    #[inline]
    pub(crate) fn linked<S: LinkedSequence>(sequence: &'a S, position: S::Position<'a>) -> Self {
        let slot = Box::into_raw(Box::new(position)).cast::<Erased>();
        Self {
            container: NonNull::from(sequence).cast::<Erased>(),
            slot,
            vtable: CursorVtable::linked::<S>(),
            _marker: PhantomData,
        }
    }

    /// Returns the [`TypeTag`] of the container type.
    #[inline]
    pub fn sequence_tag(&self) -> TypeTag {
        self.vtable.sequence_tag()
    }

    /// Returns the [`TypeTag`] of the element type.
    #[inline]
    pub fn element_tag(&self) -> TypeTag {
        self.vtable.element_tag()
    }

    /// Returns the movements this cursor supports.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.vtable.capabilities()
    }

    /// Returns the element the cursor is on, or `None` if it is not on an
    /// element, for instance at the end of the container.
    #[inline]
    pub fn get(&self) -> Option<RawValueRef<'a>> {
        // SAFETY:
        // 1. `self.container` points to a live container of the vtable's type,
        //    borrowed for `'a` (guaranteed by the invariants of this type)
        // 2. `self.slot` was created from that container and is only destroyed in
        //    `Drop` (guaranteed by the invariants of this type)
        let element = unsafe { self.vtable.get(self.container, self.slot) }?;

        // SAFETY:
        // 1. The vtable returns the address of an element of the container, whose
        //    type is the element type of the vtable
        // 2. The element belongs to the container, which is borrowed for `'a`
        Some(unsafe { RawValueRef::from_raw_parts(self.element_tag(), element) })
    }

    /// Moves the cursor by `step` elements, backward if `step` is negative.
    ///
    /// # Panics
    ///
    /// Panics if `step` is negative and the cursor is not bidirectional, or
    /// if the container refuses the movement.
    #[inline]
    pub fn advance(&mut self, step: isize) {
        assert!(
            step >= 0 || self.capabilities().is_bidirectional(),
            "cursor over `{}` cannot move backwards",
            self.sequence_tag().name()
        );

        // SAFETY:
        // 1. `self.slot` was created for the vtable's container type and is only
        //    destroyed in `Drop` (guaranteed by the invariants of this type)
        // 2. Checked by the assertion above
        unsafe { self.vtable.advance(&mut self.slot, step) }
    }

    /// Creates a new cursor at the same position, with its own slot.
    #[inline]
    pub fn duplicate(&self) -> Self {
        // SAFETY:
        // 1. `self.slot` was created for the vtable's container type and is only
        //    destroyed in `Drop` (guaranteed by the invariants of this type)
        let slot = unsafe { self.vtable.duplicate(self.slot) };
        Self {
            container: self.container,
            slot,
            vtable: self.vtable,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if both cursors point into the same container and are
    /// at the same position.
    ///
    /// Cursors into containers of different types are never at the same
    /// position.
    #[inline]
    pub fn position_eq(&self, other: &RawCursor<'_>) -> bool {
        if self.sequence_tag() != other.sequence_tag() || self.container != other.container {
            return false;
        }

        // SAFETY:
        // 1. Both slots belong to containers of the same type, which is the
        //    container type of `self.vtable`. Neither slot has been destroyed
        //    (guaranteed by the invariants of this type)
        unsafe { self.vtable.equal(self.slot, other.slot) }
    }
}

impl core::ops::Drop for RawCursor<'_> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. `self.slot` was created for the vtable's container type (guaranteed by
        //    the invariants of this type)
        // 2. The slot is only destroyed here, and is not used afterwards, as we are
        //    in the drop function
        unsafe { self.vtable.destroy(self.slot) }
    }
}

impl core::fmt::Debug for RawCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawCursor")
            .field("sequence", &self.sequence_tag())
            .field("capabilities", &self.capabilities())
            .field("slot", &self.slot)
            .finish()
    }
}
