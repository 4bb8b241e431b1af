//! Vtable for type-erased cursor operations.
//!
//! This module contains the [`CursorVtable`] which enables moving,
//! dereferencing, comparing, copying and destroying cursors when the concrete
//! container type `S` has been erased. The vtable stores function pointers
//! that dispatch to the correct typed implementations.
//!
//! This module encapsulates the fields of [`CursorVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's container type must match the container that the
//! cursor slot was created from**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`CursorVtable::contiguous`] and [`CursorVtable::linked`],
//! which pair the function pointers with a specific container type `S` at
//! compile time.

use alloc::boxed::Box;
use core::ptr::NonNull;

use crate::{
    sequence::{Capabilities, ContiguousSequence, Layout, LinkedSequence, Sequence},
    tag::TypeTag,
    util::Erased,
};

/// Vtable for type-erased cursor operations.
///
/// # Safety Invariant
///
/// The fields `duplicate`, `advance`, `destroy`, `get` and `equal` are
/// guaranteed to point to the functions of either the `address` or the
/// `boxed` module below, all instantiated with the container type `S` that
/// `sequence_tag` names.
pub(crate) struct CursorVtable {
    /// Tag of the container type that was used to create this vtable.
    sequence_tag: TypeTag,
    /// Tag of the element type of that container.
    element_tag: TypeTag,
    /// Movements supported by the cursor.
    capabilities: Capabilities,
    /// Creates a new, independent slot at the same position.
    duplicate: unsafe fn(*mut Erased) -> *mut Erased,
    /// Moves the slot by a signed number of elements.
    advance: unsafe fn(&mut *mut Erased, isize),
    /// Releases whatever the slot owns.
    destroy: unsafe fn(*mut Erased),
    /// Gets the address of the current element, if there is one.
    get: unsafe fn(NonNull<Erased>, *mut Erased) -> Option<NonNull<Erased>>,
    /// Compares two slots.
    equal: unsafe fn(*mut Erased, *mut Erased) -> bool,
}

impl CursorVtable {
    /// Creates the address-flavoured [`CursorVtable`] for the container type
    /// `S`.
    pub(super) const fn contiguous<S: ContiguousSequence>() -> &'static Self {
        const {
            &Self {
                sequence_tag: TypeTag::of::<S>(),
                element_tag: TypeTag::of::<S::Item>(),
                capabilities: <S::Layout as Layout<S>>::CAPABILITIES,
                duplicate: address::duplicate,
                advance: address::advance::<S::Item>,
                destroy: address::destroy,
                get: address::get::<S>,
                equal: address::equal,
            }
        }
    }

    /// Creates the boxed [`CursorVtable`] for the container type `S`.
    pub(super) const fn linked<S: LinkedSequence>() -> &'static Self {
        const {
            &Self {
                sequence_tag: TypeTag::of::<S>(),
                element_tag: TypeTag::of::<S::Item>(),
                capabilities: <S::Layout as Layout<S>>::CAPABILITIES,
                duplicate: boxed::duplicate::<S>,
                advance: boxed::advance::<S>,
                destroy: boxed::destroy::<S>,
                get: boxed::get::<S>,
                equal: boxed::equal::<S>,
            }
        }
    }

    /// Gets the tag of the container type.
    #[inline]
    pub(super) fn sequence_tag(&self) -> TypeTag {
        self.sequence_tag
    }

    /// Gets the tag of the element type.
    #[inline]
    pub(super) fn element_tag(&self) -> TypeTag {
        self.element_tag
    }

    /// Gets the capabilities of cursors using this vtable.
    #[inline]
    pub(super) fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Creates a new slot at the same position as `slot`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` was created for the container type of this vtable and has
    ///    not been destroyed.
    #[inline]
    pub(super) unsafe fn duplicate(&self, slot: *mut Erased) -> *mut Erased {
        // SAFETY: We know that `self.duplicate` points to a function instantiated
        // with our container type. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.duplicate)(slot) }
    }

    /// Moves `slot` by `step` elements.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` was created for the container type of this vtable and has
    ///    not been destroyed.
    /// 2. `step` is non-negative unless the capabilities of this vtable
    ///    include [`Capabilities::BIDIRECTIONAL`].
    #[inline]
    pub(super) unsafe fn advance(&self, slot: &mut *mut Erased, step: isize) {
        // SAFETY: We know that `self.advance` points to a function instantiated
        // with our container type. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.advance)(slot, step) }
    }

    /// Releases whatever `slot` owns.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` was created for the container type of this vtable.
    /// 2. This method destroys the slot, so the caller must ensure that it has
    ///    not previously been destroyed and that it will not be used after
    ///    calling this method.
    #[inline]
    pub(super) unsafe fn destroy(&self, slot: *mut Erased) {
        // SAFETY: We know that `self.destroy` points to a function instantiated
        // with our container type. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.destroy)(slot) }
    }

    /// Gets the address of the element at `slot`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `container` points to a live instance of the container type of this
    ///    vtable.
    /// 2. `slot` was created from that container and has not been destroyed.
    #[inline]
    pub(super) unsafe fn get(
        &self,
        container: NonNull<Erased>,
        slot: *mut Erased,
    ) -> Option<NonNull<Erased>> {
        // SAFETY: We know that `self.get` points to a function instantiated
        // with our container type. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.get)(container, slot) }
    }

    /// Compares the positions of two slots.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. Both slots were created for the container type of this vtable and
    ///    have not been destroyed.
    #[inline]
    pub(super) unsafe fn equal(&self, slot: *mut Erased, other: *mut Erased) -> bool {
        // SAFETY: We know that `self.equal` points to a function instantiated
        // with our container type. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.equal)(slot, other) }
    }
}

/// Distance in bytes between two consecutive elements of type `T`.
///
/// Zero-sized elements are spaced by their alignment so that every position
/// has its own address while staying properly aligned.
#[inline]
pub(super) const fn stride<T>() -> usize {
    if size_of::<T>() == 0 {
        align_of::<T>()
    } else {
        size_of::<T>()
    }
}

/// Entry points for cursors whose slot is the address of the current element.
mod address {
    use super::*;

    /// Copies the address; the slot owns nothing.
    pub(super) unsafe fn duplicate(slot: *mut Erased) -> *mut Erased {
        slot
    }

    /// Moves the address by `step` elements.
    ///
    /// Wrapping arithmetic keeps this free of undefined behavior even for
    /// out-of-range positions; [`get`] refuses to dereference those.
    pub(super) unsafe fn advance<T>(slot: &mut *mut Erased, step: isize) {
        *slot = slot.wrapping_byte_offset(step.wrapping_mul(stride::<T>() as isize));
    }

    /// Nothing to release.
    pub(super) unsafe fn destroy(_slot: *mut Erased) {}

    /// Returns the current element if the address lies on an element of the
    /// container.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `container` points to a live `S`.
    pub(super) unsafe fn get<S: ContiguousSequence>(
        container: NonNull<Erased>,
        slot: *mut Erased,
    ) -> Option<NonNull<Erased>> {
        // SAFETY:
        // 1. Guaranteed by the caller
        let container: &S = unsafe { container.cast::<S>().as_ref() };
        let elements = container.as_slice();

        let offset = slot.addr().wrapping_sub(elements.as_ptr().addr());
        let stride = stride::<S::Item>();
        if offset % stride != 0 {
            return None;
        }
        let element = elements.get(offset / stride)?;
        Some(NonNull::from(element).cast::<Erased>())
    }

    /// Compares two addresses.
    pub(super) unsafe fn equal(slot: *mut Erased, other: *mut Erased) -> bool {
        core::ptr::eq(slot, other)
    }
}

/// Entry points for cursors whose slot points to a boxed
/// `S::Position<'_>`.
///
/// The boxed position borrows the container for some lifetime that is not
/// visible here. Every function views it as `S::Position<'static>`, which has
/// the same layout; the [`RawCursor`] owning the slot makes sure no borrow
/// escapes the real lifetime.
///
/// [`RawCursor`]: crate::cursor::RawCursor
mod boxed {
    use super::*;
    use crate::sequence::Position;

    /// Clones the boxed position into a new box.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` comes from `Box<S::Position<'_>>` via `Box::into_raw` and
    ///    has not been freed.
    pub(super) unsafe fn duplicate<S: LinkedSequence>(slot: *mut Erased) -> *mut Erased {
        // SAFETY:
        // 1. Guaranteed by the caller
        let position: &S::Position<'static> =
            unsafe { &*slot.cast::<S::Position<'static>>().cast_const() };
        Box::into_raw(Box::new(position.clone())).cast::<Erased>()
    }

    /// Forwards the movement to the boxed position.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` comes from `Box<S::Position<'_>>` via `Box::into_raw` and
    ///    has not been freed.
    pub(super) unsafe fn advance<S: LinkedSequence>(slot: &mut *mut Erased, step: isize) {
        // SAFETY:
        // 1. Guaranteed by the caller. The slot is exclusively borrowed, so is
        //    the box behind it.
        let position: &mut S::Position<'static> =
            unsafe { &mut *slot.cast::<S::Position<'static>>() };
        position.advance(step);
    }

    /// Frees the boxed position.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` comes from `Box<S::Position<'_>>` via `Box::into_raw`.
    /// 2. The box has not been freed before and `slot` is not used afterwards.
    pub(super) unsafe fn destroy<S: LinkedSequence>(slot: *mut Erased) {
        // SAFETY:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        let boxed = unsafe { Box::from_raw(slot.cast::<S::Position<'static>>()) };
        core::mem::drop(boxed);
    }

    /// Gets the element the boxed position is on.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` comes from `Box<S::Position<'_>>` via `Box::into_raw` and
    ///    has not been freed.
    pub(super) unsafe fn get<S: LinkedSequence>(
        _container: NonNull<Erased>,
        slot: *mut Erased,
    ) -> Option<NonNull<Erased>> {
        // SAFETY:
        // 1. Guaranteed by the caller
        let position: &S::Position<'static> =
            unsafe { &*slot.cast::<S::Position<'static>>().cast_const() };
        let element = position.get()?;
        Some(NonNull::from(element).cast::<Erased>())
    }

    /// Compares two boxed positions.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. Both slots come from `Box<S::Position<'_>>` via `Box::into_raw` and
    ///    have not been freed.
    pub(super) unsafe fn equal<S: LinkedSequence>(slot: *mut Erased, other: *mut Erased) -> bool {
        // SAFETY:
        // 1. Guaranteed by the caller
        let position: &S::Position<'static> =
            unsafe { &*slot.cast::<S::Position<'static>>().cast_const() };
        // SAFETY:
        // 1. Guaranteed by the caller
        let other: &S::Position<'static> =
            unsafe { &*other.cast::<S::Position<'static>>().cast_const() };
        position == other
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        collections::{LinkedList, VecDeque},
        vec::Vec,
    };

    use super::*;
    use crate::sequence::Category;

    #[test]
    fn test_cursor_vtable_eq() {
        // Vtables are static and built once per container type
        let vtable1 = CursorVtable::contiguous::<Vec<i32>>();
        let vtable2 = CursorVtable::contiguous::<Vec<i32>>();
        assert!(core::ptr::eq(vtable1, vtable2));

        let vtable1 = CursorVtable::linked::<LinkedList<i32>>();
        let vtable2 = CursorVtable::linked::<LinkedList<i32>>();
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_cursor_vtable_tags() {
        let vtable = CursorVtable::linked::<VecDeque<bool>>();
        assert_eq!(vtable.sequence_tag(), TypeTag::of::<VecDeque<bool>>());
        assert_eq!(vtable.element_tag(), TypeTag::of::<bool>());
        assert_eq!(
            vtable.capabilities(),
            Capabilities::from_category(Category::RandomAccess)
        );

        let vtable = CursorVtable::linked::<LinkedList<f64>>();
        assert_eq!(vtable.element_tag(), TypeTag::of::<f64>());
        assert!(!vtable.capabilities().is_random_access());
        assert!(vtable.capabilities().is_bidirectional());
    }

    #[test]
    fn test_stride() {
        assert_eq!(stride::<u8>(), 1);
        assert_eq!(stride::<u64>(), 8);
        assert_eq!(stride::<()>(), 1);

        /// Zero-sized type with a large alignment
        #[repr(align(16))]
        struct Aligned;
        assert_eq!(stride::<Aligned>(), 16);
    }
}
