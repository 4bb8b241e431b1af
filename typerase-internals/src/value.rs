//! Type-erased borrowed values.
//!
//! This module encapsulates the `ptr` field of [`RawValueRef`], ensuring it is
//! only visible within this module. This visibility restriction guarantees the
//! safety invariant: **the pointer always points to an initialized value of the
//! type named by the tag, borrowed for `'a`**.
//!
//! # Safety Invariant
//!
//! The fields can only be set via [`RawValueRef::new`], which takes a typed
//! `&'a T`, or via the unsafe [`RawValueRef::from_raw_parts`], whose caller has
//! to uphold the invariant. There is no way to change either field afterwards.

use core::{marker::PhantomData, ptr::NonNull};

use crate::{tag::TypeTag, util::Erased};

/// A lifetime-bound pointer to a value of some static type, together with the
/// [`TypeTag`] of that type.
///
/// We cannot use a `&'a T` directly, because that would require us to know
/// the actual type of the value, which we do not.
///
/// The pointee is never owned: this behaves like a shared reference.
#[derive(Clone, Copy)]
pub struct RawValueRef<'a> {
    /// Tag of the type of the pointee
    tag: TypeTag,

    /// Pointer to the value
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer points to an initialized value of the type named by
    ///    `tag`.
    /// 2. The pointee is valid for shared access for the entire lifetime `'a`.
    ptr: NonNull<Erased>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a Erased`
    _marker: PhantomData<&'a Erased>,
}

impl<'a> RawValueRef<'a> {
    /// Creates a new [`RawValueRef`] borrowing `value`.
    #[inline]
    pub fn new<T: 'static>(value: &'a T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            // SAFETY:
            // 1. The pointer comes from a `&'a T` and the tag is the tag of `T`
            // 2. The shared borrow lives for `'a`
            ptr: NonNull::from(value).cast::<Erased>(),
            _marker: PhantomData,
        }
    }

    /// Creates a new [`RawValueRef`] from a tag and a pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to an initialized value of the type named by `tag`.
    /// 2. The pointee stays valid for shared access, and is not mutated, for
    ///    the entire lifetime `'a`.
    #[inline]
    pub unsafe fn from_raw_parts(tag: TypeTag, ptr: NonNull<Erased>) -> Self {
        Self {
            tag,
            ptr,
            _marker: PhantomData,
        }
    }

    /// Returns the [`TypeTag`] of the pointee.
    #[inline]
    pub fn tag(self) -> TypeTag {
        self.tag
    }

    /// Returns the type-erased pointer to the pointee.
    #[inline]
    pub fn as_ptr(self) -> NonNull<Erased> {
        self.ptr
    }

    /// Accesses the pointee as a reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `T` matches the type named by the
    /// tag of this [`RawValueRef`].
    #[inline]
    pub unsafe fn downcast_unchecked<T: 'static>(self) -> &'a T {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.tag, TypeTag::of::<T>());

        let this = self.ptr.cast::<T>();
        // SAFETY: Converting the NonNull pointer to a reference is sound because:
        // - The pointer is non-null, properly aligned, and dereferenceable (guaranteed
        //   by the invariants of this type)
        // - The pointee is initialized and of type `T` (guaranteed by the caller)
        // - Only shared access is handed out, for the lifetime `'a`
        unsafe { this.as_ref() }
    }
}

impl core::fmt::Debug for RawValueRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawValueRef")
            .field("tag", &self.tag)
            .field("ptr", &self.ptr)
            .finish()
    }
}
