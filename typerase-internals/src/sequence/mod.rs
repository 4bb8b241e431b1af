//! The contract a container has to fulfil to be iterated through a
//! type-erased view.
//!
//! Every container type implements [`Sequence`], which names its element type
//! and picks one of two [`Layout`]s:
//!
//! - [`Contiguous`]: the elements live in one slice. A cursor is simply the
//!   address of the current element and moves by pointer arithmetic. Such a
//!   cursor owns nothing and needs no allocation. The container implements
//!   [`ContiguousSequence`].
//! - [`Linked`]: the container hands out standalone [`Position`] objects.
//!   A cursor owns a heap-allocated copy of the position and forwards every
//!   movement to it. The container implements [`LinkedSequence`].
//!
//! The layout decides which flavour of [`CursorVtable`] is used for the
//! container type. This happens when the vtable is built, never while
//! iterating.
//!
//! # Examples
//!
//! A forward-only singly linked list:
//!
//! ```
//! use typerase_internals::sequence::{Category, Linked, LinkedSequence, Position, Sequence};
//!
//! struct Node {
//!     value: u8,
//!     next: Option<Box<Node>>,
//! }
//!
//! struct Stack {
//!     head: Option<Box<Node>>,
//! }
//!
//! #[derive(Clone)]
//! struct StackPosition<'a>(Option<&'a Node>);
//!
//! impl PartialEq for StackPosition<'_> {
//!     fn eq(&self, other: &Self) -> bool {
//!         match (self.0, other.0) {
//!             (Some(a), Some(b)) => core::ptr::eq(a, b),
//!             (None, None) => true,
//!             _ => false,
//!         }
//!     }
//! }
//!
//! impl<'a> Position<'a> for StackPosition<'a> {
//!     type Item = u8;
//!     const CATEGORY: Category = Category::Forward;
//!
//!     fn get(&self) -> Option<&'a u8> {
//!         self.0.map(|node| &node.value)
//!     }
//!
//!     fn step_forward(&mut self) {
//!         self.0 = self.0.and_then(|node| node.next.as_deref());
//!     }
//! }
//!
//! impl Sequence for Stack {
//!     type Item = u8;
//!     type Layout = Linked;
//! }
//!
//! impl LinkedSequence for Stack {
//!     type Position<'a> = StackPosition<'a>;
//!
//!     fn begin(&self) -> StackPosition<'_> {
//!         StackPosition(self.head.as_deref())
//!     }
//!
//!     fn end(&self) -> StackPosition<'_> {
//!         StackPosition(None)
//!     }
//! }
//! ```
//!
//! [`CursorVtable`]: crate::cursor::vtable::CursorVtable

mod capability;
mod impls;

pub use self::{
    capability::{Capabilities, Category},
    impls::{DequePosition, ListPosition},
};
use crate::cursor::RawCursor;

/// A container whose elements can be iterated through a type-erased view.
///
/// Implementors also implement [`ContiguousSequence`] or [`LinkedSequence`],
/// matching the chosen [`Layout`].
pub trait Sequence: Sized + 'static {
    /// The element type.
    type Item: 'static;

    /// Either [`Contiguous`] or [`Linked`].
    type Layout: Layout<Self>;
}

/// A container storing its elements in a single slice.
///
/// Cursors over such a container are element addresses; the
/// [`Capabilities`] are always random access and the size is the slice
/// length.
pub trait ContiguousSequence: Sequence {
    /// Returns the elements of the container.
    fn as_slice(&self) -> &[Self::Item];
}

/// A container whose cursor is a standalone [`Position`] object.
pub trait LinkedSequence: Sequence {
    /// The position type, borrowing the container for `'a`.
    type Position<'a>: Position<'a, Item = Self::Item>
    where
        Self: 'a;

    /// Returns the position of the first element, or [`end`] when the
    /// container is empty.
    ///
    /// [`end`]: LinkedSequence::end
    fn begin(&self) -> Self::Position<'_>;

    /// Returns the position one past the last element.
    fn end(&self) -> Self::Position<'_>;

    /// Returns the number of elements if the container knows it without
    /// walking its elements.
    ///
    /// The default returns `None`; the size is then computed by counting the
    /// steps from [`begin`] to [`end`].
    ///
    /// [`begin`]: LinkedSequence::begin
    /// [`end`]: LinkedSequence::end
    fn size(&self) -> Option<usize> {
        None
    }
}

/// A standalone cursor object into a container borrowed for `'a`.
///
/// Two positions into the same container compare equal exactly when they
/// refer to the same element, or are both at the end.
pub trait Position<'a>: Clone + PartialEq + 'a {
    /// The element type.
    type Item: 'static;

    /// How far this position can move.
    ///
    /// [`step_backward`] is only called when this is at least
    /// [`Category::Bidirectional`].
    ///
    /// [`step_backward`]: Position::step_backward
    const CATEGORY: Category;

    /// Returns the element at this position, or `None` when the position is
    /// not on an element, such as the end position.
    fn get(&self) -> Option<&'a Self::Item>;

    /// Moves to the next element.
    fn step_forward(&mut self);

    /// Moves to the previous element.
    ///
    /// Forward-only positions can keep the default, which panics.
    fn step_backward(&mut self) {
        panic!(
            "position type `{}` cannot move backwards",
            core::any::type_name::<Self>()
        );
    }

    /// Moves by `step` elements, backward if `step` is negative.
    ///
    /// The default repeats [`step_forward`] or [`step_backward`]; random
    /// access positions should override it.
    ///
    /// [`step_forward`]: Position::step_forward
    /// [`step_backward`]: Position::step_backward
    fn advance(&mut self, step: isize) {
        if step >= 0 {
            for _ in 0..step {
                self.step_forward();
            }
        } else {
            for _ in 0..step.unsigned_abs() {
                self.step_backward();
            }
        }
    }
}

/// Marker for [`Sequence::Layout`]: cursors are element addresses.
#[derive(Copy, Clone, Debug)]
pub enum Contiguous {}

/// Marker for [`Sequence::Layout`]: cursors are boxed [`Position`]s.
#[derive(Copy, Clone, Debug)]
pub enum Linked {}

/// Private module for sealing [`Layout`].
mod sealed {
    /// Only [`Contiguous`](super::Contiguous) and [`Linked`](super::Linked)
    /// implement this.
    pub trait Sealed {}

    impl Sealed for super::Contiguous {}
    impl Sealed for super::Linked {}
}

/// Container-level operations, implemented once per layout.
///
/// This trait is sealed; the only implementations are [`Contiguous`] and
/// [`Linked`].
pub trait Layout<S: Sequence>: sealed::Sealed + 'static {
    /// The capabilities of cursors over `S`.
    const CAPABILITIES: Capabilities;

    /// Returns the number of elements of `sequence`.
    fn size(sequence: &S) -> usize;

    /// Returns a cursor positioned at the first element of `sequence`.
    fn begin(sequence: &S) -> RawCursor<'_>;

    /// Returns a cursor positioned one past the last element of `sequence`.
    fn end(sequence: &S) -> RawCursor<'_>;
}

impl<S: ContiguousSequence> Layout<S> for Contiguous {
    const CAPABILITIES: Capabilities = Capabilities::from_category(Category::RandomAccess);

    #[inline]
    fn size(sequence: &S) -> usize {
        sequence.as_slice().len()
    }

    #[inline]
    fn begin(sequence: &S) -> RawCursor<'_> {
        RawCursor::contiguous_begin(sequence)
    }

    #[inline]
    fn end(sequence: &S) -> RawCursor<'_> {
        RawCursor::contiguous_end(sequence)
    }
}

impl<S: LinkedSequence> Layout<S> for Linked {
    const CAPABILITIES: Capabilities =
        Capabilities::from_category(<S::Position<'static> as Position<'static>>::CATEGORY);

    fn size(sequence: &S) -> usize {
        if let Some(size) = sequence.size() {
            return size;
        }

        let end = sequence.end();
        let mut position = sequence.begin();
        let mut size = 0;
        while position != end {
            position.step_forward();
            size += 1;
        }
        size
    }

    #[inline]
    fn begin(sequence: &S) -> RawCursor<'_> {
        RawCursor::linked(sequence, sequence.begin())
    }

    #[inline]
    fn end(sequence: &S) -> RawCursor<'_> {
        RawCursor::linked(sequence, sequence.end())
    }
}
