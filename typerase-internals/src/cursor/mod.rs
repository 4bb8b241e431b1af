//! Type-erased cursors.
//!
//! A [`RawCursor`] is one position inside a container whose type is unknown.
//! It consists of a pointer-sized slot and a [`CursorVtable`] that knows how
//! to interpret the slot. The vtable comes in two flavours:
//!
//! - **address**: for [`Contiguous`] containers the slot *is* the address of
//!   the current element. Copying is copying the address, destroying is a
//!   no-op and moving is pointer arithmetic.
//! - **boxed**: for [`Linked`] containers the slot points at a
//!   heap-allocated [`Position`]. Copying clones the box, destroying frees it,
//!   and every other operation is forwarded to the position.
//!
//! [`Contiguous`]: crate::sequence::Contiguous
//! [`Linked`]: crate::sequence::Linked
//! [`Position`]: crate::sequence::Position

mod raw;
pub(crate) mod vtable;

pub use self::raw::RawCursor;
