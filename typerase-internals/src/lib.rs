#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`typerase`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased data structures and unsafe
//! operations that power the [`typerase`] library. It erases both the
//! concrete type of a container and the type of its cursor, while keeping
//! enough information around to iterate the container again.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`typerase`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`tag`]**: [`TypeTag`], the runtime name of a static type
//! - **[`value`]**: [`RawValueRef`], a tag plus a borrowed, type-erased pointer
//! - **[`sequence`]**: The contract a container has to fulfil to be iterated
//!   through an erased view
//!   - [`Sequence`]: Element type and [`Layout`] of the container
//!   - [`ContiguousSequence`]: Containers whose cursor is an element address
//!   - [`LinkedSequence`]: Containers whose cursor is a standalone
//!     [`Position`] object
//! - **[`cursor`]**: Type-erased cursors
//!   - [`RawCursor`]: Owned cursor slot together with its vtable
//!   - [`CursorVtable`]: Function pointers for type-erased dispatch, in an
//!     address flavour and a boxed flavour
//!
//! # Safety Strategy
//!
//! A [`RawCursor`] stores its position in a single pointer-sized slot. For
//! contiguous containers the slot holds the address of the current element;
//! for every other container it holds a pointer obtained from
//! [`Box::into_raw`]. The vtable that interprets the slot is chosen from the
//! container type when the cursor is created and is never replaced, so the
//! slot and its interpretation cannot get out of sync.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: The slot and vtable fields are
//!   module-private, making invariants locally verifiable within a single file
//! - **Lifetime-carrying handles**: [`RawValueRef<'a>`] and [`RawCursor<'a>`]
//!   behave like `&'a T` even though `T` is unknown
//! - **Documented vtable contracts**: Each vtable method specifies exactly when
//!   it can be safely called
//!
//! [`typerase`]: https://docs.rs/typerase/latest/typerase/
//! [`TypeTag`]: tag::TypeTag
//! [`RawValueRef`]: value::RawValueRef
//! [`RawValueRef<'a>`]: value::RawValueRef
//! [`Sequence`]: sequence::Sequence
//! [`Layout`]: sequence::Layout
//! [`ContiguousSequence`]: sequence::ContiguousSequence
//! [`LinkedSequence`]: sequence::LinkedSequence
//! [`Position`]: sequence::Position
//! [`RawCursor`]: cursor::RawCursor
//! [`RawCursor<'a>`]: cursor::RawCursor
//! [`CursorVtable`]: cursor::vtable::CursorVtable
//! [`Box::into_raw`]: alloc::boxed::Box::into_raw

extern crate alloc;

pub mod cursor;
pub mod sequence;
pub mod tag;
mod util;
pub mod value;

pub use cursor::RawCursor;
pub use util::Erased;
pub use value::RawValueRef;
