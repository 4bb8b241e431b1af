#![no_std]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Read-only iteration over containers whose concrete type has been erased.
//!
//! ## Overview
//!
//! Rust generics are resolved at compile time: code that iterates a
//! `Vec<i32>` has to know it is a `Vec<i32>`. This crate lets code iterate a
//! container it only sees as an opaque [`Value`], without knowing either the
//! container type or the element type. Every element comes out as another
//! [`Value`], which can be read back as a concrete type once the caller
//! knows what it is.
//!
//! ## Quick Example
//!
//! ```
//! use typerase::{Registry, Value};
//!
//! fn describe(registry: &Registry, value: Value<'_>) -> Vec<String> {
//!     value
//!         .as_iterable(registry)
//!         .iter()
//!         .map(|element| element.type_name().to_string())
//!         .collect()
//! }
//!
//! let registry = Registry::new();
//! let words = vec![String::from("fee"), String::from("fih")];
//! let names = describe(&registry, registry.wrap(&words));
//! assert_eq!(names, ["alloc::string::String", "alloc::string::String"]);
//! ```
//!
//! ## Core Concepts
//!
//! - A [`Value`] is a [`TypeTag`] plus a shared reference. It never owns
//!   data and lives no longer than the value it borrows.
//! - A [`Registry`] maps container types to their [`OperationTable`]: the
//!   handful of operations needed to iterate the container once its type is
//!   erased. Wrapping a container with [`Registry::wrap`] registers its type.
//! - An [`Iterable`] is the read-only view of one registered container. It
//!   knows the size of the container, whether it can be iterated backward,
//!   and hands out [`Cursor`]s and [`Iter`]ators.
//! - A [`Cursor`] is one position inside the container. Cloning a cursor
//!   aliases it; [`Cursor::duplicate`] detaches a copy.
//!
//! A container type takes part by implementing [`sequence::Sequence`] and one
//! of [`sequence::ContiguousSequence`] or [`sequence::LinkedSequence`]. The
//! `alloc` collections `Vec`, `Box<[T]>`, arrays, `VecDeque` and `LinkedList`
//! are supported out of the box.
//!
//! For implementation details, see the [`typerase-internals`] crate.
//!
//! [`typerase-internals`]: typerase_internals
//!
//! ## Features
//!
//! - **`std`** (default): Uses the standard library's `RwLock` for the
//!   registry. Without it the crate is `no_std` and uses a spin lock.
//! - **`tracing`**: Emits [`tracing`](https://docs.rs/tracing) events when
//!   types are registered and when a view of an unregistered type is
//!   requested.
//!
//! ## Misuse
//!
//! Requesting a view of an unregistered type, moving a forward-only cursor
//! backward and dereferencing a cursor that is not on an element are bugs in
//! the caller and panic. Where a check is cheap a non-panicking counterpart
//! exists: [`Registry::try_iterable`], [`Cursor::try_get`],
//! [`Value::reinterpret_as`].

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod cursor;
mod error;
mod iter;
mod iterable;
mod lock;
pub mod prelude;
pub mod registry;
mod table;
mod value;

pub use typerase_internals::{sequence, tag::TypeTag};

pub use self::{
    cursor::Cursor,
    error::{ReinterpretError, UnregisteredTypeError},
    iter::Iter,
    iterable::Iterable,
    registry::Registry,
    table::OperationTable,
    value::Value,
};
