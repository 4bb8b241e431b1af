//! Commonly used items for convenient importing.
//!
//! ```rust
//! use typerase::prelude::*;
//!
//! let registry = Registry::new();
//! let numbers = [1, 2, 3];
//! let sum: i32 = registry
//!     .wrap(&numbers)
//!     .as_iterable(&registry)
//!     .iter()
//!     .map(|value| value.reinterpret_as::<i32>().unwrap())
//!     .sum();
//! assert_eq!(sum, 6);
//! ```

pub use crate::{
    Cursor, Iterable, Registry, TypeTag, Value,
    sequence::{Category, ContiguousSequence, LinkedSequence, Position, Sequence},
};
