//! Errors returned by the checked operations.
//!
//! Every failure in this crate is a misuse by the caller. The unchecked
//! operations ([`Registry::iterable`], [`Cursor::get`], backward movement on a
//! forward-only cursor) panic; the checked counterparts return the errors of
//! this module instead.
//!
//! [`Registry::iterable`]: crate::Registry::iterable
//! [`Cursor::get`]: crate::Cursor::get

use crate::TypeTag;

/// A [`Value`] was read as a type it does not hold.
///
/// Returned by [`Value::reinterpret_as`] and [`Value::downcast_ref`].
///
/// # Examples
///
/// ```
/// use typerase::{TypeTag, Value};
///
/// let value = Value::new(&3_u8);
/// let error = value.reinterpret_as::<i64>().unwrap_err();
/// assert_eq!(error.expected(), TypeTag::of::<i64>());
/// assert_eq!(error.actual(), TypeTag::of::<u8>());
/// ```
///
/// [`Value`]: crate::Value
/// [`Value::reinterpret_as`]: crate::Value::reinterpret_as
/// [`Value::downcast_ref`]: crate::Value::downcast_ref
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ReinterpretError {
    expected: TypeTag,
    actual: TypeTag,
}

impl ReinterpretError {
    pub(crate) fn new(expected: TypeTag, actual: TypeTag) -> Self {
        Self { expected, actual }
    }

    /// The type the caller asked for.
    pub fn expected(&self) -> TypeTag {
        self.expected
    }

    /// The type the value actually holds.
    pub fn actual(&self) -> TypeTag {
        self.actual
    }
}

impl core::fmt::Debug for ReinterpretError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReinterpretError")
            .field("expected", &self.expected.name())
            .field("actual", &self.actual.name())
            .finish()
    }
}

impl core::fmt::Display for ReinterpretError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "cannot reinterpret a value of type `{}` as `{}`",
            self.actual, self.expected
        )
    }
}

impl core::error::Error for ReinterpretError {}

/// No operation table is registered for the type of a [`Value`].
///
/// Returned by [`Registry::try_iterable`]; usually means the value wraps a
/// scalar, or a container that was created with [`Value::new`] instead of
/// [`Registry::wrap`].
///
/// [`Value`]: crate::Value
/// [`Value::new`]: crate::Value::new
/// [`Registry::try_iterable`]: crate::Registry::try_iterable
/// [`Registry::wrap`]: crate::Registry::wrap
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct UnregisteredTypeError {
    tag: TypeTag,
}

impl UnregisteredTypeError {
    pub(crate) fn new(tag: TypeTag) -> Self {
        Self { tag }
    }

    /// The type that has no operation table.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }
}

impl core::fmt::Debug for UnregisteredTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UnregisteredTypeError")
            .field("tag", &self.tag.name())
            .finish()
    }
}

impl core::fmt::Display for UnregisteredTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "type `{}` is not registered as an iterable sequence",
            self.tag
        )
    }
}

impl core::error::Error for UnregisteredTypeError {}
