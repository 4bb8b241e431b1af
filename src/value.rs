//! Type-erased borrowed values.

use typerase_internals::RawValueRef;

use crate::{Iterable, Registry, ReinterpretError, TypeTag, UnregisteredTypeError};

/// A borrowed value whose type is only known at runtime.
///
/// A `Value` is a [`TypeTag`] plus a shared reference to data it does not
/// own; it is `Copy` and lives no longer than the value it was created from.
/// It can be read back as a concrete type with a tag check, or, when it holds
/// a container registered in a [`Registry`], viewed as an [`Iterable`].
///
/// # Examples
///
/// ```
/// use typerase::{Registry, Value};
///
/// let registry = Registry::new();
/// let numbers = vec![4, 7, 4, 1];
///
/// let value: Value<'_> = registry.wrap(&numbers);
/// assert!(value.is::<Vec<i32>>());
///
/// let iterable = value.as_iterable(&registry);
/// assert_eq!(iterable.size(), 4);
///
/// let scalar = Value::new(&2.5_f32);
/// assert_eq!(scalar.reinterpret_as::<f32>(), Ok(2.5));
/// ```
#[derive(Clone, Copy)]
pub struct Value<'a> {
    raw: RawValueRef<'a>,
}

impl<'a> Value<'a> {
    /// Creates a value borrowing `value`.
    ///
    /// This does not register anything; use [`Registry::wrap`] for containers
    /// that should be iterable.
    #[inline]
    pub fn new<T: 'static>(value: &'a T) -> Self {
        Self {
            raw: RawValueRef::new(value),
        }
    }

    #[inline]
    pub(crate) fn from_raw(raw: RawValueRef<'a>) -> Self {
        Self { raw }
    }

    /// Turns an element read through a cursor into a value.
    ///
    /// Elements that are themselves values are returned as they are, so a
    /// container of values yields the wrapped values and not values of values.
    #[inline]
    pub(crate) fn from_element(raw: RawValueRef<'a>) -> Self {
        if raw.tag().is::<Value<'static>>() {
            // SAFETY: The tag was checked above
            let inner: &'a Value<'static> = unsafe { raw.downcast_unchecked::<Value<'static>>() };
            return *inner;
        }
        Self::from_raw(raw)
    }

    #[inline]
    pub(crate) fn as_raw(self) -> RawValueRef<'a> {
        self.raw
    }

    /// Returns the tag of the type of the value.
    #[inline]
    pub fn type_tag(self) -> TypeTag {
        self.raw.tag()
    }

    /// Returns the [`core::any::type_name`] of the value.
    #[inline]
    pub fn type_name(self) -> &'static str {
        self.raw.tag().name()
    }

    /// Returns `true` if the value is of type `T`.
    #[inline]
    pub fn is<T: 'static>(self) -> bool {
        self.raw.tag().is::<T>()
    }

    /// Returns a reference to the value if it is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use typerase::Value;
    ///
    /// let name = String::from("fee");
    /// let value = Value::new(&name);
    /// assert_eq!(value.downcast_ref::<String>().map(String::as_str), Ok("fee"));
    /// assert!(value.downcast_ref::<&str>().is_err());
    /// ```
    #[inline]
    pub fn downcast_ref<T: 'static>(self) -> Result<&'a T, ReinterpretError> {
        if self.is::<T>() {
            // SAFETY: The type was checked above
            Ok(unsafe { self.downcast_unchecked::<T>() })
        } else {
            Err(ReinterpretError::new(TypeTag::of::<T>(), self.type_tag()))
        }
    }

    /// Copies the value out as a `T`, if it is of type `T`.
    #[inline]
    pub fn reinterpret_as<T: Clone + 'static>(self) -> Result<T, ReinterpretError> {
        self.downcast_ref::<T>().cloned()
    }

    /// Returns a reference to the value without checking its type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The value is of type `T`, as reported by [`Value::is`].
    #[inline]
    pub unsafe fn downcast_unchecked<T: 'static>(self) -> &'a T {
        // SAFETY:
        // 1. Guaranteed by the caller
        unsafe { self.raw.downcast_unchecked::<T>() }
    }

    /// Views the value as an [`Iterable`], using the operation table
    /// registered for its type.
    ///
    /// # Panics
    ///
    /// Panics if the type of the value is not registered in `registry`, for
    /// instance because the value wraps a scalar. Use
    /// [`Value::try_as_iterable`] to check instead.
    #[inline]
    #[track_caller]
    pub fn as_iterable(self, registry: &Registry) -> Iterable<'a> {
        registry.iterable(self)
    }

    /// Views the value as an [`Iterable`], or reports that its type is not
    /// registered in `registry`.
    #[inline]
    pub fn try_as_iterable(self, registry: &Registry) -> Result<Iterable<'a>, UnregisteredTypeError> {
        registry.try_iterable(self)
    }
}

impl core::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name())
            .field("ptr", &self.raw.as_ptr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;

    #[test]
    fn test_value_send_sync() {
        static_assertions::assert_not_impl_any!(Value<'static>: Send, Sync);
        static_assertions::assert_impl_all!(Value<'static>: Copy, Clone);
    }

    #[test]
    fn test_value_tags() {
        let values = vec![1_u8];
        let value = Value::new(&values);
        assert_eq!(value.type_tag(), TypeTag::of::<Vec<u8>>());
        assert_eq!(value.type_name(), "alloc::vec::Vec<u8>");
        assert!(value.is::<Vec<u8>>());
        assert!(!value.is::<Vec<i8>>());
    }

    #[test]
    fn test_reinterpret_checks_type() {
        let word = String::from("fum");
        let value = Value::new(&word);
        assert_eq!(value.reinterpret_as::<String>().as_deref(), Ok("fum"));

        let error = value.reinterpret_as::<u32>().unwrap_err();
        assert_eq!(error.expected(), TypeTag::of::<u32>());
        assert_eq!(error.actual(), TypeTag::of::<String>());
    }

    #[test]
    fn test_downcast_ref_keeps_address() {
        let number = 9.8_f64;
        let value = Value::new(&number);
        assert!(core::ptr::eq(value.downcast_ref::<f64>().unwrap(), &number));
    }

    #[test]
    fn test_from_element_flattens_values() {
        static INNER: u16 = 7;
        let wrapped: Value<'static> = Value::new(&INNER);
        let element = RawValueRef::new(&wrapped);

        let value = Value::from_element(element);
        assert_eq!(value.type_tag(), TypeTag::of::<u16>());
        assert_eq!(value.reinterpret_as::<u16>(), Ok(7));

        let plain = Value::from_element(RawValueRef::new(&INNER));
        assert_eq!(plain.reinterpret_as::<u16>(), Ok(7));
    }
}
