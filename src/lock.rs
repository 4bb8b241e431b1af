#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

/// Read/write lock around an optional value, usable in `static` items.
#[repr(transparent)]
pub(crate) struct RegistryLock<T: Send + Sync>(impl_::RwLock<Option<T>>);

#[repr(transparent)]
pub(crate) struct RegistryReadGuard<'a, T: Send + Sync>(impl_::RwLockReadGuard<'a, Option<T>>);

#[repr(transparent)]
pub(crate) struct RegistryWriteGuard<'a, T: Send + Sync>(impl_::RwLockWriteGuard<'a, Option<T>>);

impl<T: Send + Sync> RegistryLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    #[must_use]
    pub(crate) fn with_value(value: T) -> Self {
        Self(impl_::RwLock::new(Some(value)))
    }

    #[inline]
    pub(crate) fn read(&self) -> RegistryReadGuard<'_, T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        // Writers never leave the value half-updated, so a poisoned lock is
        // still consistent.
        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(impl_::PoisonError::into_inner);

        RegistryReadGuard(guard)
    }

    #[inline]
    pub(crate) fn write(&self) -> RegistryWriteGuard<'_, T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.write();

        #[cfg(feature = "std")]
        let guard = self
            .0
            .write()
            .unwrap_or_else(impl_::PoisonError::into_inner);

        RegistryWriteGuard(guard)
    }
}

impl<T: Send + Sync> RegistryReadGuard<'_, T> {
    #[inline]
    pub(crate) fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T: Send + Sync> RegistryWriteGuard<'_, T> {
    #[inline]
    pub(crate) fn get(&mut self) -> &mut Option<T> {
        &mut self.0
    }
}
