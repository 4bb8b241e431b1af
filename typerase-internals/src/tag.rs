//! Runtime identifiers for static types.
//!
//! A [`TypeTag`] names a static type at runtime. It is used as the key of the
//! operation-table registry and is carried by every type-erased value so that
//! the value can later be checked against a concrete type.
//!
//! # Uniqueness
//!
//! Tags compare and hash through [`TypeId`], so two tags are equal exactly
//! when the compiler considers the types equal. This holds within one build of
//! a program. Tags are not stable across builds and must never be persisted.
//! The type name is kept for diagnostics only and plays no part in equality.

use core::{
    any::TypeId,
    hash::{Hash, Hasher},
};

/// Process-local identifier of a static type.
///
/// # Examples
///
/// ```
/// use typerase_internals::tag::TypeTag;
///
/// const INT: TypeTag = TypeTag::of::<i32>();
///
/// assert_eq!(INT, TypeTag::of::<i32>());
/// assert_ne!(INT, TypeTag::of::<u32>());
/// assert_eq!(INT.name(), "i32");
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    /// Gets the [`TypeId`] of the tagged type.
    ///
    /// Stored as a function pointer because [`TypeId::of`] is not usable in
    /// `const` contexts on stable Rust.
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the tagged type.
    type_name: fn() -> &'static str,
}

impl TypeTag {
    /// Returns the tag of the type `T`.
    #[inline]
    pub const fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: core::any::type_name::<T>,
        }
    }

    /// Returns the [`TypeId`] of the tagged type.
    #[inline]
    pub fn type_id(self) -> TypeId {
        (self.type_id)()
    }

    /// Returns the [`core::any::type_name`] of the tagged type.
    #[inline]
    pub fn name(self) -> &'static str {
        (self.type_name)()
    }

    /// Returns `true` if this is the tag of the type `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl core::fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "TypeTag({})", self.name())
    }
}

impl core::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String, vec::Vec};

    use super::*;

    #[test]
    fn test_tag_equality_follows_type_id() {
        assert_eq!(TypeTag::of::<Vec<i32>>(), TypeTag::of::<Vec<i32>>());
        assert_ne!(TypeTag::of::<Vec<i32>>(), TypeTag::of::<Vec<u32>>());
        assert!(TypeTag::of::<String>().is::<String>());
        assert!(!TypeTag::of::<String>().is::<&'static str>());
    }

    #[test]
    fn test_tag_hash_matches_type_id_hash() {
        use core::hash::BuildHasher;

        let state = TestBuildHasher;
        assert_eq!(
            state.hash_one(TypeTag::of::<u8>()),
            state.hash_one(TypeId::of::<u8>())
        );
    }

    #[test]
    fn test_tag_formatting() {
        assert_eq!(format!("{}", TypeTag::of::<u64>()), "u64");
        assert_eq!(format!("{:?}", TypeTag::of::<u64>()), "TypeTag(u64)");
    }

    /// Deterministic FNV-1a hasher, enough to compare two hash inputs
    #[derive(Default)]
    struct TestHasher(u64);

    impl Hasher for TestHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for byte in bytes {
                self.0 ^= u64::from(*byte);
                self.0 = self.0.wrapping_mul(0x0100_0000_01b3);
            }
        }
    }

    struct TestBuildHasher;

    impl core::hash::BuildHasher for TestBuildHasher {
        type Hasher = TestHasher;

        fn build_hasher(&self) -> TestHasher {
            TestHasher(0xcbf2_9ce4_8422_2325)
        }
    }
}
