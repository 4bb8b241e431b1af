//! Iteration categories and the capability bitmask derived from them.

/// How far a container's native cursor can move.
///
/// The category of a container is fixed by its [`Layout`]: contiguous
/// containers are always [`RandomAccess`], linked containers use the
/// [`CATEGORY`] of their position type.
///
/// [`Layout`]: crate::sequence::Layout
/// [`RandomAccess`]: Category::RandomAccess
/// [`CATEGORY`]: crate::sequence::Position::CATEGORY
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Category {
    /// The cursor can only move towards the end.
    Forward,
    /// The cursor can move one step at a time in both directions.
    Bidirectional,
    /// The cursor can jump by arbitrary offsets in constant time.
    RandomAccess,
}

/// Bitmask describing which movements a type-erased cursor supports.
///
/// A bitmask is always one of `{FORWARD}`, `{FORWARD, BIDIRECTIONAL}` or
/// `{FORWARD, BIDIRECTIONAL, RANDOM_ACCESS}`, as produced by
/// [`Capabilities::from_category`]. It is fixed when the operation table of a
/// container type is built.
///
/// # Examples
///
/// ```
/// use typerase_internals::sequence::{Capabilities, Category};
///
/// let caps = Capabilities::from_category(Category::Bidirectional);
/// assert!(caps.contains(Capabilities::FORWARD));
/// assert!(caps.contains(Capabilities::BIDIRECTIONAL));
/// assert!(!caps.contains(Capabilities::RANDOM_ACCESS));
/// assert_eq!(caps.bits(), 0b011);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// The cursor can move forward.
    pub const FORWARD: Self = Self(1);
    /// The cursor can move backward.
    pub const BIDIRECTIONAL: Self = Self(2);
    /// The cursor can jump by an offset in constant time.
    pub const RANDOM_ACCESS: Self = Self(4);

    /// Returns the capabilities implied by a [`Category`].
    #[inline]
    pub const fn from_category(category: Category) -> Self {
        match category {
            Category::Forward => Self::FORWARD,
            Category::Bidirectional => Self(Self::FORWARD.0 | Self::BIDIRECTIONAL.0),
            Category::RandomAccess => {
                Self(Self::FORWARD.0 | Self::BIDIRECTIONAL.0 | Self::RANDOM_ACCESS.0)
            }
        }
    }

    /// Returns `true` if every flag set in `other` is also set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw bits of the mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if the cursor can move backward.
    #[inline]
    pub const fn is_bidirectional(self) -> bool {
        self.contains(Self::BIDIRECTIONAL)
    }

    /// Returns `true` if the cursor can jump in constant time.
    #[inline]
    pub const fn is_random_access(self) -> bool {
        self.contains(Self::RANDOM_ACCESS)
    }

    /// Returns the most capable [`Category`] covered by this mask.
    #[inline]
    pub const fn category(self) -> Category {
        if self.is_random_access() {
            Category::RandomAccess
        } else if self.is_bidirectional() {
            Category::Bidirectional
        } else {
            Category::Forward
        }
    }
}

impl From<Category> for Capabilities {
    fn from(category: Category) -> Self {
        Self::from_category(category)
    }
}

impl core::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names = [
            (Self::FORWARD, "FORWARD"),
            (Self::BIDIRECTIONAL, "BIDIRECTIONAL"),
            (Self::RANDOM_ACCESS, "RANDOM_ACCESS"),
        ];
        let mut set = f.debug_set();
        for (flag, name) in names {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}
