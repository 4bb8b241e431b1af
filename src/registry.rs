//! The map from container types to their operation tables.
//!
//! A [`Registry`] remembers, for every container type that was wrapped
//! through it, the [`OperationTable`] needed to iterate that type once the
//! type is erased. Registration is idempotent: the first table built for a
//! type is kept, and later registrations of the same type return it.
//!
//! Most programs can use the process-wide [`Registry::global`]; libraries
//! that want isolation can own a registry of their own and pass it around.

use hashbrown::{HashMap, hash_map::Entry};
use typerase_internals::sequence::Sequence;

use crate::{
    Iterable, OperationTable, TypeTag, UnregisteredTypeError, Value, lock::RegistryLock,
};

type TableMap = HashMap<TypeTag, OperationTable, rustc_hash::FxBuildHasher>;

/// A thread-safe map from container types to their [`OperationTable`]s.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
///
/// use typerase::Registry;
///
/// let registry = Registry::new();
/// let flags: VecDeque<bool> = [true, false, true].into_iter().collect();
///
/// let value = registry.wrap(&flags);
/// let iterable = registry.iterable(value);
/// let flags: Vec<bool> = iterable
///     .iter()
///     .map(|value| value.reinterpret_as::<bool>().unwrap())
///     .collect();
/// assert_eq!(flags, [true, false, true]);
///
/// // Scalars are never registered
/// let scalar = typerase::Value::new(&1_u8);
/// assert!(registry.try_iterable(scalar).is_err());
/// ```
pub struct Registry {
    tables: RegistryLock<TableMap>,
}

static GLOBAL: Registry = Registry::new();

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: RegistryLock::new(),
        }
    }

    /// Creates an empty registry with room for `capacity` container types.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tables: RegistryLock::with_value(HashMap::with_capacity_and_hasher(
                capacity,
                rustc_hash::FxBuildHasher,
            )),
        }
    }

    /// Returns the process-wide registry.
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the operation table of `S`, building and storing it if `S` was
    /// not registered before.
    pub fn register<S: Sequence>(&self) -> OperationTable {
        let tag = TypeTag::of::<S>();
        if let Some(table) = self.lookup(tag) {
            #[cfg(feature = "tracing")]
            tracing::trace!(sequence = tag.name(), "operation table already registered");
            return table;
        }

        let mut guard = self.tables.write();
        let tables = guard
            .get()
            .get_or_insert_with(|| HashMap::with_hasher(rustc_hash::FxBuildHasher));
        match tables.entry(tag) {
            // Another thread got here between our lookup and the write lock
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let table = OperationTable::of::<S>();
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    sequence = tag.name(),
                    element = table.element_tag().name(),
                    capabilities = ?table.capabilities(),
                    "registered operation table"
                );
                entry.insert(table).clone()
            }
        }
    }

    /// Returns the operation table registered for `tag`, if any.
    pub fn lookup(&self, tag: TypeTag) -> Option<OperationTable> {
        self.tables.read().get()?.get(&tag).cloned()
    }

    /// Returns `true` if a table is registered for `tag`.
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.tables
            .read()
            .get()
            .is_some_and(|tables| tables.contains_key(&tag))
    }

    /// Returns the number of registered container types.
    pub fn len(&self) -> usize {
        self.tables.read().get().map_or(0, |tables| tables.len())
    }

    /// Returns `true` if no container type is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every registered table.
    ///
    /// Views and cursors created before keep working; they hold their own
    /// handle to the table.
    pub fn clear(&self) {
        if let Some(tables) = self.tables.write().get() {
            tables.clear();
        }
    }

    /// Registers `S` and wraps `sequence` into a [`Value`] that can later be
    /// viewed as an [`Iterable`] through this registry.
    #[inline]
    pub fn wrap<'a, S: Sequence>(&self, sequence: &'a S) -> Value<'a> {
        self.register::<S>();
        Value::new(sequence)
    }

    /// Views `value` as an [`Iterable`].
    ///
    /// # Panics
    ///
    /// Panics if the type of `value` is not registered, for instance because
    /// it wraps a scalar.
    #[track_caller]
    pub fn iterable<'a>(&self, value: Value<'a>) -> Iterable<'a> {
        match self.try_iterable(value) {
            Ok(iterable) => iterable,
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    sequence = error.tag().name(),
                    "iterable view requested for an unregistered type"
                );
                panic!("{error}")
            }
        }
    }

    /// Views `value` as an [`Iterable`], or reports that its type is not
    /// registered.
    pub fn try_iterable<'a>(&self, value: Value<'a>) -> Result<Iterable<'a>, UnregisteredTypeError> {
        let tag = value.type_tag();
        let table = self
            .lookup(tag)
            .ok_or_else(|| UnregisteredTypeError::new(tag))?;
        Ok(Iterable::new(table, value))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let guard = self.tables.read();
        let mut list = f.debug_list();
        if let Some(tables) = guard.get() {
            list.entries(tables.keys());
        }
        list.finish()
    }
}
