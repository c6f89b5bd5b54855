//! FixedMap: owned string keys mapped to borrowed values.
//!
//! The map copies every key it stores but keeps values as `&'a V`. It never
//! drops, clones or reads through those references: overwrite and remove
//! hand the previous reference back, and the caller decides what happens
//! to the referent.

use crate::error::{AllocError, InsertError};
use crate::hash::FnvBuildHasher;
use crate::raw_table::{Handle, RawTable};
use core::fmt;
use core::hash::BuildHasher;

/// A fixed-capacity map from strings to borrowed values.
///
/// ```
/// use probe_table::FixedMap;
///
/// let (a, b) = (189, 2034);
/// let mut map = FixedMap::with_capacity(5);
/// assert_eq!(map.insert("key", &a), Ok(None));
/// assert_eq!(map.insert("key", &b), Ok(Some(&a)));
/// assert_eq!(map.get("key"), Some(&b));
/// assert_eq!(map.remove("key"), Some(&b));
/// assert_eq!(map.get("key"), None);
/// ```
pub struct FixedMap<'a, V: ?Sized, S = FnvBuildHasher> {
    table: RawTable<&'a V, S>,
}

impl<'a, V: ?Sized> FixedMap<'a, V> {
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RawTable::with_capacity(capacity),
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            table: RawTable::try_with_capacity(capacity)?,
        })
    }
}

impl<'a, V, S> FixedMap<'a, V, S>
where
    V: ?Sized,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: RawTable::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, AllocError> {
        Ok(Self {
            table: RawTable::try_with_capacity_and_hasher(capacity, hasher)?,
        })
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of entries. O(capacity).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Associates `value` with `key`, returning the reference it replaced.
    pub fn insert(&mut self, key: &str, value: &'a V) -> Result<Option<&'a V>, InsertError> {
        self.table.upsert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&'a V> {
        self.table.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn find(&self, key: &str) -> Option<Handle> {
        self.table.find(key)
    }

    /// Entry in the slot `h` points at, if it is still occupied.
    pub fn entry_at(&self, h: Handle) -> Option<(&str, &'a V)> {
        self.table.entry_at(h).map(|(k, v)| (k, *v))
    }

    /// Removes `key` and returns its value reference. The map's copy of the
    /// key is released; the value is untouched.
    pub fn remove(&mut self, key: &str) -> Option<&'a V> {
        self.table.remove(key)
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a V)> + '_ {
        self.table.iter().map(|(_, k, v)| (k, *v))
    }
}

impl<V, S> fmt::Debug for FixedMap<'_, V, S>
where
    V: ?Sized + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.table, f)
    }
}
