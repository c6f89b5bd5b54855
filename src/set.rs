//! FixedSet: owned string keys, no payload.

use crate::error::{AllocError, InsertError};
use crate::hash::FnvBuildHasher;
use crate::raw_table::{Handle, RawTable};
use core::fmt;
use core::hash::BuildHasher;

/// A fixed-capacity set of strings.
///
/// Each stored key is a private copy; nothing the caller passes in is kept
/// by reference. Capacity is set at construction and never changes.
///
/// ```
/// use probe_table::{FixedSet, InsertError};
///
/// let mut set = FixedSet::with_capacity(1);
/// assert_eq!(set.insert("a"), Ok(true));
/// assert_eq!(set.insert("a"), Ok(false));
/// assert_eq!(set.insert("b"), Err(InsertError::Full { capacity: 1 }));
/// assert!(set.remove("a"));
/// assert_eq!(set.insert("b"), Ok(true));
/// ```
pub struct FixedSet<S = FnvBuildHasher> {
    table: RawTable<(), S>,
}

impl FixedSet {
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

impl<S> FixedSet<S>
where
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

    /// Number of keys present. O(capacity).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Adds `key`. `Ok(true)` when it was not present, `Ok(false)` when it
    /// already was; both count as success.
    pub fn insert(&mut self, key: &str) -> Result<bool, InsertError> {
        self.table.upsert(key, ()).map(|prev| prev.is_none())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn find(&self, key: &str) -> Option<Handle> {
        self.table.find(key)
    }

    /// Key stored in the slot `h` points at, if it is still occupied.
    pub fn key_at(&self, h: Handle) -> Option<&str> {
        self.table.entry_at(h).map(|(k, _)| k)
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.table.remove(key).is_some()
    }

    /// Keys in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.iter().map(|(_, k, _)| k)
    }
}

impl<S: BuildHasher> fmt::Debug for FixedSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.table.iter().map(|(_, k, _)| k))
            .finish()
    }
}
