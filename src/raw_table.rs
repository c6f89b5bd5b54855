//! RawTable: the fixed-capacity open-addressing core shared by
//! [`FixedSet`](crate::FixedSet) and [`FixedMap`](crate::FixedMap).
//!
//! Every operation hashes the key to its home slot and walks a
//! [`ProbeSeq`] from there:
//! - lookup stops at the first `Empty` slot, skips tombstones, and returns
//!   the slot holding an equal key;
//! - upsert updates the live copy of the key when lookup finds one,
//!   otherwise claims the first `Empty` or `Tombstone` slot of the cycle
//!   (the home slot itself when it is free) or fails with `Full`;
//! - remove turns the slot into a tombstone, never back into `Empty`.
//!
//! Keys are owned copies (`Box<str>`) released when their slot is buried
//! or the table is dropped. Payloads are whatever `P` is: the set stores
//! `()`, the map stores borrowed `&V`, which the table hands back on
//! overwrite and remove but never drops the referent of.

use crate::error::{AllocError, InsertError};
use crate::hash::{home_index, FnvBuildHasher};
use crate::probe::ProbeSeq;
use crate::reentrancy::DebugReentrancy;
use crate::slot::Slot;
use core::fmt;
use core::hash::BuildHasher;

/// Position of an occupied slot, as returned by `find`.
///
/// A handle stays meaningful until its key is removed. After that the slot
/// may be reused by another key, so resolving an old handle can yield a
/// different entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(usize);

impl Handle {
    pub(crate) fn new(index: usize) -> Self {
        Handle(index)
    }

    /// Slot index in `0..capacity`.
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct RawTable<P, S = FnvBuildHasher> {
    hasher: S,
    slots: Box<[Slot<P>]>, // never resized
    reentrancy: DebugReentrancy,
}

impl<P> RawTable<P> {
    /// Allocates `capacity` empty slots. Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FnvBuildHasher)
    }

    /// Like [`with_capacity`](Self::with_capacity), but reports allocation
    /// failure instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::try_with_capacity_and_hasher(capacity, FnvBuildHasher)
    }
}

impl<P, S> RawTable<P, S>
where
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        assert!(capacity > 0, "capacity cannot be zero");
        Self {
            hasher,
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, AllocError> {
        assert!(capacity > 0, "capacity cannot be zero");
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| AllocError { capacity })?;
        slots.resize_with(capacity, || Slot::Empty);
        Ok(Self {
            hasher,
            slots: slots.into_boxed_slice(),
            reentrancy: DebugReentrancy::new(),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots. Scans the whole array.
    pub fn len(&self) -> usize {
        let _g = self.reentrancy.enter();
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn is_empty(&self) -> bool {
        let _g = self.reentrancy.enter();
        !self.slots.iter().any(Slot::is_occupied)
    }

    #[inline]
    fn home(&self, key: &str) -> usize {
        home_index(&self.hasher, key, self.slots.len())
    }

    fn find_index(&self, home: usize, key: &str) -> Option<usize> {
        for i in ProbeSeq::new(home, self.slots.len()) {
            match &self.slots[i] {
                // Nothing was ever placed past here on this chain.
                Slot::Empty => return None,
                Slot::Tombstone => continue,
                Slot::Occupied { key: k, .. } if **k == *key => return Some(i),
                Slot::Occupied { .. } => {}
            }
        }
        None
    }

    pub fn find(&self, key: &str) -> Option<Handle> {
        let _g = self.reentrancy.enter();
        let home = self.home(key);
        self.find_index(home, key).map(Handle::new)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&P> {
        let _g = self.reentrancy.enter();
        let home = self.home(key);
        let i = self.find_index(home, key)?;
        self.slots[i].entry().map(|(_, p)| p)
    }

    /// Key and payload of the slot `h` points at, if it is still occupied.
    pub fn entry_at(&self, h: Handle) -> Option<(&str, &P)> {
        let _g = self.reentrancy.enter();
        self.slots.get(h.index()).and_then(Slot::entry)
    }

    /// Inserts `key` or replaces the payload of its live slot.
    ///
    /// Returns the replaced payload, `None` for a fresh key, or
    /// `InsertError::Full` when the probe cycle holds only other keys; in
    /// that case nothing is written.
    pub fn upsert(&mut self, key: &str, payload: P) -> Result<Option<P>, InsertError> {
        let _g = self.reentrancy.enter();
        let home = self.home(key);

        if let Some(Slot::Occupied { payload: old, .. }) =
            self.find_index(home, key).map(|i| &mut self.slots[i])
        {
            return Ok(Some(core::mem::replace(old, payload)));
        }

        let target = ProbeSeq::new(home, self.slots.len())
            .find(|&i| self.slots[i].is_vacant())
            .ok_or(InsertError::Full {
                capacity: self.slots.len(),
            })?;
        self.slots[target] = Slot::Occupied {
            key: key.into(),
            payload,
        };
        Ok(None)
    }

    /// Buries the slot holding `key` and returns its payload. The owned key
    /// copy is released here.
    pub fn remove(&mut self, key: &str) -> Option<P> {
        let _g = self.reentrancy.enter();
        let home = self.home(key);
        let i = self.find_index(home, key)?;
        self.slots[i].bury().map(|(_key, payload)| payload)
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            it: self.slots.iter().enumerate(),
        }
    }
}

impl<P: fmt::Debug, S> fmt::Debug for RawTable<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().filter_map(Slot::entry))
            .finish()
    }
}

/// Iterator over occupied slots of a `RawTable`.
pub struct Iter<'a, P> {
    it: core::iter::Enumerate<core::slice::Iter<'a, Slot<P>>>,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = (Handle, &'a str, &'a P);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for (i, s) in self.it.by_ref() {
            if let Some((k, p)) = s.entry() {
                return Some((Handle::new(i), k, p));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hasher;

    #[derive(Clone, Copy, Default)]
    struct ConstBuildHasher;
    struct ConstHasher;
    impl BuildHasher for ConstBuildHasher {
        type Hasher = ConstHasher;
        fn build_hasher(&self) -> ConstHasher {
            ConstHasher
        }
    }
    impl Hasher for ConstHasher {
        fn write(&mut self, _bytes: &[u8]) {}
        fn finish(&self) -> u64 {
            0
        } // every key homes to slot 0
    }

    /// Invariant: a fresh key with a free home slot lands exactly there.
    #[test]
    fn fresh_key_lands_in_home_slot() {
        let mut t: RawTable<i32> = RawTable::with_capacity(5);
        t.upsert("key", 1).unwrap();
        // fnv1a("key") % 5 == 3
        assert_eq!(t.find("key").map(Handle::index), Some(3));
    }

    /// Invariant: colliding keys occupy consecutive slots from the shared home.
    #[test]
    fn collisions_probe_linearly() {
        let mut t: RawTable<i32, _> = RawTable::with_capacity_and_hasher(4, ConstBuildHasher);
        for (i, k) in ["a", "b", "c"].iter().enumerate() {
            assert_eq!(t.upsert(k, i as i32), Ok(None));
        }
        assert_eq!(t.find("a").map(Handle::index), Some(0));
        assert_eq!(t.find("b").map(Handle::index), Some(1));
        assert_eq!(t.find("c").map(Handle::index), Some(2));
        assert_eq!(t.get("b"), Some(&1));
    }

    /// Invariant: the probe walk wraps from the last slot back to slot 0.
    #[test]
    fn probe_wraps_past_the_end() {
        // "liquid" and "costarring" both home to slot 1 of 2.
        let mut t: RawTable<i32> = RawTable::with_capacity(2);
        t.upsert("liquid", 1).unwrap();
        t.upsert("costarring", 2).unwrap();
        assert_eq!(t.find("liquid").map(Handle::index), Some(1));
        assert_eq!(t.find("costarring").map(Handle::index), Some(0));
    }

    /// Invariant: lookup skips tombstones and stops at the first empty slot.
    #[test]
    fn lookup_skips_tombstones_stops_at_empty() {
        let mut t: RawTable<i32, _> = RawTable::with_capacity_and_hasher(4, ConstBuildHasher);
        t.upsert("a", 1).unwrap();
        t.upsert("b", 2).unwrap();
        assert_eq!(t.remove("a"), Some(1));
        assert_eq!(t.get("b"), Some(&2));
        assert_eq!(t.get("zzz"), None);
    }

    /// Invariant: a fresh key reuses the first tombstone on its chain.
    #[test]
    fn fresh_key_reuses_first_tombstone() {
        let mut t: RawTable<i32, _> = RawTable::with_capacity_and_hasher(4, ConstBuildHasher);
        t.upsert("a", 1).unwrap();
        t.upsert("b", 2).unwrap();
        t.remove("a").unwrap();
        t.upsert("c", 3).unwrap();
        assert_eq!(t.find("c").map(Handle::index), Some(0));
        assert_eq!(t.len(), 2);
    }

    /// Invariant: updating a key whose chain starts with a tombstone updates
    /// the live slot rather than writing a second copy.
    #[test]
    fn update_past_tombstone_keeps_key_unique() {
        let mut t: RawTable<i32, _> = RawTable::with_capacity_and_hasher(3, ConstBuildHasher);
        t.upsert("a", 1).unwrap();
        t.upsert("b", 2).unwrap();
        t.remove("a").unwrap();
        assert_eq!(t.upsert("b", 20), Ok(Some(2)));
        assert_eq!(t.find("b").map(Handle::index), Some(1));
        assert_eq!(t.len(), 1);
        assert_eq!(t.remove("b"), Some(20));
        assert_eq!(t.get("b"), None);
    }

    /// Invariant: `Full` leaves every slot untouched; updates still succeed.
    #[test]
    fn full_rejects_new_keys_but_allows_updates() {
        let mut t: RawTable<i32> = RawTable::with_capacity(2);
        t.upsert("x", 1).unwrap();
        t.upsert("y", 2).unwrap();
        assert_eq!(t.upsert("z", 3), Err(InsertError::Full { capacity: 2 }));
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("z"), None);
        assert_eq!(t.upsert("y", 22), Ok(Some(2)));
        assert_eq!(t.get("y"), Some(&22));
    }

    /// Invariant: a full table of tombstones keeps lookups bounded and
    /// reports absence.
    #[test]
    fn all_tombstones_lookup_terminates() {
        let mut t: RawTable<i32, _> = RawTable::with_capacity_and_hasher(3, ConstBuildHasher);
        for k in ["a", "b", "c"] {
            t.upsert(k, 0).unwrap();
        }
        for k in ["a", "b", "c"] {
            t.remove(k).unwrap();
        }
        assert!(t.is_empty());
        assert_eq!(t.find("a"), None);
        assert_eq!(t.remove("a"), None);
        assert_eq!(t.upsert("d", 4), Ok(None));
    }

    /// Invariant: a full cycle completes for capacities wider than 8 bits.
    #[test]
    fn wide_capacity_fills_completely() {
        let cap = 300;
        let mut t: RawTable<usize, _> = RawTable::with_capacity_and_hasher(cap, ConstBuildHasher);
        for i in 0..cap {
            assert_eq!(t.upsert(&format!("k{i}"), i), Ok(None), "insert {i}");
        }
        assert_eq!(t.len(), cap);
        assert_eq!(
            t.upsert("overflow", 0),
            Err(InsertError::Full { capacity: cap })
        );
        assert_eq!(t.get("k299"), Some(&299));
    }

    #[test]
    fn entry_at_and_iter() {
        let mut t: RawTable<i32, _> = RawTable::with_capacity_and_hasher(4, ConstBuildHasher);
        t.upsert("a", 1).unwrap();
        t.upsert("b", 2).unwrap();
        let h = t.find("b").unwrap();
        assert_eq!(t.entry_at(h), Some(("b", &2)));
        t.remove("b").unwrap();
        assert_eq!(t.entry_at(h), None);
        assert_eq!(t.entry_at(Handle::new(99)), None);

        let seen: Vec<(usize, &str, i32)> =
            t.iter().map(|(h, k, v)| (h.index(), k, *v)).collect();
        assert_eq!(seen, vec![(0, "a", 1)]);
    }

    #[test]
    fn try_with_capacity_allocates() {
        let t: RawTable<()> = RawTable::try_with_capacity(16).expect("allocation");
        assert_eq!(t.capacity(), 16);
        assert!(t.is_empty());
    }

    #[test]
    fn try_with_capacity_reports_overflow() {
        // Slot size times usize::MAX cannot be represented.
        let r: Result<RawTable<u64>, _> = RawTable::try_with_capacity(usize::MAX);
        assert_eq!(
            r.err(),
            Some(AllocError {
                capacity: usize::MAX
            })
        );
    }

    #[test]
    #[should_panic(expected = "capacity cannot be zero")]
    fn zero_capacity_panics() {
        let _t: RawTable<()> = RawTable::with_capacity(0);
    }

    #[test]
    fn debug_lists_live_entries() {
        let mut t: RawTable<i32> = RawTable::with_capacity(1);
        t.upsert("only", 1).unwrap();
        assert_eq!(format!("{t:?}"), r#"{"only": 1}"#);
    }

    /// Invariant (debug-only): a hasher that reaches back into its own table
    /// while a probe is in flight trips the reentrancy guard, and the table
    /// is usable again once that call has unwound.
    #[cfg(debug_assertions)]
    #[test]
    fn reentrant_hasher_panics() {
        use std::cell::Cell;

        thread_local! {
            static TABLE: Cell<*const RawTable<i32, ReenterBuildHasher>> =
                const { Cell::new(core::ptr::null()) };
        }

        #[derive(Clone, Copy)]
        struct ReenterBuildHasher;
        struct ReenterHasher;
        impl BuildHasher for ReenterBuildHasher {
            type Hasher = ReenterHasher;
            fn build_hasher(&self) -> ReenterHasher {
                ReenterHasher
            }
        }
        impl Hasher for ReenterHasher {
            fn write(&mut self, _bytes: &[u8]) {
                let p = TABLE.with(Cell::get);
                if !p.is_null() {
                    // Attempt to re-enter the same table mid-operation.
                    let t = unsafe { &*p };
                    let _ = t.capacity();
                    let _ = t.len();
                }
            }
            fn finish(&self) -> u64 {
                0
            }
        }

        let t: RawTable<i32, ReenterBuildHasher> =
            RawTable::with_capacity_and_hasher(2, ReenterBuildHasher);
        TABLE.with(|c| c.set(&t as *const _));
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = t.find("k");
        }));
        TABLE.with(|c| c.set(core::ptr::null()));
        assert!(res.is_err(), "expected reentrancy to panic in debug builds");

        // The aborted call released the table; ordinary use continues.
        assert_eq!(t.find("k"), None);
        assert!(t.is_empty());
    }
}
