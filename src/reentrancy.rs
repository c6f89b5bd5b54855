//! Debug-only guard against a table being entered while it is busy.
//!
//! The only user code a table runs is its `BuildHasher`, and it runs that
//! code in the middle of an operation: after the caller's `&mut self` borrow
//! has started, before the probe walk has read or written any slot. A
//! hasher that reaches back into the same table (through a raw pointer, a
//! thread-local, or any other escape hatch) would observe the slot array
//! halfway through an upsert or remove. Safe code cannot build that
//! situation; `unsafe` code can, and this guard turns it into a panic in
//! debug builds instead of silent corruption. Release builds carry no state.

use core::cell::Cell;
use core::marker::PhantomData;

/// Busy flag embedded in every table. Each table method starts with
/// `let _g = self.reentrancy.enter();` and holds the guard until it returns.
///
/// The `Cell` marker keeps tables `!Sync` in every build profile while
/// leaving them `Send`, so sharing goes through a lock around the table.
#[derive(Debug, Default)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    _not_sync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _not_sync: PhantomData,
        }
    }

    /// Marks the table busy until the returned guard drops. Debug builds
    /// panic when the table is already busy.
    #[inline]
    pub(crate) fn enter(&self) -> Entered<'_> {
        #[cfg(debug_assertions)]
        assert!(
            !self.busy.replace(true),
            "reentrancy detected: nested entry into table"
        );
        Entered { flag: self }
    }

    #[cfg(all(test, debug_assertions))]
    fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Clears the busy flag on drop, including during unwinding, so a table
/// whose hasher panicked stays usable.
pub(crate) struct Entered<'a> {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    flag: &'a DebugReentrancy,
}

impl Drop for Entered<'_> {
    #[inline]
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.flag.busy.set(false);
    }
}
