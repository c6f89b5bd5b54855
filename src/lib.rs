//! probe-table: fixed-capacity, open-addressing hash tables keyed by
//! strings, with linear probing and tombstone deletion.
//!
//! Internal Design:
//!
//! Summary
//! - One structural core, `RawTable<P, S>`, parameterized over the per-slot
//!   payload `P` and the hasher `S`. Two public faces sit on top:
//!   - `FixedSet<S>`: `RawTable<(), S>`. Keys only.
//!   - `FixedMap<'a, V, S>`: `RawTable<&'a V, S>`. Keys map to borrowed values.
//! - Each slot is a three-state enum: `Empty`, `Occupied { key, payload }`,
//!   or `Tombstone`.
//!
//! Constraints
//! - Capacity is fixed at construction and must be non-zero. There is no
//!   growth and no rehashing; when every slot on a key's probe cycle holds
//!   another key, insert returns `InsertError::Full`.
//! - Keys are hashed with 64-bit FNV-1a over their raw bytes, reduced modulo
//!   capacity. The result is reproducible across platforms and runs.
//! - Single-threaded: tables are `Send` but `!Sync`. Callers sharing a table
//!   across threads wrap it in a lock.
//! - Every operation is bounded by one probe cycle, O(capacity).
//!
//! Ownership
//! - The table owns a private copy of every stored key and frees it when the
//!   key is removed or the table is dropped.
//! - Map values are borrowed: the map returns the previous reference on
//!   overwrite and on remove and never drops what it points at. The borrow
//!   checker enforces that every value outlives the map.
//!
//! Failure tiers
//! - Recoverable: `InsertError::Full`, and absence (`None`) from lookup and
//!   remove. `AllocError` when `try_with_capacity` cannot allocate.
//! - Fatal: a zero capacity panics. It is a caller bug, not a runtime
//!   condition, and never appears in a `Result`.
//!
//! Probing
//! - Lookup walks from the home slot, skips tombstones and stops at the
//!   first `Empty` slot or at the key.
//! - Insert updates the key's live slot when lookup finds it. Otherwise it
//!   takes the first `Empty` or `Tombstone` slot from home onwards, so a
//!   fresh key whose home slot is free always lands in its home slot.
//! - Remove leaves a tombstone, which keeps later keys on the same chain
//!   reachable.
//!
//! Reentrancy
//! - The only user code a table runs is its `BuildHasher`. A debug-only
//!   guard panics if that hasher re-enters the same table mid-operation.

pub mod error;
pub mod hash;
mod map;
#[cfg(feature = "bench_internal")]
pub mod probe;
#[cfg(not(feature = "bench_internal"))]
mod probe;
#[cfg(feature = "bench_internal")]
pub mod raw_table;
#[cfg(not(feature = "bench_internal"))]
mod raw_table;
mod raw_table_proptest;
mod reentrancy;
mod set;
mod slot;

// Public surface
pub use error::{AllocError, InsertError};
pub use hash::{FnvBuildHasher, FnvHasher};
pub use map::FixedMap;
pub use raw_table::Handle;
pub use set::FixedSet;
