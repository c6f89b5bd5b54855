//! FNV-1a hashing and home-slot reduction.
//!
//! The hash is fixed: 64-bit FNV-1a over the raw key bytes with wrapping
//! multiplication, reduced modulo the table capacity. Keys are fed to the
//! hasher with a single `write` of their bytes (no `Hash` impl framing), so
//! a table built with [`FnvBuildHasher`] places keys exactly where
//! [`fnv1a`] says they go.

use core::hash::{BuildHasher, Hasher};

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// FNV-1a over `bytes`.
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut h = FnvHasher::new();
    h.write(bytes);
    h.finish()
}

/// Home slot of `key` in a table of `capacity` slots.
///
/// Panics if `capacity` is zero.
#[inline]
pub fn home_index<S: BuildHasher>(hasher: &S, key: &str, capacity: usize) -> usize {
    assert!(capacity > 0, "capacity cannot be zero");
    let mut h = hasher.build_hasher();
    h.write(key.as_bytes());
    (h.finish() % capacity as u64) as usize
}

/// Streaming FNV-1a state.
#[derive(Debug, Copy, Clone)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    /// Creates a hasher seeded with the FNV offset basis.
    pub const fn new() -> Self {
        Self {
            hash: FNV_OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash ^= byte as u64;
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Builder for [`FnvHasher`]; the default hasher of every table in this crate.
#[derive(Debug, Copy, Clone, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> FnvHasher {
        FnvHasher::new()
    }
}
