//! Recoverable error types.
//!
//! Misuse (a zero capacity) is not represented here; it panics.

use thiserror::Error;

/// Returned by insert when no slot along the key's probe cycle can take it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("table is full: all {capacity} slots hold other keys")]
    Full { capacity: usize },
}

/// Returned by `try_with_capacity` when the slot array cannot be allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate a table of {capacity} slots")]
pub struct AllocError {
    pub capacity: usize,
}
