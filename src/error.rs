//! Error type shared by the checked map operations and configuration.

use thiserror::Error;

/// Rejected input. Every variant is deterministic for a given argument and
/// leaves the map untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// A checked operation was handed no key.
    #[error("key cannot be absent")]
    AbsentKey,
    /// The requested initial capacity is zero or has no power-of-two bucket
    /// count that fits in `usize`.
    #[error("initial capacity {0} cannot be used as a bucket count")]
    Capacity(usize),
    /// The load factor is not a number within `[0.5, 1]`.
    #[error("load factor must be within [0.5, 1], got {0}")]
    LoadFactor(f64),
}

/// Unwrap a possibly absent key, the one precondition shared by `try_insert`,
/// `try_get` and `try_remove`.
#[inline]
pub(crate) fn require_key<T>(key: Option<T>) -> Result<T, InvalidArgument> {
    key.ok_or(InvalidArgument::AbsentKey)
}
