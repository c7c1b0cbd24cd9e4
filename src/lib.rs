//! chained-hashmap: a single-threaded key/value map built on
//! separate-chaining buckets with power-of-two growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable associative container whose insert, lookup,
//!   removal and resize logic can each be checked in isolation.
//! - Layers:
//!   - Bucket<K, V>: one chain of `Entry { key, value, hash }` in insertion
//!     order; knows how to find, append and remove, nothing about sizing.
//!   - ChainedHashMap<K, V>: owns the bucket array, the live-entry count and
//!     the load factor; maps hashes to buckets and decides when to grow.
//!   - MapConfig: construction-time initial capacity and load factor,
//!     validated into a power-of-two bucket count and a load factor in [0.5, 1].
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no locks, no atomics).
//! - Bucket count is always a power of two; the index is `hash & (cap - 1)`.
//! - At most one entry per key; re-inserting a key overwrites its value.
//! - After an insertion returns, `len / capacity < load_factor`.
//!
//! Growth
//! - Adding a new key that brings `len / capacity` to the load factor
//!   doubles the bucket array. Every entry is moved to the new array in
//!   bucket order through the same placement step insertion uses.
//! - Overwriting the value of an existing key is not a growth event.
//! - Capacity never shrinks; `clear` keeps the bucket array.
//!
//! Hashing
//! - Each entry stores the `u64` hash computed when it was inserted.
//!   Resizing re-places entries from the stored hash, so `K: Hash` is never
//!   invoked after insertion, and no user code runs while the bucket array
//!   is being rebuilt.
//! - Comparisons check the stored hash before calling `K: Eq`.
//! - The hash builder is fixed (hashbrown's default); callers cannot inject
//!   their own.
//!
//! Absent keys
//! - The typed API (`insert`, `get`, `remove`) cannot be handed an absent
//!   key. Callers holding an `Option` key use `try_insert`, `try_get`,
//!   `try_remove`, which all reject `None` with `InvalidArgument::AbsentKey`
//!   before touching the map.
//!
//! Reentrancy
//! - Public keyed operations register with a debug-only scan tracker while
//!   `K: Hash`/`K: Eq` run. A key that reaches back into the same map from
//!   those impls panics in debug builds.
//!
//! Logging
//! - Uses the `log` facade: `trace` on construction, `debug` on every
//!   resize, `warn` if the bucket array cannot double.

mod bucket;
mod chained_hash_map;
mod chained_hash_map_proptest;
mod config;
mod error;
mod reentrancy;

// Public surface
pub use chained_hash_map::{ChainedHashMap, IntoIter, Iter, IterMut, Keys, Values};
pub use config::{
    MapConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, MIN_INITIAL_CAPACITY, MIN_LOAD_FACTOR,
};
pub use error::InvalidArgument;
