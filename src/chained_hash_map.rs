//! ChainedHashMap: separate-chaining buckets with power-of-two growth.

use crate::bucket::{Bucket, Entry};
use crate::config::MapConfig;
use crate::error::{require_key, InvalidArgument};
use crate::reentrancy::ScanTracker;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::slice;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace, warn};
use std::vec;

/// A mutable key/value map over a power-of-two array of buckets.
///
/// Each bucket is a chain of entries whose hashes share the low bits used
/// as the bucket index. Inserting a new key may double the bucket array once
/// `len / capacity` reaches the configured load factor; every entry is then
/// re-placed from its stored hash.
#[derive(Clone)]
pub struct ChainedHashMap<K, V> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    load_factor: f64,
    hasher: DefaultHashBuilder,
    scans: ScanTracker,
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Bucket::default);
    buckets
}

impl<K, V> ChainedHashMap<K, V> {
    // `config` must already be validated.
    fn from_config(config: MapConfig) -> Self {
        trace!(
            "ChainedHashMap created: {} buckets, load factor {}",
            config.initial_capacity,
            config.load_factor
        );
        Self {
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            load_factor: config.load_factor,
            hasher: DefaultHashBuilder::default(),
            scans: ScanTracker::new(),
        }
    }

    pub fn new() -> Self {
        Self::from_config(MapConfig::default())
    }

    /// Build a map with `config`, rounding its capacity up to a power of two.
    pub fn with_config(config: MapConfig) -> Result<Self, InvalidArgument> {
        Ok(Self::from_config(config.validate()?))
    }

    /// Build a map with at least `buckets` buckets and the default load factor.
    ///
    /// The argument is a bucket count, not an entry count: the map doubles
    /// once `len` reaches `buckets * DEFAULT_LOAD_FACTOR` (after rounding).
    pub fn with_buckets(buckets: usize) -> Result<Self, InvalidArgument> {
        Self::with_config(MapConfig::new().initial_capacity(buckets))
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Drop every entry. The bucket array keeps its current size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: Default::default(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            current: Default::default(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Slot for `hash`: its low bits, i.e. `hash mod capacity`.
    ///
    /// The hash is unsigned, so there is no negative value to take the
    /// absolute value of.
    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        let capacity = self.buckets.len();
        debug_assert!(capacity.is_power_of_two());
        (hash as usize) & (capacity - 1)
    }

    /// Append an entry whose key is known to be absent.
    fn place(&mut self, entry: Entry<K, V>) {
        let idx = self.bucket_index(entry.hash);
        self.buckets[idx].push(entry);
        self.len += 1;
    }

    fn over_threshold(&self) -> bool {
        self.len as f64 / self.buckets.len() as f64 >= self.load_factor
    }

    /// Double the bucket array and re-place every entry in bucket order.
    fn resize(&mut self) {
        let old_capacity = self.buckets.len();
        let Some(new_capacity) = old_capacity.checked_mul(2) else {
            warn!(
                "ChainedHashMap cannot grow past {} buckets; load factor exceeded",
                old_capacity
            );
            return;
        };

        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let expected = mem::replace(&mut self.len, 0);
        for bucket in old {
            for entry in bucket.into_entries() {
                self.place(entry);
            }
        }
        debug_assert_eq!(self.len, expected);
        debug!(
            "ChainedHashMap resized: {} -> {} buckets, {} entries",
            old_capacity, new_capacity, self.len
        );
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Insert `value` under `key`, returning the value it replaced.
    ///
    /// Replacing an existing key's value never resizes. Adding a new key
    /// doubles the bucket array once `len / capacity` reaches the load factor.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = {
            let _scan = self.scans.begin("insert");
            let hash = self.make_hash(&key);
            let idx = self.bucket_index(hash);
            if let Some(entry) = self.buckets[idx].find_mut(hash, &key) {
                return Some(mem::replace(&mut entry.value, value));
            }
            hash
        };

        self.place(Entry { key, value, hash });
        // A validated config has `capacity * load_factor >= 1`, so one
        // doubling always brings the ratio back under the threshold.
        if self.over_threshold() {
            self.resize();
        }
        None
    }

    /// `insert` for callers whose key may be absent.
    ///
    /// An absent key fails with `InvalidArgument::AbsentKey` and leaves the
    /// map unchanged.
    pub fn try_insert(&mut self, key: Option<K>, value: V) -> Result<Option<V>, InvalidArgument> {
        let key = require_key(key)?;
        Ok(self.insert(key, value))
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _scan = self.scans.begin("get");
        let hash = self.make_hash(q);
        self.buckets[self.bucket_index(hash)]
            .find(hash, q)
            .map(|e| &e.value)
    }

    pub fn try_get<Q>(&self, q: Option<&Q>) -> Result<Option<&V>, InvalidArgument>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let q = require_key(q)?;
        Ok(self.get(q))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _scan = self.scans.begin("get_mut");
        let hash = self.make_hash(q);
        let idx = self.bucket_index(hash);
        self.buckets[idx].find_mut(hash, q).map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }

    /// Remove `q`'s entry and return its value. A missing key is not an
    /// error and leaves `len` untouched.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _scan = self.scans.begin("remove");
        let hash = self.make_hash(q);
        let idx = self.bucket_index(hash);
        let entry = self.buckets[idx].remove(hash, q)?;
        self.len -= 1;
        Some(entry.value)
    }

    pub fn try_remove<Q>(&mut self, q: Option<&Q>) -> Result<Option<V>, InvalidArgument>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let q = require_key(q)?;
        Ok(self.remove(q))
    }

    /// Panics unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity.is_power_of_two(), "capacity {capacity} not a power of two");

        let mut total = 0;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            total += bucket.len();
            for entry in bucket.iter() {
                assert_eq!(entry.hash, self.make_hash(&entry.key), "stale stored hash");
                assert_eq!(self.bucket_index(entry.hash), idx, "entry in wrong bucket");
                let same = bucket.iter().filter(|e| e.key == entry.key).count();
                assert_eq!(same, 1, "duplicate key in bucket {idx}");
            }
        }
        assert_eq!(total, self.len, "len out of sync with buckets");
        assert!(
            (self.len as f64 / capacity as f64) < self.load_factor,
            "load factor {} reached with {} entries in {} buckets",
            self.load_factor,
            self.len,
            capacity
        );
    }
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ChainedHashMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for ChainedHashMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V> Eq for ChainedHashMap<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Bucket<K, V>>,
    current: slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` in bucket order.
pub struct IterMut<'a, K, V> {
    buckets: slice::IterMut<'a, Bucket<K, V>>,
    current: slice::IterMut<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
            self.current = self.buckets.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator; consumes the map.
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Bucket<K, V>>,
    current: vec::IntoIter<Entry<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some((e.key, e.value));
            }
            self.current = self.buckets.next()?.into_entries();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a ChainedHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut ChainedHashMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for ChainedHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len,
            buckets: self.buckets.into_iter(),
            current: Default::default(),
        }
    }
}
