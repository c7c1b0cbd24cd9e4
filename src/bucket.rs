//! Bucket: one chain of entries sharing a bucket index.

use core::borrow::Borrow;
use core::slice;

/// Stored key/value pair. `hash` is computed once on insertion so re-placing
/// the entry during a resize never calls back into `K: Hash`.
#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

impl<K, V> Entry<K, V> {
    #[inline]
    fn matches<Q>(&self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.hash == hash && self.key.borrow() == q
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Bucket<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> Bucket<K, V> {
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn find<Q>(&self, hash: u64, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries.iter().find(|e| e.matches(hash, q))
    }

    pub(crate) fn find_mut<Q>(&mut self, hash: u64, q: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries.iter_mut().find(|e| e.matches(hash, q))
    }

    /// Append without checking for an existing key; callers must have
    /// searched first.
    pub(crate) fn push(&mut self, entry: Entry<K, V>) {
        self.entries.push(entry);
    }

    /// Remove the entry for `q`, keeping the order of the rest.
    pub(crate) fn remove<Q>(&mut self, hash: u64, q: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let pos = self.entries.iter().position(|e| e.matches(hash, q))?;
        Some(self.entries.remove(pos))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, Entry<K, V>> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> slice::IterMut<'_, Entry<K, V>> {
        self.entries.iter_mut()
    }

    pub(crate) fn into_entries(self) -> std::vec::IntoIter<Entry<K, V>> {
        self.entries.into_iter()
    }
}
