//! HashMap: public map API over `RawTable`.
//!
//! Owns the key comparer and turns its hashes into the 31-bit values the
//! table stores. Every method that may call the comparer holds the busy flag
//! so a comparer re-entering the map panics in debug builds.

use crate::comparer::{DefaultComparer, KeyComparer};
use crate::error::Result;
use crate::raw_table::{mask_hash, RawTable};
use crate::reentrancy::BusyFlag;
use core::fmt;
use core::hash::Hash;
use core::mem;
use core::ops::Index;

pub use crate::raw_table::{Iter, IterMut};

/// Separately chained hash map with prime-sized tables and slot recycling.
pub struct HashMap<K, V, C = DefaultComparer> {
    comparer: C,
    table: RawTable<K, V>,
    busy: BusyFlag,
}

impl<K, V> HashMap<K, V>
where
    K: Eq + Hash,
{
    /// An empty map; the table is allocated on the first insert.
    pub fn new() -> Self {
        Self::with_comparer(DefaultComparer::new())
    }

    /// # Panics
    ///
    /// If `capacity` is at or above `MAX_PRIME_ARRAY_LENGTH`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, DefaultComparer::new())
    }
}

impl<K, V> Default for HashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> HashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            comparer,
            table: RawTable::new(),
            busy: BusyFlag::new(),
        }
    }

    /// # Panics
    ///
    /// If `capacity` is at or above `MAX_PRIME_ARRAY_LENGTH`.
    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Self {
        match Self::try_with_capacity_and_comparer(capacity, comparer) {
            Ok(map) => map,
            Err(e) => panic!("{e}"),
        }
    }

    /// Allocates a table of the smallest prime above `capacity` up front;
    /// a zero capacity defers allocation to the first insert.
    pub fn try_with_capacity_and_comparer(capacity: usize, comparer: C) -> Result<Self> {
        Ok(Self {
            comparer,
            table: RawTable::with_capacity(capacity)?,
            busy: BusyFlag::new(),
        })
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current table size: the number of buckets, which is also the number
    /// of entries the map holds before it grows. Zero while unallocated.
    pub fn capacity(&self) -> usize {
        self.table.table_size()
    }

    #[inline]
    fn make_hash(&self, key: &K) -> u32 {
        mask_hash(self.comparer.hash(key))
    }

    fn find_index(&self, key: &K) -> Option<usize> {
        let hash = self.make_hash(key);
        self.table.find(hash, |k| self.comparer.equals(k, key))
    }

    /// Inserts `key` or overwrites the value of an equal key already present,
    /// returning the value it replaced.
    ///
    /// Fails with `ResourceExhausted` when the table is already at
    /// `MAX_PRIME_ARRAY_LENGTH` and has no free slot left.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let _busy = self.busy.enter();
        let hash = self.make_hash(&key);
        let comparer = &self.comparer;
        if let Some(index) = self.table.find(hash, |k| comparer.equals(k, &key)) {
            if let Some((_, slot)) = self.table.get_mut(index) {
                return Ok(Some(mem::replace(slot, value)));
            }
        }
        self.table.insert_new(hash, key, value)?;
        Ok(None)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let _busy = self.busy.enter();
        let index = self.find_index(key)?;
        self.table.get(index).map(|(_, v)| v)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let _busy = self.busy.enter();
        let index = self.find_index(key)?;
        self.table.get(index)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let _busy = self.busy.enter();
        let index = self.find_index(key)?;
        self.table.get_mut(index).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let _busy = self.busy.enter();
        self.find_index(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Unlinks the entry for `key` and recycles its slot.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let _busy = self.busy.enter();
        let hash = self.make_hash(key);
        let comparer = &self.comparer;
        self.table.remove(hash, |k| comparer.equals(k, key))
    }

    /// Drops every entry. The table keeps its size.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Rebuilds every chain at the current size with hashes recomputed by the
    /// comparer, for comparers whose hashing has changed since insertion.
    pub fn rehash(&mut self) {
        let _busy = self.busy.enter();
        if !self.table.is_allocated() {
            return;
        }
        let size = self.table.table_size();
        let comparer = &self.comparer;
        self.table
            .resize_with(size, |k, _| mask_hash(comparer.hash(k)));
    }

    /// Installs a new comparer, rehashing every entry with it, and returns the
    /// old one. The new comparer must agree with the old one on which keys are
    /// equal. If it panics while hashing, the map keeps the old comparer and
    /// its table untouched.
    pub fn replace_comparer(&mut self, comparer: C) -> C {
        let _busy = self.busy.enter();
        if self.table.is_allocated() {
            let size = self.table.table_size();
            self.table
                .resize_with(size, |k, _| mask_hash(comparer.hash(k)));
            log::debug!("rehashed {} entries with a replacement comparer", self.table.len());
        }
        mem::replace(&mut self.comparer, comparer)
    }

    /// Entries in slot order. Slots freed by removal are reused, so this is
    /// not insertion order once anything has been removed.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.table.check_invariants();
    }
}

impl<K, V, C> Index<&K> for HashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    type Output = V;

    /// # Panics
    ///
    /// If `key` is not present.
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key not present in HashMap"),
        }
    }
}

impl<K, V, C> Extend<(K, V)> for HashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    /// # Panics
    ///
    /// If the table cannot grow any further.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(e) = self.insert(k, v) {
                panic!("{e}");
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a HashMap<K, V, C>
where
    C: KeyComparer<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> fmt::Debug for HashMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.table.iter()).finish()
    }
}
