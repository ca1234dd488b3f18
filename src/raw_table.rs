//! RawTable: structural layer of the hash map.
//!
//! Two parallel arrays of the same length (the table size): bucket heads and
//! slots. Each occupied slot stores its masked hash and the index of the next
//! slot in its chain, so chains are singly linked lists threaded through the
//! slot arena. Slots freed by removal are linked into a free list through the
//! same `next` field and reused before fresh slots are taken.
//!
//! The table never calls user code on its own. Callers hand in a precomputed
//! hash and an equality closure; the only other entry point into user code
//! is the rehash closure passed to `resize_with`.

use crate::error::{CollectionError, Result};
use crate::primes::{expand_prime, get_prime, MAX_PRIME_ARRAY_LENGTH};
use core::mem;

/// Mask applied to comparer hashes before they are stored.
pub const HASH_MASK: u64 = 0x7FFF_FFFF;

/// Masks a full comparer hash down to the stored 31-bit form.
#[inline]
pub fn mask_hash(hash: u64) -> u32 {
    (hash & HASH_MASK) as u32
}

#[derive(Debug)]
struct Entry<K, V> {
    hash: u32,
    next: Option<usize>,
    key: K,
    value: V,
}

#[derive(Debug)]
enum Slot<K, V> {
    /// Never handed out since the last allocation or clear.
    Vacant,
    /// Recycled; `next` links the free list.
    Free { next: Option<usize> },
    Occupied(Entry<K, V>),
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Vacant
    }
}

pub struct RawTable<K, V> {
    buckets: Box<[Option<usize>]>,
    slots: Box<[Slot<K, V>]>,
    // slots handed out so far, live or free
    count: usize,
    free_list: Option<usize>,
    free_count: usize,
}

fn empty_buckets(size: usize) -> Box<[Option<usize>]> {
    vec![None; size].into_boxed_slice()
}

fn vacant_slots<K, V>(size: usize) -> Box<[Slot<K, V>]> {
    core::iter::repeat_with(Slot::default).take(size).collect()
}

/// Walks one bucket's chain, yielding `(slot index, entry)`.
struct Chain<'a, K, V> {
    slots: &'a [Slot<K, V>],
    cur: Option<usize>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (usize, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.cur?;
        match self.slots.get(i) {
            Some(Slot::Occupied(e)) => {
                self.cur = e.next;
                Some((i, e))
            }
            _ => {
                debug_assert!(false, "chain reached non-occupied slot {i}");
                self.cur = None;
                None
            }
        }
    }
}

impl<K, V> RawTable<K, V> {
    /// An unallocated table. The arrays are created on the first insert.
    pub fn new() -> Self {
        Self {
            buckets: Box::default(),
            slots: Box::default(),
            count: 0,
            free_list: None,
            free_count: 0,
        }
    }

    /// A table sized to the next prime above `capacity`, or unallocated when
    /// `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut table = Self::new();
        if capacity > 0 {
            table.initialize(capacity)?;
        }
        Ok(table)
    }

    fn initialize(&mut self, capacity: usize) -> Result<()> {
        if capacity >= MAX_PRIME_ARRAY_LENGTH {
            return Err(CollectionError::ResourceExhausted {
                limit: MAX_PRIME_ARRAY_LENGTH,
            });
        }
        let size = get_prime(capacity);
        self.buckets = empty_buckets(size);
        self.slots = vacant_slots(size);
        self.count = 0;
        self.free_list = None;
        self.free_count = 0;
        log::debug!("allocated hash table with {size} buckets");
        Ok(())
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.buckets.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count - self.free_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets (and slots); 0 while unallocated.
    #[inline]
    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(any(test, feature = "bench_internal"))]
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn chain(&self, bucket: usize) -> Chain<'_, K, V> {
        Chain {
            slots: &self.slots,
            cur: self.buckets[bucket],
        }
    }

    /// Slot index of the entry with `hash` whose key satisfies `eq`.
    pub fn find(&self, hash: u32, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        if !self.is_allocated() {
            return None;
        }
        self.chain(self.bucket_of(hash))
            .find(|(_, e)| e.hash == hash && eq(&e.key))
            .map(|(i, _)| i)
    }

    pub fn get(&self, index: usize) -> Option<(&K, &V)> {
        match self.slots.get(index) {
            Some(Slot::Occupied(e)) => Some((&e.key, &e.value)),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(e)) => Some((&e.key, &mut e.value)),
            _ => None,
        }
    }

    /// Links a new entry at the head of its bucket's chain.
    ///
    /// The caller must already know no entry with an equal key exists. Free
    /// slots are reused first; a full table grows before a fresh slot is
    /// taken.
    pub fn insert_new(&mut self, hash: u32, key: K, value: V) -> Result<usize> {
        if !self.is_allocated() {
            self.initialize(0)?;
        }
        let index = match self.free_list {
            Some(free) => {
                self.free_list = match &self.slots[free] {
                    Slot::Free { next } => *next,
                    _ => {
                        debug_assert!(false, "free list reached non-free slot {free}");
                        None
                    }
                };
                self.free_count -= 1;
                free
            }
            None => {
                if self.count == self.slots.len() {
                    let new_size = expand_prime(self.count)?;
                    self.resize_with(new_size, |_, hash| hash);
                }
                let fresh = self.count;
                self.count += 1;
                fresh
            }
        };
        let bucket = self.bucket_of(hash);
        self.slots[index] = Slot::Occupied(Entry {
            hash,
            next: self.buckets[bucket],
            key,
            value,
        });
        self.buckets[bucket] = Some(index);
        Ok(index)
    }

    /// Unlinks the matching entry, frees its slot and returns its contents.
    pub fn remove(&mut self, hash: u32, mut eq: impl FnMut(&K) -> bool) -> Option<(K, V)> {
        if !self.is_allocated() {
            return None;
        }
        let bucket = self.bucket_of(hash);
        let mut prev = None;
        let mut found = None;
        for (i, e) in self.chain(bucket) {
            if e.hash == hash && eq(&e.key) {
                found = Some((i, e.next));
                break;
            }
            prev = Some(i);
        }
        let (index, next) = found?;

        match prev {
            None => self.buckets[bucket] = next,
            Some(p) => {
                if let Slot::Occupied(pe) = &mut self.slots[p] {
                    pe.next = next;
                }
            }
        }
        let slot = mem::replace(
            &mut self.slots[index],
            Slot::Free {
                next: self.free_list,
            },
        );
        self.free_list = Some(index);
        self.free_count += 1;
        match slot {
            Slot::Occupied(e) => Some((e.key, e.value)),
            _ => None,
        }
    }

    /// Moves every slot into arrays of `new_size` and rebuilds all chains.
    ///
    /// `rehash` receives each live key with its stored hash and returns the
    /// hash to store from now on; ordinary growth passes the stored hash
    /// through. All new hashes are computed before the table is touched, so a
    /// panicking `rehash` leaves the table as it was.
    pub fn resize_with<F>(&mut self, new_size: usize, mut rehash: F)
    where
        F: FnMut(&K, u32) -> u32,
    {
        debug_assert!(new_size >= self.count);
        let hashes: Box<[u32]> = self.slots[..self.count]
            .iter()
            .map(|slot| match slot {
                Slot::Occupied(e) => rehash(&e.key, e.hash),
                _ => 0,
            })
            .collect();

        let old_size = self.slots.len();
        let old_slots = mem::replace(&mut self.slots, vacant_slots(new_size));
        let mut buckets = empty_buckets(new_size);
        for (i, slot) in old_slots.into_vec().into_iter().take(self.count).enumerate() {
            match slot {
                Slot::Occupied(mut e) => {
                    e.hash = hashes[i];
                    let bucket = e.hash as usize % new_size;
                    e.next = buckets[bucket];
                    buckets[bucket] = Some(i);
                    self.slots[i] = Slot::Occupied(e);
                }
                free @ Slot::Free { .. } => self.slots[i] = free,
                Slot::Vacant => {}
            }
        }
        self.buckets = buckets;
        log::debug!(
            "resized hash table from {old_size} to {new_size} buckets ({} live)",
            self.len()
        );
    }

    /// Drops every entry; the table keeps its size.
    pub fn clear(&mut self) {
        self.buckets.fill(None);
        for slot in self.slots.iter_mut() {
            *slot = Slot::Vacant;
        }
        self.count = 0;
        self.free_list = None;
        self.free_count = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots[..self.count].iter(),
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len();
        IterMut {
            it: self.slots[..self.count].iter_mut(),
            remaining,
        }
    }

    /// Panics unless the chains, free list and counters agree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.buckets.len(), self.slots.len());
        assert!(self.count <= self.slots.len());
        if self.is_allocated() {
            assert!(crate::primes::is_prime(self.table_size()));
        }

        let mut reached = vec![0u32; self.slots.len()];
        for bucket in 0..self.buckets.len() {
            let mut steps = 0;
            for (i, e) in self.chain(bucket) {
                steps += 1;
                assert!(steps <= self.count, "chain in bucket {bucket} does not terminate");
                assert_eq!(self.bucket_of(e.hash), bucket);
                assert_eq!(u64::from(e.hash) & !HASH_MASK, 0);
                reached[i] += 1;
            }
        }

        let mut free = 0;
        let mut cur = self.free_list;
        while let Some(i) = cur {
            free += 1;
            assert!(free <= self.count, "free list does not terminate");
            match &self.slots[i] {
                Slot::Free { next } => cur = *next,
                _ => panic!("free list reached non-free slot {i}"),
            }
        }
        assert_eq!(free, self.free_count);

        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Occupied(_) => assert_eq!(reached[i], 1, "slot {i} reached {} times", reached[i]),
                Slot::Free { .. } => assert!(i < self.count),
                Slot::Vacant => assert!(i >= self.count),
            }
        }
    }
}

impl<K, V> Default for RawTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over live entries in slot order.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.it.by_ref() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over live entries in slot order, with mutable values.
pub struct IterMut<'a, K, V> {
    it: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.it.by_ref() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
