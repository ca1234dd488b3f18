//! DynamicArray: a growable, index-addressable buffer.
//!
//! Storage is a fixed-size boxed slice of `Option<T>` that is replaced
//! wholesale when the capacity changes. Slots `[0, len)` always hold a value
//! and slots `[len, capacity)` are always `None`, so removing an element
//! drops it immediately instead of leaving a stale copy behind the live range.
//!
//! Every mutation bumps a version counter. Borrowing iterators cannot observe
//! a mutation, but a detached `Cursor` can, and reports it as
//! `ConcurrentModification` on its next step.

use crate::error::{CollectionError, Result};
use core::fmt;
use core::ops::{Index, IndexMut};

/// Capacity of a new array when none (or zero) is requested.
pub const DEFAULT_CAPACITY: usize = 4;

/// Largest capacity the array will grow to.
pub const MAX_ARRAY_LENGTH: usize = 0x7FEF_FFFF;

pub struct DynamicArray<T> {
    items: Box<[Option<T>]>,
    len: usize,
    version: u64,
}

fn empty_buffer<T>(capacity: usize) -> Box<[Option<T>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

fn out_of_range(index: usize, len: usize) -> CollectionError {
    CollectionError::IndexOutOfRange { index, len }
}

impl<T> DynamicArray<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// # Panics
    ///
    /// If `capacity` exceeds `MAX_ARRAY_LENGTH`.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(array) => array,
            Err(e) => panic!("{e}"),
        }
    }

    /// An empty array with room for `capacity` elements, or
    /// `DEFAULT_CAPACITY` when `capacity` is zero.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        if capacity > MAX_ARRAY_LENGTH {
            return Err(CollectionError::ResourceExhausted {
                limit: MAX_ARRAY_LENGTH,
            });
        }
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        Ok(Self {
            items: empty_buffer(capacity),
            len: 0,
            version: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Mutation counter. Wraps on overflow.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Moves the elements into a fresh buffer of `capacity` slots.
    ///
    /// Setting the current capacity is a no-op. Setting zero does not shrink
    /// to nothing: it resets to a fresh `DEFAULT_CAPACITY` buffer. A capacity
    /// below `len()` is rejected rather than truncating.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == self.items.len() {
            return Ok(());
        }
        if capacity < self.len {
            return Err(CollectionError::InvalidArgument {
                name: "capacity",
                reason: "smaller than the number of elements",
            });
        }
        if capacity > MAX_ARRAY_LENGTH {
            return Err(CollectionError::ResourceExhausted {
                limit: MAX_ARRAY_LENGTH,
            });
        }
        if capacity == 0 {
            self.items = empty_buffer(DEFAULT_CAPACITY);
            return Ok(());
        }
        let mut items = empty_buffer(capacity);
        for (dst, src) in items.iter_mut().zip(self.items[..self.len].iter_mut()) {
            *dst = src.take();
        }
        log::trace!(
            "dynamic array buffer {} -> {} slots",
            self.items.len(),
            capacity
        );
        self.items = items;
        Ok(())
    }

    /// Grows to at least `min` slots: double the current capacity, clamped
    /// to `MAX_ARRAY_LENGTH`, or `min` itself if that is larger.
    fn ensure_capacity(&mut self, min: usize) -> Result<()> {
        if self.items.len() >= min {
            return Ok(());
        }
        if min > MAX_ARRAY_LENGTH {
            return Err(CollectionError::ResourceExhausted {
                limit: MAX_ARRAY_LENGTH,
            });
        }
        let doubled = if self.items.is_empty() {
            DEFAULT_CAPACITY
        } else {
            self.items.len().saturating_mul(2)
        };
        self.set_capacity(doubled.min(MAX_ARRAY_LENGTH).max(min))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items[..self.len].get(index)?.as_ref()
    }

    /// Counts as a mutation when it returns `Some`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        self.bump_version();
        self.items[index].as_mut()
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.len {
            return Err(out_of_range(index, self.len));
        }
        self.bump_version();
        let old = self.items[index].replace(value);
        Ok(old.expect("live slot holds a value"))
    }

    /// Appends `value` and returns the index it was stored at.
    pub fn add(&mut self, value: T) -> Result<usize> {
        if self.len == self.items.len() {
            self.ensure_capacity(self.len + 1)?;
        }
        let index = self.len;
        self.items[index] = Some(value);
        self.len += 1;
        self.bump_version();
        Ok(index)
    }

    pub fn add_range<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.insert_range(self.len, values)
    }

    /// Inserts `value` at `index`, shifting later elements one slot right.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(out_of_range(index, self.len));
        }
        if self.len == self.items.len() {
            self.ensure_capacity(self.len + 1)?;
        }
        // The empty slot at `len` rotates down to `index`.
        self.items[index..=self.len].rotate_right(1);
        self.items[index] = Some(value);
        self.len += 1;
        self.bump_version();
        Ok(())
    }

    /// Inserts all of `values` at `index`, in iteration order.
    ///
    /// The values are gathered before the array is touched; an empty input
    /// changes nothing.
    pub fn insert_range<I>(&mut self, index: usize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len {
            return Err(out_of_range(index, self.len));
        }
        let incoming: Box<[T]> = values.into_iter().collect();
        let count = incoming.len();
        if count == 0 {
            return Ok(());
        }
        let min = self
            .len
            .checked_add(count)
            .ok_or(CollectionError::ResourceExhausted {
                limit: MAX_ARRAY_LENGTH,
            })?;
        self.ensure_capacity(min)?;

        self.items[index..min].rotate_right(count);
        for (slot, value) in self.items[index..index + count]
            .iter_mut()
            .zip(incoming.into_vec())
        {
            *slot = Some(value);
        }
        self.len = min;
        self.bump_version();
        Ok(())
    }

    /// Drops every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in self.items[..self.len].iter_mut() {
            *slot = None;
        }
        self.len = 0;
        self.bump_version();
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// one slot left.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(out_of_range(index, self.len));
        }
        let removed = self.items[index].take();
        self.items[index..self.len].rotate_left(1);
        self.len -= 1;
        self.bump_version();
        Ok(removed.expect("live slot holds a value"))
    }

    /// Removes `count` elements starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        let end = match index.checked_add(count) {
            Some(end) if end <= self.len => end,
            _ => return Err(out_of_range(index.saturating_add(count), self.len)),
        };
        if count == 0 {
            return Ok(());
        }
        for slot in self.items[index..end].iter_mut() {
            *slot = None;
        }
        self.items[index..self.len].rotate_left(count);
        self.len -= count;
        self.bump_version();
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.items[..self.len].iter(),
        }
    }

    /// A detached cursor positioned before the first element.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            index: 0,
            version: self.version,
        }
    }
}

impl<T: PartialEq> DynamicArray<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// First match at or after `start`.
    pub fn index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>> {
        if start > self.len {
            return Err(out_of_range(start, self.len));
        }
        self.index_of_in(value, start, self.len - start)
    }

    /// First match within `[start, start + count)`.
    pub fn index_of_in(&self, value: &T, start: usize, count: usize) -> Result<Option<usize>> {
        let end = match start.checked_add(count) {
            Some(end) if end <= self.len => end,
            _ => return Err(out_of_range(start.saturating_add(count), self.len)),
        };
        Ok(self.items[start..end]
            .iter()
            .position(|v| v.as_ref() == Some(value))
            .map(|i| i + start))
    }

    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.iter().rposition(|v| v == value)
    }

    /// Last match at or before `start`, searching all the way to index 0.
    pub fn last_index_of_from(&self, value: &T, start: usize) -> Result<Option<usize>> {
        self.last_index_of_in(value, start, start.saturating_add(1))
    }

    /// Last match among the `count` elements ending at `start` (inclusive),
    /// searching backwards. An empty array never matches, whatever the
    /// arguments.
    pub fn last_index_of_in(
        &self,
        value: &T,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>> {
        if self.len == 0 {
            return Ok(None);
        }
        if start >= self.len {
            return Err(out_of_range(start, self.len));
        }
        if count > start + 1 {
            return Err(CollectionError::InvalidArgument {
                name: "count",
                reason: "reaches before the start of the array",
            });
        }
        let lo = start + 1 - count;
        Ok(self.items[lo..start + 1]
            .iter()
            .rposition(|v| v.as_ref() == Some(value))
            .map(|i| i + lo))
    }

    /// Removes the first element equal to `value`. Returns whether one was
    /// found.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            len: self.len,
            version: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    /// Compares elements only; capacity and version are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(v) => v,
            None => panic!("{}", out_of_range(index, self.len)),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    /// Counts as a mutation.
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(v) => v,
            None => panic!("{}", out_of_range(index, len)),
        }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    /// # Panics
    ///
    /// If the array would exceed `MAX_ARRAY_LENGTH`.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(e) = self.add_range(iter) {
            panic!("{e}");
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the live elements.
pub struct Iter<'a, T> {
    it: core::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.it.next()?.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.it.next_back()?.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Position in a `DynamicArray` that does not borrow it.
///
/// The cursor remembers the array's version when it was created or reset;
/// stepping after any mutation fails with `ConcurrentModification`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    version: u64,
}

impl Cursor {
    /// The next element, or `Ok(None)` once the end is reached.
    pub fn next<'a, T>(&mut self, array: &'a DynamicArray<T>) -> Result<Option<&'a T>> {
        if array.version != self.version {
            return Err(CollectionError::ConcurrentModification {
                expected: self.version,
                found: array.version,
            });
        }
        let item = array.get(self.index);
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }

    /// Rewinds to the start and adopts the array's current version.
    pub fn reset<T>(&mut self, array: &DynamicArray<T>) {
        self.index = 0;
        self.version = array.version;
    }

    /// Number of elements already yielded.
    pub fn position(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn array_of(values: &[i32]) -> DynamicArray<i32> {
        values.iter().copied().collect()
    }

    fn to_vec(a: &DynamicArray<i32>) -> Vec<i32> {
        a.iter().copied().collect()
    }

    #[test]
    fn three_adds_fit_default_capacity() {
        let mut a = DynamicArray::new();
        assert_eq!(a.add(10), Ok(0));
        assert_eq!(a.add(20), Ok(1));
        assert_eq!(a.add(30), Ok(2));
        assert_eq!(a.len(), 3);
        assert_eq!((a[0], a[1], a[2]), (10, 20, 30));
        assert_eq!(a.capacity(), 4);
    }

    /// Invariant: capacity doubles when an add finds the buffer full.
    #[test]
    fn fifth_add_doubles_capacity() {
        let mut a = DynamicArray::with_capacity(4);
        for i in 0..4 {
            a.add(i).unwrap();
        }
        assert_eq!(a.capacity(), 4);
        a.add(4).unwrap();
        assert_eq!(a.capacity(), 8);
        assert_eq!(to_vec(&a), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_capacity_means_default() {
        let a: DynamicArray<u8> = DynamicArray::with_capacity(0);
        assert_eq!(a.capacity(), DEFAULT_CAPACITY);
        assert!(DynamicArray::<u8>::try_with_capacity(MAX_ARRAY_LENGTH + 1).is_err());
    }

    #[test]
    fn remove_range_closes_gap() {
        let mut a = array_of(&[10, 20, 30, 40, 50]);
        a.remove_range(1, 2).unwrap();
        assert_eq!(to_vec(&a), vec![10, 40, 50]);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn remove_range_bounds_and_noop() {
        let mut a = array_of(&[1, 2, 3]);
        let v = a.version();
        a.remove_range(3, 0).unwrap();
        assert_eq!(a.version(), v, "empty removal is not a mutation");
        assert_eq!(
            a.remove_range(2, 2),
            Err(CollectionError::IndexOutOfRange { index: 4, len: 3 })
        );
        assert!(a.remove_range(usize::MAX, 2).is_err());
        assert_eq!(to_vec(&a), vec![1, 2, 3]);
    }

    /// Invariant: setting capacity to zero on an empty array resets it to the
    /// default buffer instead of shrinking.
    #[test]
    fn set_capacity_zero_resets_to_default() {
        let mut a: DynamicArray<i32> = DynamicArray::with_capacity(32);
        a.set_capacity(0).unwrap();
        assert_eq!(a.capacity(), DEFAULT_CAPACITY);
    }

    /// Invariant: a capacity below the element count is rejected and leaves
    /// the array untouched.
    #[test]
    fn set_capacity_below_len_is_rejected() {
        let mut a = array_of(&[1, 2, 3, 4, 5]);
        let cap = a.capacity();
        assert!(matches!(
            a.set_capacity(2),
            Err(CollectionError::InvalidArgument { name: "capacity", .. })
        ));
        assert!(a.set_capacity(0).is_err());
        assert_eq!(a.capacity(), cap);
        assert_eq!(to_vec(&a), vec![1, 2, 3, 4, 5]);

        a.set_capacity(5).unwrap();
        assert_eq!(a.capacity(), 5);
        a.set_capacity(64).unwrap();
        assert_eq!(a.capacity(), 64);
        assert_eq!(to_vec(&a), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn set_capacity_does_not_bump_version() {
        let mut a = array_of(&[1]);
        let v = a.version();
        a.set_capacity(16).unwrap();
        assert_eq!(a.version(), v);
    }

    /// Invariant: insert then remove_at at the same index restores the
    /// visible sequence but not the version.
    #[test]
    fn insert_remove_round_trip() {
        let mut a = array_of(&[1, 2, 3, 4]);
        let v = a.version();
        a.insert(2, 99).unwrap();
        assert_eq!(to_vec(&a), vec![1, 2, 99, 3, 4]);
        assert_eq!(a.remove_at(2), Ok(99));
        assert_eq!(to_vec(&a), vec![1, 2, 3, 4]);
        assert_eq!(a.version(), v + 2);
    }

    #[test]
    fn insert_at_ends_and_out_of_range() {
        let mut a = array_of(&[2]);
        a.insert(0, 1).unwrap();
        a.insert(2, 3).unwrap();
        assert_eq!(to_vec(&a), vec![1, 2, 3]);
        assert_eq!(
            a.insert(5, 0),
            Err(CollectionError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(a.remove_at(3), Err(CollectionError::IndexOutOfRange { index: 3, len: 3 }));
    }

    /// Invariant: insert_range places the collection's elements in order at
    /// the requested index.
    #[test]
    fn insert_range_preserves_order() {
        let mut a = array_of(&[1, 2, 3]);
        a.insert_range(1, vec![7, 8, 9, 10]).unwrap();
        assert_eq!(to_vec(&a), vec![1, 7, 8, 9, 10, 2, 3]);
        assert_eq!(a.capacity(), 8);

        let v = a.version();
        a.insert_range(0, Vec::new()).unwrap();
        assert_eq!(a.version(), v, "empty insert_range is a no-op");

        a.add_range([11, 12]).unwrap();
        assert_eq!(a.get(8), Some(&12));
        assert!(a.insert_range(100, [1]).is_err());
    }

    /// Invariant: growth for a bulk insert jumps straight to the required
    /// size when doubling is not enough.
    #[test]
    fn insert_range_grows_to_min_when_doubling_is_short() {
        let mut a = DynamicArray::new();
        a.add_range(0..20).unwrap();
        assert_eq!(a.capacity(), 20);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn index_of_variants() {
        let a = array_of(&[5, 6, 5, 7, 5]);
        assert_eq!(a.index_of(&5), Some(0));
        assert_eq!(a.index_of(&9), None);
        assert_eq!(a.index_of_from(&5, 1), Ok(Some(2)));
        assert_eq!(a.index_of_from(&5, 5), Ok(None));
        assert!(a.index_of_from(&5, 6).is_err());
        assert_eq!(a.index_of_in(&5, 1, 1), Ok(None));
        assert_eq!(a.index_of_in(&7, 1, 3), Ok(Some(3)));
        assert!(a.index_of_in(&5, 3, 3).is_err());
        assert!(a.contains(&7));
        assert!(!a.contains(&8));
    }

    #[test]
    fn last_index_of_variants() {
        let a = array_of(&[5, 6, 5, 7, 5]);
        assert_eq!(a.last_index_of(&5), Some(4));
        assert_eq!(a.last_index_of_from(&5, 3), Ok(Some(2)));
        assert_eq!(a.last_index_of_from(&6, 0), Ok(None));
        assert_eq!(a.last_index_of_in(&5, 3, 1), Ok(None));
        assert_eq!(a.last_index_of_in(&5, 3, 2), Ok(Some(2)));
        assert_eq!(a.last_index_of_in(&5, 3, 0), Ok(None));
        assert!(matches!(
            a.last_index_of_in(&5, 1, 3),
            Err(CollectionError::InvalidArgument { name: "count", .. })
        ));
        assert!(a.last_index_of_from(&5, 5).is_err());

        let empty: DynamicArray<i32> = DynamicArray::new();
        assert_eq!(empty.last_index_of_from(&5, 10), Ok(None));
    }

    #[test]
    fn remove_by_value_takes_first_match() {
        let mut a = array_of(&[1, 2, 1]);
        assert!(a.remove(&1));
        assert_eq!(to_vec(&a), vec![2, 1]);
        let v = a.version();
        assert!(!a.remove(&9));
        assert_eq!(a.version(), v);
    }

    /// Invariant: vacated slots release their values immediately.
    #[test]
    fn removals_and_clear_drop_values() {
        let item = Rc::new(());
        let mut a = DynamicArray::new();
        for _ in 0..6 {
            a.add(item.clone()).unwrap();
        }
        assert_eq!(Rc::strong_count(&item), 7);
        a.remove_at(0).unwrap();
        assert_eq!(Rc::strong_count(&item), 6);
        a.remove_range(0, 2).unwrap();
        assert_eq!(Rc::strong_count(&item), 4);
        a.clear();
        assert_eq!(Rc::strong_count(&item), 1);
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 8);
    }

    #[test]
    fn set_and_index_mut_bump_version() {
        let mut a = array_of(&[1, 2]);
        let v = a.version();
        assert_eq!(a.set(1, 20), Ok(2));
        a[0] = 10;
        assert_eq!(to_vec(&a), vec![10, 20]);
        assert_eq!(a.version(), v + 2);
        assert_eq!(a.set(2, 0), Err(CollectionError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(a.get_mut(2), None);
        assert_eq!(a.version(), v + 2);
    }

    #[test]
    #[should_panic(expected = "index 3 out of range for length 3")]
    fn index_out_of_range_panics() {
        let a = array_of(&[1, 2, 3]);
        let _value = a[3];
    }

    #[test]
    fn cursor_walks_then_detects_mutation() {
        let mut a = array_of(&[1, 2, 3]);
        let mut c = a.cursor();
        assert_eq!(c.next(&a), Ok(Some(&1)));
        assert_eq!(c.next(&a), Ok(Some(&2)));
        assert_eq!(c.position(), 2);

        let before = a.version();
        a.add(4).unwrap();
        assert_eq!(
            c.next(&a),
            Err(CollectionError::ConcurrentModification {
                expected: before,
                found: before + 1
            })
        );

        c.reset(&a);
        let mut seen = vec![];
        while let Some(v) = c.next(&a).unwrap() {
            seen.push(*v);
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn equality_debug_and_clone() {
        let mut a = array_of(&[1, 2]);
        a.set_capacity(10).unwrap();
        let b = array_of(&[1, 2]);
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "[1, 2]");
        let c = a.clone();
        assert_eq!(c, a);
        assert_eq!(c.capacity(), 10);
        assert_eq!(a.iter().rev().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(a.iter().len(), 2);
    }
}
