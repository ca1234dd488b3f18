//! prime-collections: a growable array and a separately chained hash map,
//! both built directly on fixed-size boxed slices.
//!
//! Internal Design:
//!
//! Summary
//! - `DynamicArray<T>`: contiguous storage that doubles when full. Slots past
//!   the live range are always empty, and a version counter lets a detached
//!   `Cursor` fail fast when the array changes underneath it.
//! - `HashMap<K, V, C>`: separate chaining over two parallel arrays, bucket
//!   heads and slots, both sized from a prime sequence.
//!   - `RawTable<K, V>`: structural layer. Chains are threaded through the
//!     slot arena by index; removed slots go on a free list and are reused
//!     before fresh ones. Takes precomputed hashes and equality closures and
//!     never calls user code itself.
//!   - `HashMap` owns the `KeyComparer`, masks its hashes to 31 bits and
//!     guards every comparer call with a debug-only reentrancy flag.
//!
//! Growth
//! - The array doubles (minimum 4) up to `MAX_ARRAY_LENGTH`.
//! - The map grows only when every slot has been handed out and the free
//!   list is empty. The new size is the smallest prime above twice the slot
//!   count, clamped to `MAX_PRIME_ARRAY_LENGTH`. Every chain is rebuilt from
//!   the stored hashes; `rehash` and `replace_comparer` rebuild with fresh
//!   hashes from the comparer instead.
//!
//! Failures
//! - Index, argument and capacity failures are `CollectionError` values.
//!   Arguments are checked before anything is mutated.
//! - A panicking comparer unwinds through the map unchanged. Fresh hashes
//!   for a rehash are all computed before the table is touched.
//!
//! Constraints
//! - Single-threaded. `HashMap` is `!Send`/`!Sync` because of its reentrancy
//!   flag.
//! - No `unsafe` outside tests.

pub mod comparer;
pub mod dynamic_array;
pub mod error;
pub mod hash_map;
mod hash_map_proptest;
pub mod primes;
#[cfg(feature = "bench_internal")]
pub mod raw_table;
#[cfg(not(feature = "bench_internal"))]
mod raw_table;
mod reentrancy;

// Public surface
pub use comparer::{DefaultComparer, KeyComparer};
pub use dynamic_array::{Cursor, DynamicArray, DEFAULT_CAPACITY, MAX_ARRAY_LENGTH};
pub use error::{CollectionError, Result};
pub use hash_map::HashMap;
pub use primes::MAX_PRIME_ARRAY_LENGTH;
