//! Key equality/hash strategies.

use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Equality and hashing strategy for map keys.
///
/// Implementations must be consistent: `equals(a, b)` implies
/// `hash(a) == hash(b)`. A strategy that fails should panic; the map does not
/// catch it.
pub trait KeyComparer<K: ?Sized> {
    fn equals(&self, a: &K, b: &K) -> bool;
    fn hash(&self, key: &K) -> u64;
}

/// The key type's own `Eq` and `Hash`, hashed through a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct DefaultComparer<S = RandomState> {
    build_hasher: S,
}

impl<S> DefaultComparer<S> {
    pub fn with_hasher(build_hasher: S) -> Self {
        Self { build_hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl DefaultComparer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, S> KeyComparer<K> for DefaultComparer<S>
where
    K: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build_hasher.hash_one(key)
    }
}
