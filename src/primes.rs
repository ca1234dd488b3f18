//! Prime table sizing.
//!
//! Stateless helpers used to size the hash table. Bucket selection is a plain
//! modulus, so prime table sizes keep clustered hash values from piling into
//! a few buckets.

use crate::error::{CollectionError, Result};

/// Largest table size the map will ever allocate. Prime.
pub const MAX_PRIME_ARRAY_LENGTH: usize = 0x7FEF_FFFD;

/// Returns true if `n` is prime. Trial division by 2, 3 and `6k ± 1`.
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Smallest prime strictly greater than `n`; values `<= 1` give 2.
pub fn get_prime(n: usize) -> usize {
    if n <= 1 {
        return 2;
    }
    let mut candidate = n;
    loop {
        candidate += 1;
        if is_prime(candidate) {
            return candidate;
        }
    }
}

/// Next table size after `old_size`: a prime above twice the old size.
///
/// Doubling past the ceiling clamps to `MAX_PRIME_ARRAY_LENGTH` as long as
/// that is still an increase. A table already at the ceiling cannot grow.
pub fn expand_prime(old_size: usize) -> Result<usize> {
    if old_size >= MAX_PRIME_ARRAY_LENGTH {
        return Err(CollectionError::ResourceExhausted {
            limit: MAX_PRIME_ARRAY_LENGTH,
        });
    }
    let new_size = old_size.saturating_mul(2);
    if new_size >= MAX_PRIME_ARRAY_LENGTH {
        return Ok(MAX_PRIME_ARRAY_LENGTH);
    }
    Ok(get_prime(new_size))
}
