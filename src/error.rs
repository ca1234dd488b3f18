//! Error taxonomy shared by both containers.

use thiserror::Error;

/// Failures reported by `DynamicArray` and `HashMap`.
///
/// Failures raised by a key comparer are not represented here: they are
/// panics and unwind through the map unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An index-based access fell outside the live range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A count or capacity argument violated the operation's contract.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// Backing storage cannot grow without passing the size ceiling.
    #[error("capacity exhausted: cannot grow beyond {limit} slots")]
    ResourceExhausted { limit: usize },

    /// The collection was mutated while a cursor was walking it.
    #[error("collection modified during enumeration (expected version {expected}, found {found})")]
    ConcurrentModification { expected: u64, found: u64 },
}

pub type Result<T, E = CollectionError> = core::result::Result<T, E>;
