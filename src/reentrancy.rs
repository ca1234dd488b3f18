//! Debug-only guard against a comparer re-entering its own map.
//!
//! `HashMap` calls into user code (the key comparer) while walking chains
//! and while rehashing. A comparer that reaches back into the same map at
//! that point would observe a half-updated table. In debug builds the guard
//! turns that into an immediate panic; in release builds it is a zero-sized
//! no-op.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map busy flag. Public map methods hold `let _busy = self.busy.enter();`
/// for as long as the table may call the comparer.
#[derive(Debug)]
pub(crate) struct BusyFlag {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // The map is single-threaded; keep it !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl BusyFlag {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Marks the map busy until the returned token drops. Panics in debug
    /// builds if it is already busy.
    #[inline]
    pub(crate) fn enter(&self) -> Busy<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "hash map re-entered from its own key comparer"
            );
            Busy { flag: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Busy { _flag: PhantomData }
        }
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Token returned by `BusyFlag::enter`; clears the flag on drop, including
/// while unwinding out of a panicking comparer.
pub(crate) struct Busy<'a> {
    #[cfg(debug_assertions)]
    flag: &'a BusyFlag,
    #[cfg(not(debug_assertions))]
    _flag: PhantomData<&'a BusyFlag>,
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.flag.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::BusyFlag;

    #[test]
    fn enter_release_enter_again() {
        let f = BusyFlag::new();
        drop(f.enter());
        let _busy = f.enter();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_enter_panics_in_debug() {
        let f = BusyFlag::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = f.enter();
            let _inner = f.enter();
        }));
        assert!(res.is_err(), "expected nested entry to panic in debug builds");
        // The outer token was dropped during unwinding.
        let _busy = f.enter();
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_enter_is_noop_in_release() {
        let f = BusyFlag::new();
        let _outer = f.enter();
        let _inner = f.enter();
    }
}
