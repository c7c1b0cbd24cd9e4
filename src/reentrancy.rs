//! Debug-only check that key code does not call back into the map.
//!
//! Keyed operations run user `K: Hash` and `K: Eq` while a bucket scan is in
//! progress. `ScanTracker` records which operation owns the scan; a second
//! operation starting before the first finishes panics in debug builds and
//! names both. Release builds keep only the `!Send`/`!Sync` marker.

use core::cell::Cell;
use core::marker::PhantomData;

pub(crate) struct ScanTracker {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // The map is a single-threaded container.
    _single_thread: PhantomData<*mut ()>,
}

impl ScanTracker {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _single_thread: PhantomData,
        }
    }

    /// Mark `op` as scanning until the returned section is dropped.
    #[inline]
    pub(crate) fn begin(&self, op: &'static str) -> ScanSection<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.replace(Some(op)) {
                // The outer section still owns the scan and will clear it.
                self.active.set(Some(outer));
                panic!(
                    "ChainedHashMap::{op} called from key code while \
                     ChainedHashMap::{outer} is scanning a bucket"
                );
            }
            ScanSection { tracker: self }
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            ScanSection {
                _tracker: PhantomData,
            }
        }
    }

    #[cfg(all(test, debug_assertions))]
    pub(crate) fn active(&self) -> Option<&'static str> {
        self.active.get()
    }
}

// A cloned map has no scan in progress.
impl Clone for ScanTracker {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Open scan; clears the tracker on drop.
pub(crate) struct ScanSection<'a> {
    #[cfg(debug_assertions)]
    tracker: &'a ScanTracker,
    #[cfg(not(debug_assertions))]
    _tracker: PhantomData<&'a ScanTracker>,
}

impl Drop for ScanSection<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.tracker.active.set(None);
    }
}
