//! Run-wide termination signal.

use core::sync::atomic::{AtomicBool, Ordering};

use crossbeam_utils::CachePadded;

/// A set-once, read-many boolean.
///
/// Every worker polls the flag once per loop iteration, so it lives on its own
/// cache line to keep those loads from bouncing with neighbouring counters.
#[derive(Default)]
pub struct TerminationFlag {
    inner: CachePadded<AtomicBool>,
}

impl TerminationFlag {
    /// Creates a cleared flag.
    pub fn new() -> Self {
        Self {
            inner: CachePadded::new(AtomicBool::new(false)),
        }
    }

    /// Sets the flag.
    ///
    /// Returns `true` only for the caller that transitioned it from clear to set.
    #[inline]
    pub fn signal(&self) -> bool {
        self.inner
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Returns whether the flag has been set.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }
}

impl core::fmt::Debug for TerminationFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("TerminationFlag").field(&self.is_set()).finish()
    }
}
