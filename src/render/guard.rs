//! Load guard
//!
//! Per-region "fetch in flight" marker. Acquisition is a compare-and-swap so
//! two tasks racing on the same region cannot both dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-flight marker owned by a region
#[derive(Debug, Default)]
pub struct LoadGuard {
    in_flight: AtomicBool,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is currently in flight
    pub fn is_set(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Try to mark the region as loading.
    ///
    /// Returns `None` if another fetch already holds the guard.
    pub fn try_acquire(self: &Arc<Self>) -> Option<GuardToken> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GuardToken {
                guard: Arc::clone(self),
            })
    }
}

/// Held while a fetch is in flight; clears the guard on drop
#[derive(Debug)]
pub struct GuardToken {
    guard: Arc<LoadGuard>,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}
