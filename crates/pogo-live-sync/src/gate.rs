//! Mutual exclusion between refresh cycles.

use std::sync::atomic::{AtomicBool, Ordering};

/// Admits at most one refresh cycle at a time.
///
/// Acquisition never waits: a caller that finds the gate closed is
/// expected to drop its request.
#[derive(Debug, Default)]
pub struct ExclusionGate {
    busy: AtomicBool,
}

impl ExclusionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the gate, or `None` if a cycle already holds it.
    pub fn try_acquire(&self) -> Option<GateGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds the gate closed until dropped, on success and error paths alike.
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a ExclusionGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
