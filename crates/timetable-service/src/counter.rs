//! Process-wide count of service invocations.

use shaku::{Component, Interface};
use std::sync::atomic::{AtomicU64, Ordering};

/// Request counter interface for dependency injection.
pub trait RequestCounterInterface: Interface {
    /// Increments the counter and returns the new value.
    fn increment(&self) -> u64;

    /// Returns the current value.
    fn count(&self) -> u64;

    /// Resets the counter to zero.
    fn reset(&self);
}

/// Atomic request counter, owned by the DI module and shared by services.
#[derive(Component, Debug, Default)]
#[shaku(interface = RequestCounterInterface)]
pub struct RequestCounter {
    #[shaku(default)]
    count: AtomicU64,
}

impl RequestCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestCounterInterface for RequestCounter {
    fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}
