//! Time adapters implementing [`Clock`].
//!
//! - [`SystemClock`]: wraps `std::time::Instant` for real control loops.
//! - [`ManualClock`]: simulated time advanced explicitly by the caller,
//!   for tests and offline replays. Clones share the same timeline.

use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;

use crate::ports::Clock;

/// Monotonic wall clock, origin at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Simulated clock with microsecond resolution.
///
/// Every clone observes the same time, so one handle can drive a whole
/// tree of filters.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.micros
            .fetch_add(step.as_micros() as u64, Ordering::AcqRel);
    }

    /// Convenience for `advance(Duration::from_millis(ms))`.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Jump to an absolute time. Earlier values are ignored to keep the
    /// clock monotonic.
    pub fn set(&self, at: Duration) {
        self.micros
            .fetch_max(at.as_micros() as u64, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Acquire))
    }
}
