//! Minimum-hold-time debounce filter.
//!
//! The output rises only after the wrapped condition has been true
//! continuously for the required duration, and falls on the very poll the
//! wrapped condition is seen false. Only spurious short activations are
//! suppressed; releases are never delayed.
//!
//! | Wrapped | Pending timer | Output                         |
//! |---------|---------------|--------------------------------|
//! | false   | reset         | false                          |
//! | true    | start if idle | `now - since >= required`      |
//!
//! A single false poll throws away the accumulated hold time.

use core::time::Duration;

use super::Condition;
use crate::error::{Result, duration_secs};
use crate::ports::Clock;

/// Logical state of a debounce-style filter after its most recent poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// The wrapped condition was false.
    Idle,
    /// The wrapped condition is true but has not held long enough.
    Pending,
    /// The wrapped condition has held for the required duration.
    Confirmed,
}

pub struct Debounce<C, K> {
    inner: C,
    clock: K,
    required: Duration,
    /// When the current run of true polls began. `None` when idle.
    pending_since: Option<Duration>,
    confirmed: bool,
}

impl<C: Condition, K: Clock> Debounce<C, K> {
    /// Wrap `inner`, requiring it to hold for `required_secs` seconds.
    pub fn new(inner: C, clock: K, required_secs: f64) -> Result<Self> {
        let required = duration_secs("required_duration", required_secs)?;
        Ok(Self::with_duration(inner, clock, required))
    }

    pub fn with_duration(inner: C, clock: K, required: Duration) -> Self {
        Self {
            inner,
            clock,
            required,
            pending_since: None,
            confirmed: false,
        }
    }

    pub fn required(&self) -> Duration {
        self.required
    }

    /// Change the hold time. A run already in progress is measured against
    /// the new value from its original start.
    pub fn set_required_duration(&mut self, secs: f64) -> Result<()> {
        self.required = duration_secs("required_duration", secs)?;
        Ok(())
    }

    pub fn state(&self) -> FilterState {
        match (self.pending_since, self.confirmed) {
            (None, _) => FilterState::Idle,
            (Some(_), false) => FilterState::Pending,
            (Some(_), true) => FilterState::Confirmed,
        }
    }

    /// Start of the current run of true polls, if one is in progress.
    pub fn pending_since(&self) -> Option<Duration> {
        self.pending_since
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: Condition, K: Clock> Condition for Debounce<C, K> {
    fn poll(&mut self) -> bool {
        if !self.inner.poll() {
            self.pending_since = None;
            self.confirmed = false;
            return false;
        }

        let now = self.clock.now();
        let since = *self.pending_since.get_or_insert(now);
        self.confirmed = now.saturating_sub(since) >= self.required;
        self.confirmed
    }
}
