//! Trigger framework: sampled boolean conditions and their decorators.
//!
//! Everything here implements [`Condition`]: "produce a boolean when
//! polled". Decorators wrap other conditions and add private state:
//!
//! ```text
//!   AnalogSource ──▶ threshold ──▶ Debounce ─────┐
//!   InputPin ──────▶ DigitalInput ───────────────┼──▶ All / Any / Gated ──▶ caller
//!   AnalogSource ──▶ VoltageMonitor (hysteresis) ┘
//! ```
//!
//! ## Polling contract
//!
//! Conditions are polled from a single control loop, **at most once per
//! tick**. Stateful filters measure time between polls, so polling the
//! same instance twice in a tick skews its timers. `poll` takes
//! `&mut self`, which keeps ownership of that state unambiguous.

pub mod axis;
pub mod combinators;
pub mod current;
pub mod debounce;
pub mod hysteresis;

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::ports::Clock;
use debounce::Debounce;

pub use axis::AxisTrigger;
pub use combinators::{All, Any, Gated};
pub use current::OvercurrentMonitor;
pub use debounce::FilterState;
pub use hysteresis::{Hysteresis, VoltageMonitor};

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// A boolean sampled at the caller's cadence.
///
/// Polling never fails. Implementations that read hardware are expected
/// to fall back to a last-known value on read errors.
pub trait Condition {
    fn poll(&mut self) -> bool;
}

impl<C: Condition + ?Sized> Condition for Box<C> {
    fn poll(&mut self) -> bool {
        (**self).poll()
    }
}

impl<C: Condition + ?Sized> Condition for &mut C {
    fn poll(&mut self) -> bool {
        (**self).poll()
    }
}

/// Adapter returned by [`from_fn`].
pub struct FnCondition<F>(F);

/// Wrap a closure as a [`Condition`].
pub fn from_fn<F>(f: F) -> FnCondition<F>
where
    F: FnMut() -> bool,
{
    FnCondition(f)
}

impl<F> Condition for FnCondition<F>
where
    F: FnMut() -> bool,
{
    fn poll(&mut self) -> bool {
        (self.0)()
    }
}

/// A condition that always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant(pub bool);

impl Condition for Constant {
    fn poll(&mut self) -> bool {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Builder helpers
// ---------------------------------------------------------------------------

/// Chaining helpers available on every sized [`Condition`].
pub trait ConditionExt: Condition + Sized {
    /// Erase the concrete type, e.g. to push into [`All`] or [`Any`].
    fn boxed<'a>(self) -> Box<dyn Condition + 'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }

    /// Require this condition to hold for `secs` before reporting true.
    fn debounced<K: Clock>(self, clock: K, secs: f64) -> Result<Debounce<Self, K>> {
        Debounce::new(self, clock, secs)
    }

    /// Only report true while `flag` is set.
    fn gated(self, flag: SharedFlag) -> Gated<Self> {
        Gated::new(self, flag)
    }
}

impl<C: Condition> ConditionExt for C {}

// ---------------------------------------------------------------------------
// SharedFlag
// ---------------------------------------------------------------------------

/// A boolean shared between the control loop and outside code
/// (operator console, another thread, a mode switch).
///
/// Clones refer to the same flag. Reads use acquire ordering, writes
/// release.
#[derive(Debug, Clone, Default)]
pub struct SharedFlag(Arc<AtomicBool>);

impl SharedFlag {
    pub fn new(initial: bool) -> Self {
        Self(Arc::new(AtomicBool::new(initial)))
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// Shared comparisons
// ---------------------------------------------------------------------------

/// `value >= limit`, false for NaN on either side.
pub(crate) fn at_or_above(value: f64, limit: f64) -> bool {
    value >= limit
}

/// `value <= limit`, false for NaN on either side.
pub(crate) fn at_or_below(value: f64, limit: f64) -> bool {
    value <= limit
}
