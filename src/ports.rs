//! Port traits: the boundary between the trigger framework and the robot.
//!
//! ```text
//!   Clock ─────────┐
//!   AnalogSource ──┼──▶ triggers / ProtectedMotor ──▶ Actuator
//!   SharedFlag ────┘
//! ```
//!
//! Adapters (real HAL pins, simulated readings, test doubles) implement
//! these traits. The framework consumes them via generics, so nothing in
//! the core ever touches hardware directly.

use core::time::Duration;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source used by every temporal filter.
///
/// `now()` must never go backwards within a process run. Clocks are
/// cheap handles; every filter gets its own clone.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

impl<K: Clock + ?Sized> Clock for &K {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

// ───────────────────────────────────────────────────────────────
// Analog source port (driven adapter: hardware → framework)
// ───────────────────────────────────────────────────────────────

/// A raw analog quantity: joystick axis, channel current, battery voltage.
///
/// Reads cannot fail from the framework's point of view. A source whose
/// hardware read fails is expected to return its last good value.
pub trait AnalogSource {
    fn read(&mut self) -> f64;
}

impl<F> AnalogSource for F
where
    F: FnMut() -> f64,
{
    fn read(&mut self) -> f64 {
        self()
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: framework → hardware)
// ───────────────────────────────────────────────────────────────

/// A motor or any other output that accepts a scalar command.
///
/// Typically `-1.0..=1.0`, but the framework only ever passes through the
/// caller's value or `0.0`.
pub trait Actuator {
    fn set(&mut self, value: f64);
}

impl<F> Actuator for F
where
    F: FnMut(f64),
{
    fn set(&mut self, value: f64) {
        self(value);
    }
}
