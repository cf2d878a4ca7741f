//! Simulated analog input.
//!
//! [`SimAnalog`] stores an `f64` in an atomic so a test, a replay script or
//! another thread can inject readings while the control loop polls the
//! same value through [`AnalogSource`].

use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ports::AnalogSource;

#[derive(Debug, Clone, Default)]
pub struct SimAnalog {
    bits: Arc<AtomicU64>,
}

impl SimAnalog {
    pub fn new(initial: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(initial.to_bits())),
        }
    }

    /// Inject a new reading.
    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl AnalogSource for SimAnalog {
    fn read(&mut self) -> f64 {
        self.load()
    }
}
