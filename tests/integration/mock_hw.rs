//! Mock hardware for integration tests.
//!
//! Records every actuator command so tests can assert on the full command
//! history without touching real PWM outputs.

use robotguard::adapters::sim::SimAnalog;
use robotguard::adapters::time::ManualClock;
use robotguard::ports::Actuator;
use robotguard::safety::ProtectedMotor;

// ── MockMotor ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockMotor {
    pub calls: Vec<f64>,
}

#[allow(dead_code)]
impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<f64> {
        self.calls.last().copied()
    }

    /// True when the most recent command was a non-zero output.
    pub fn running(&self) -> bool {
        self.last().is_some_and(|v| v != 0.0)
    }
}

impl Actuator for MockMotor {
    fn set(&mut self, value: f64) {
        self.calls.push(value);
    }
}

// ── Bench ─────────────────────────────────────────────────────

pub type BenchMotor = ProtectedMotor<MockMotor, SimAnalog, ManualClock>;

/// Control loop period used by every scenario.
pub const TICK_MS: u64 = 20;

/// Simulated current sensor and clock shared with the code under test.
pub struct Bench {
    pub amps: SimAnalog,
    pub clock: ManualClock,
}

#[allow(dead_code)]
impl Bench {
    pub fn new() -> Self {
        Self {
            amps: SimAnalog::new(0.0),
            clock: ManualClock::new(),
        }
    }

    /// Protected motor with the given limit (A) and window (s).
    pub fn motor(&self, limit: f64, secs: f64) -> BenchMotor {
        ProtectedMotor::new(
            MockMotor::new(),
            self.amps.clone(),
            self.clock.clone(),
            limit,
            secs,
        )
        .expect("valid protection parameters")
        .with_label("bench")
    }

    /// Hold `amps` for `ms`, running one control tick every [`TICK_MS`]
    /// and commanding `command` each tick.
    pub fn hold(&self, motor: &mut BenchMotor, amps: f64, ms: u64, command: f64) {
        self.amps.store(amps);
        let mut t = 0;
        while t <= ms {
            motor.update();
            motor.set(command);
            self.clock.advance_ms(TICK_MS);
            t += TICK_MS;
        }
    }
}
