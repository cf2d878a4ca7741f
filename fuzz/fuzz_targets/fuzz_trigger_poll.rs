//! Fuzz target: trigger polling with hostile samples
//!
//! Interprets the input as a stream of `(f64 sample, u16 step_ms)` records
//! and feeds them to an overcurrent-protected motor and a voltage monitor.
//! Samples include NaN, infinities and subnormals.
//!
//! Invariants checked:
//! - No panics under any sample or timing sequence
//! - A blacklisted motor never forwards a non-zero command
//! - NaN never latches the voltage monitor
//!
//! cargo fuzz run fuzz_trigger_poll

#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use robotguard::adapters::sim::SimAnalog;
use robotguard::adapters::time::ManualClock;
use robotguard::safety::ProtectedMotor;
use robotguard::triggers::{Condition, VoltageMonitor};

const RECORD: usize = 10;

fuzz_target!(|data: &[u8]| {
    let amps = SimAnalog::new(0.0);
    let volts = SimAnalog::new(12.0);
    let clock = ManualClock::new();
    let out = Rc::new(Cell::new(0.0));
    let sink = out.clone();

    let Ok(mut motor) =
        ProtectedMotor::new(move |v: f64| sink.set(v), amps.clone(), clock.clone(), 10.0, 0.05)
    else {
        return;
    };
    let Ok(mut brownout) = VoltageMonitor::new(volts.clone(), 7.0) else {
        return;
    };

    for record in data.chunks_exact(RECORD) {
        let sample = f64::from_le_bytes(record[..8].try_into().unwrap());
        let step = u16::from_le_bytes(record[8..].try_into().unwrap());

        amps.store(sample);
        volts.store(sample);
        clock.advance_ms(u64::from(step));

        let was_latched = brownout.filter().is_latched();
        let latched = brownout.poll();
        if sample.is_nan() {
            assert_eq!(latched, was_latched, "NaN moved the voltage latch");
        }

        motor.update();
        motor.set(sample);
        if motor.is_blacklisted() {
            assert_eq!(out.get(), 0.0, "blacklisted motor forwarded a command");
        }
    }
});
