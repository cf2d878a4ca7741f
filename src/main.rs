//! RobotGuard bench simulator.
//!
//! Replays a motor stall against a [`ProtectedMotor`] on simulated time and
//! reports when the motor is blacklisted and when the supply browns out.
//!
//! ```text
//! robotguard-sim [config.json]
//! ```
//!
//! Without an argument the default [`GuardConfig`] is used.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};

use robotguard::adapters::sim::SimAnalog;
use robotguard::adapters::time::ManualClock;
use robotguard::config::GuardConfig;
use robotguard::ports::Clock;
use robotguard::safety::{MotorState, ProtectedMotor};
use robotguard::triggers::{Condition, VoltageMonitor};

/// Total simulated time (milliseconds).
const RUN_MS: u64 = 5000;
/// The stall begins here and lasts until the end of the run.
const STALL_AT_MS: u64 = 1000;
/// Battery model: open-circuit voltage and internal resistance.
const BATTERY_VOLTS: f64 = 12.6;
const BATTERY_OHMS: f64 = 0.1;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text =
                std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            GuardConfig::from_json(&text).with_context(|| format!("loading {path}"))?
        }
        None => GuardConfig::default(),
    };

    let clock = ManualClock::new();
    let amps = SimAnalog::new(0.0);
    let volts = SimAnalog::new(BATTERY_VOLTS);
    let output = Rc::new(Cell::new(0.0));
    let tripped_at = Rc::new(Cell::new(None));

    let motor_out = output.clone();
    let trip_clock = clock.clone();
    let trip_mark = tripped_at.clone();
    let mut motor = ProtectedMotor::from_config(
        move |v: f64| motor_out.set(v),
        amps.clone(),
        clock.clone(),
        &config.protection,
    )
    .context("building protected motor")?
    .with_label("sim-drive")
    .with_callback(move || trip_mark.set(Some(trip_clock.now())));

    let mut brownout =
        VoltageMonitor::from_config(volts.clone(), &config.voltage).context("building voltage monitor")?;

    let free_amps = config.protection.current_limit_amps * 0.25;
    let stall_amps = config.protection.current_limit_amps * 1.5;
    let tick_ms = u64::from(config.control_loop_interval_ms);

    println!(
        "limit {:.1} A for {:.2} s, stall at {:.1} A from t={} ms, tick {} ms",
        config.protection.current_limit_amps,
        config.protection.overcurrent_time_secs,
        stall_amps,
        STALL_AT_MS,
        tick_ms
    );

    let mut was_browned_out = false;
    let mut t = 0;
    while t <= RUN_MS {
        let stalled = t >= STALL_AT_MS;
        // A blacklisted motor draws nothing.
        let draw = match (motor.state(), stalled) {
            (MotorState::Blacklisted, _) => 0.0,
            (MotorState::Normal, true) => stall_amps,
            (MotorState::Normal, false) => free_amps,
        };
        amps.store(draw);
        volts.store(BATTERY_VOLTS - draw * BATTERY_OHMS);

        motor.update();
        motor.set(1.0);

        let browned_out = brownout.poll();
        if browned_out != was_browned_out {
            println!(
                "t={t:>5} ms  supply {:.2} V  brownout {}",
                volts.load(),
                if browned_out { "ON" } else { "off" }
            );
            was_browned_out = browned_out;
        }

        clock.advance_ms(tick_ms);
        t += tick_ms;
    }

    match tripped_at.get() {
        Some(at) => println!(
            "blacklisted at t={} ms ({} ms after stall), output now {:.2}",
            at.as_millis(),
            at.as_millis().saturating_sub(u128::from(STALL_AT_MS)),
            output.get()
        ),
        None => println!("never blacklisted, output {:.2}", output.get()),
    }

    Ok(())
}
