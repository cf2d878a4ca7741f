//! Integration tests: motor protection scenarios.
//!
//! Drives a `ProtectedMotor` through stall, spike and override sequences
//! on simulated time and checks the commands that reach the motor.

use std::cell::Cell;
use std::rc::Rc;

use robotguard::config::{GuardConfig, ProtectionConfig};
use robotguard::safety::{MotorState, ProtectedMotor};
use robotguard::triggers::FilterState;

use crate::mock_hw::{Bench, MockMotor};

#[test]
fn stall_blacklists_and_zeroes_output() {
    let bench = Bench::new();
    let mut motor = bench.motor(10.0, 0.5);

    bench.hold(&mut motor, 12.0, 600, 0.9);

    assert_eq!(motor.state(), MotorState::Blacklisted);
    assert_eq!(motor.actuator().last(), Some(0.0));
    assert!(
        motor.actuator().calls.contains(&0.9),
        "motor ran before the window elapsed"
    );

    motor.set(5.0);
    assert_eq!(motor.actuator().last(), Some(0.0));
}

#[test]
fn short_spike_then_normal_load_does_not_trip() {
    let bench = Bench::new();
    let mut motor = bench.motor(10.0, 0.5);

    bench.hold(&mut motor, 12.0, 300, 0.9);
    bench.hold(&mut motor, 5.0, 2000, 0.9);

    assert_eq!(motor.state(), MotorState::Normal);
    assert_eq!(motor.monitor().state(), FilterState::Idle);
    assert!(motor.actuator().calls.iter().all(|&v| v == 0.9));
}

#[test]
fn blacklist_holds_until_manually_cleared() {
    let bench = Bench::new();
    let mut motor = bench.motor(10.0, 0.5);
    bench.hold(&mut motor, 12.0, 600, 1.0);
    assert!(motor.is_blacklisted());

    // Current is gone but nothing clears the blacklist automatically.
    bench.hold(&mut motor, 0.0, 5000, 1.0);
    assert!(motor.is_blacklisted());
    assert!(!motor.actuator().running());

    motor.clear_blacklist();
    motor.set(5.0);
    assert_eq!(motor.actuator().last(), Some(5.0));
}

#[test]
fn callback_runs_once_per_trip() {
    let bench = Bench::new();
    let trips = Rc::new(Cell::new(0u32));
    let counter = trips.clone();
    let mut motor = bench
        .motor(10.0, 0.5)
        .with_callback(move || counter.set(counter.get() + 1));

    bench.hold(&mut motor, 12.0, 2000, 1.0);
    assert_eq!(trips.get(), 1);

    // Clear, let the current drop, then stall again.
    motor.clear_blacklist();
    bench.hold(&mut motor, 0.0, 100, 1.0);
    bench.hold(&mut motor, 12.0, 600, 1.0);
    assert_eq!(trips.get(), 2);
}

#[test]
fn disabled_protection_never_trips_and_never_clears() {
    let bench = Bench::new();
    let mut motor = bench.motor(10.0, 0.5);

    motor.set_protection_enabled(false);
    bench.hold(&mut motor, 30.0, 3000, 0.7);
    assert_eq!(motor.state(), MotorState::Normal);
    assert_eq!(motor.actuator().last(), Some(0.7));

    motor.force_blacklist();
    motor.set(0.7);
    assert_eq!(motor.actuator().last(), Some(0.0));
    assert!(motor.is_blacklisted(), "disabled protection keeps the blacklist");
}

#[test]
fn monitor_window_resets_on_dip() {
    let bench = Bench::new();
    let mut motor = bench.motor(10.0, 0.5);

    for _ in 0..5 {
        bench.hold(&mut motor, 12.0, 400, 1.0);
        bench.hold(&mut motor, 8.0, 0, 1.0);
    }
    assert_eq!(motor.state(), MotorState::Normal);
}

#[test]
fn configured_motor_matches_file_settings() {
    let config = GuardConfig::from_json(
        r#"{
            "protection": {
                "current_limit_amps": 25.0,
                "overcurrent_time_secs": 0.2,
                "protection_enabled": true
            },
            "control_loop_interval_ms": 10
        }"#,
    )
    .expect("valid config");

    let bench = Bench::new();
    let mut motor = ProtectedMotor::from_config(
        MockMotor::new(),
        bench.amps.clone(),
        bench.clock.clone(),
        &config.protection,
    )
    .expect("valid protection config");

    bench.hold(&mut motor, 24.9, 1000, 1.0);
    assert!(!motor.is_blacklisted());
    bench.hold(&mut motor, 25.0, 200, 1.0);
    assert!(motor.is_blacklisted());
}

#[test]
fn protection_can_start_disabled_from_config() {
    let config = ProtectionConfig {
        protection_enabled: false,
        ..ProtectionConfig::default()
    };
    let bench = Bench::new();
    let mut motor = ProtectedMotor::from_config(
        MockMotor::new(),
        bench.amps.clone(),
        bench.clock.clone(),
        &config,
    )
    .expect("valid protection config");

    bench.hold(&mut motor, config.current_limit_amps * 2.0, 3000, 1.0);
    assert!(!motor.is_blacklisted());
    assert_eq!(motor.monitor().state(), FilterState::Confirmed);
}
