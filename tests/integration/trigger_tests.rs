//! Integration tests: composed trigger graphs.
//!
//! Builds trigger trees the way a robot's control loop would (axis
//! buttons, brown-out detection, an operator interlock) and steps them on
//! simulated time.

use robotguard::adapters::sim::SimAnalog;
use robotguard::adapters::time::ManualClock;
use robotguard::config::GuardConfig;
use robotguard::triggers::{
    All, Any, AxisTrigger, Condition, ConditionExt, Constant, OvercurrentMonitor, SharedFlag,
    VoltageMonitor, from_fn,
};

use crate::mock_hw::TICK_MS;

/// Poll `cond` once per tick for `ms`; returns the final output.
fn step(cond: &mut impl Condition, clock: &ManualClock, ms: u64) -> bool {
    let mut out = cond.poll();
    let mut t = 0;
    while t < ms {
        clock.advance_ms(TICK_MS);
        t += TICK_MS;
        out = cond.poll();
    }
    out
}

#[test]
fn interlocked_axis_button() {
    let clock = ManualClock::new();
    let stick = SimAnalog::new(0.0);
    let armed = SharedFlag::new(false);

    let mut fire = All::default()
        .with(AxisTrigger::new(stick.clone(), clock.clone(), 0.5).expect("finite threshold"))
        .with(Constant(true).gated(armed.clone()));

    stick.store(0.9);
    assert!(!step(&mut fire, &clock, 200), "interlock not armed");

    armed.set(true);
    assert!(step(&mut fire, &clock, 0), "axis already held past its minimum time");

    stick.store(0.4);
    assert!(!step(&mut fire, &clock, 0));
    stick.store(0.9);
    assert!(!step(&mut fire, &clock, 60));
    assert!(step(&mut fire, &clock, 40));
}

#[test]
fn any_fault_trips_with_stateful_children() {
    let clock = ManualClock::new();
    let amps = SimAnalog::new(0.0);
    let volts = SimAnalog::new(12.0);

    let mut fault = Any::default()
        .with(OvercurrentMonitor::new(amps.clone(), clock.clone(), 20.0, 0.25).expect("valid"))
        .with(VoltageMonitor::new(volts.clone(), 7.0).expect("valid"));

    assert!(!step(&mut fault, &clock, 100));

    // The voltage child is already latched when the overcurrent child
    // starts its window; the window must still run on every tick.
    volts.store(6.9);
    amps.store(25.0);
    assert!(step(&mut fault, &clock, 100));

    volts.store(7.1);
    assert!(step(&mut fault, &clock, 0), "7.1 V is inside the release buffer");
    volts.store(7.2);
    assert!(!step(&mut fault, &clock, 0), "released, overcurrent still pending");
    assert!(step(&mut fault, &clock, 160), "overcurrent window completes");
}

#[test]
fn debounced_group_sees_every_tick() {
    let clock = ManualClock::new();
    let a = SharedFlag::new(false);
    let b = SharedFlag::new(false);

    let ra = a.clone();
    let rb = b.clone();
    let mut both = All::default()
        .with(from_fn(move || ra.get()).debounced(clock.clone(), 0.1).expect("valid"))
        .with(from_fn(move || rb.get()).debounced(clock.clone(), 0.1).expect("valid"));

    // `a` is false, so a short-circuiting group would never poll `b`'s
    // filter; its window must start anyway.
    b.set(true);
    step(&mut both, &clock, 100);
    a.set(true);
    assert!(!step(&mut both, &clock, 0));
    assert!(step(&mut both, &clock, 100));
}

#[test]
fn trigger_graph_from_config() {
    let config = GuardConfig::from_json(
        r#"{ "axis": { "threshold": -0.5, "reverse": true, "min_time_secs": 0.04 },
             "voltage": { "threshold_volts": 10.5, "buffer_volts": 0.5 } }"#,
    )
    .expect("valid config");

    let clock = ManualClock::new();
    let stick = SimAnalog::new(0.0);
    let volts = SimAnalog::new(12.0);
    let mut axis = AxisTrigger::from_config(stick.clone(), clock.clone(), &config.axis)
        .expect("valid axis config");
    let mut brownout =
        VoltageMonitor::from_config(volts.clone(), &config.voltage).expect("valid voltage config");

    stick.store(-0.8);
    assert!(!step(&mut axis, &clock, 20));
    assert!(step(&mut axis, &clock, 20));

    volts.store(10.4);
    assert!(brownout.poll());
    volts.store(10.9);
    assert!(brownout.poll());
    volts.store(11.0);
    assert!(!brownout.poll());
}
