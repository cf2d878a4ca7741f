//! Software overcurrent protection for a motor.
//!
//! [`ProtectedMotor`] wraps an [`Actuator`] together with an
//! [`OvercurrentMonitor`] on the same channel. Call [`update`] once per
//! control tick and [`set`] whenever the motor should move.
//!
//! ## Blacklist lifecycle
//!
//! 1. Current stays at/above the limit for the overcurrent window.
//! 2. On the tick the monitor becomes active, and only if protection is
//!    enabled, the motor is blacklisted: it is driven to zero and the
//!    optional callback runs once.
//! 3. While blacklisted every `set(v)` writes `0.0`, whatever `v` is and
//!    whether or not protection is still enabled.
//! 4. Only [`clear_blacklist`] leaves the blacklist. Nothing clears it
//!    automatically.
//!
//! Blacklisting happens on the monitor's activation edge. Re-enabling
//! protection, or clearing the blacklist, while an overcurrent is already
//! confirmed does not trip again until the current drops and a fresh
//! window is confirmed.
//!
//! [`update`]: ProtectedMotor::update
//! [`set`]: ProtectedMotor::set
//! [`clear_blacklist`]: ProtectedMotor::clear_blacklist

use log::{error, info, warn};

use crate::config::ProtectionConfig;
use crate::error::Result;
use crate::ports::{Actuator, AnalogSource, Clock};
use crate::triggers::{Condition, OvercurrentMonitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Normal,
    Blacklisted,
}

pub struct ProtectedMotor<A, S, K> {
    actuator: A,
    monitor: OvercurrentMonitor<S, K>,
    blacklisted: bool,
    protection_enabled: bool,
    /// Monitor output on the previous `update`, for edge detection.
    monitor_was_active: bool,
    on_blacklist: Option<Box<dyn FnMut()>>,
    label: &'static str,
}

impl<A: Actuator, S: AnalogSource, K: Clock> ProtectedMotor<A, S, K> {
    /// Protect `actuator` against drawing `current_limit` amps (read from
    /// `current`) for `overcurrent_time` seconds.
    pub fn new(
        actuator: A,
        current: S,
        clock: K,
        current_limit: f64,
        overcurrent_time: f64,
    ) -> Result<Self> {
        let monitor = OvercurrentMonitor::new(current, clock, current_limit, overcurrent_time)?;
        Ok(Self::with_monitor(actuator, monitor))
    }

    pub fn from_config(actuator: A, current: S, clock: K, config: &ProtectionConfig) -> Result<Self> {
        let monitor = OvercurrentMonitor::from_config(current, clock, config)?;
        let mut motor = Self::with_monitor(actuator, monitor);
        motor.protection_enabled = config.protection_enabled;
        Ok(motor)
    }

    /// Wrap `actuator` with an already-built monitor.
    pub fn with_monitor(actuator: A, monitor: OvercurrentMonitor<S, K>) -> Self {
        Self {
            actuator,
            monitor,
            blacklisted: false,
            protection_enabled: true,
            monitor_was_active: false,
            on_blacklist: None,
            label: "motor",
        }
    }

    /// Run `callback` once each time the monitor blacklists the motor.
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_blacklist = Some(Box::new(callback));
        self
    }

    /// Name used in log lines.
    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    // ── Control ───────────────────────────────────────────────

    /// Command the motor. Forwards `value` unchanged while normal, `0.0`
    /// while blacklisted.
    pub fn set(&mut self, value: f64) {
        if self.blacklisted {
            self.actuator.set(0.0);
        } else {
            self.actuator.set(value);
        }
    }

    /// Poll the overcurrent monitor. Call once per control tick.
    pub fn update(&mut self) -> MotorState {
        let active = self.monitor.poll();
        let rising = active && !self.monitor_was_active;
        self.monitor_was_active = active;

        if rising && self.protection_enabled && !self.blacklisted {
            error!(
                "{}: blacklisted after {:.2} A for {:?} (limit {:.2} A)",
                self.label,
                self.monitor.last_reading(),
                self.monitor.overcurrent_time(),
                self.monitor.current_limit()
            );
            self.blacklisted = true;
            self.actuator.set(0.0);
            if let Some(callback) = self.on_blacklist.as_mut() {
                callback();
            }
        }

        self.state()
    }

    // ── Blacklist ─────────────────────────────────────────────

    pub fn is_blacklisted(&self) -> bool {
        self.blacklisted
    }

    pub fn state(&self) -> MotorState {
        if self.blacklisted {
            MotorState::Blacklisted
        } else {
            MotorState::Normal
        }
    }

    /// Manual override; the only way out of the blacklist.
    pub fn clear_blacklist(&mut self) {
        if self.blacklisted {
            info!("{}: blacklist cleared", self.label);
        }
        self.blacklisted = false;
    }

    /// Blacklist the motor without waiting for the monitor. The callback
    /// is not run.
    pub fn force_blacklist(&mut self) {
        if !self.blacklisted {
            warn!("{}: blacklisted manually", self.label);
            self.blacklisted = true;
            self.actuator.set(0.0);
        }
    }

    // ── Protection switch ─────────────────────────────────────

    /// Allow or prevent future blacklisting. Does not clear an existing
    /// blacklist, and the monitor keeps tracking current either way.
    pub fn set_protection_enabled(&mut self, enabled: bool) {
        if enabled != self.protection_enabled {
            info!(
                "{}: overcurrent protection {}",
                self.label,
                if enabled { "enabled" } else { "disabled" }
            );
        }
        self.protection_enabled = enabled;
    }

    pub fn is_protection_enabled(&self) -> bool {
        self.protection_enabled
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn monitor(&self) -> &OvercurrentMonitor<S, K> {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut OvercurrentMonitor<S, K> {
        &mut self.monitor
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn into_inner(self) -> A {
        self.actuator
    }
}

impl<A: Actuator, S: AnalogSource, K: Clock> Actuator for ProtectedMotor<A, S, K> {
    fn set(&mut self, value: f64) {
        ProtectedMotor::set(self, value);
    }
}
