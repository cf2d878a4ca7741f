//! `embedded-hal` 1.0 adapters.
//!
//! - [`DigitalInput`] turns any [`InputPin`] (limit switch, beam break,
//!   button) into a [`Condition`].
//! - [`PwmMotor`] drives an H-bridge from a PWM channel plus a direction
//!   pin, exposing it as an [`Actuator`].
//!
//! HAL errors never escape: the input keeps its last good level and the
//! motor keeps its last good command, with a warning logged.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::ports::Actuator;
use crate::triggers::Condition;

// ───────────────────────────────────────────────────────────────
// Digital input
// ───────────────────────────────────────────────────────────────

pub struct DigitalInput<P> {
    pin: P,
    active_low: bool,
    last: bool,
}

impl<P: InputPin> DigitalInput<P> {
    /// Active when the pin reads high.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            last: false,
        }
    }

    /// Active when the pin reads low (switch to ground with pull-up).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            last: false,
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Condition for DigitalInput<P> {
    fn poll(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => self.last = high != self.active_low,
            Err(e) => warn!("digital input read failed ({e:?}), holding {}", self.last),
        }
        self.last
    }
}

// ───────────────────────────────────────────────────────────────
// PWM motor
// ───────────────────────────────────────────────────────────────

/// Sign-magnitude motor drive.
///
/// `set(v)` clamps `v` to `-1.0..=1.0`; the magnitude becomes the duty
/// cycle and the sign selects the direction pin level (high = forward).
/// NaN stops the motor.
pub struct PwmMotor<P, D> {
    pwm: P,
    dir: D,
    command: f64,
}

impl<P: SetDutyCycle, D: OutputPin> PwmMotor<P, D> {
    pub fn new(pwm: P, dir: D) -> Self {
        Self {
            pwm,
            dir,
            command: 0.0,
        }
    }

    /// Last command successfully written to the hardware.
    pub fn command(&self) -> f64 {
        self.command
    }

    pub fn release(self) -> (P, D) {
        (self.pwm, self.dir)
    }

    fn duty_for(&self, magnitude: f64) -> u16 {
        let max = self.pwm.max_duty_cycle();
        (magnitude * f64::from(max)).round().min(f64::from(max)) as u16
    }
}

impl<P: SetDutyCycle, D: OutputPin> Actuator for PwmMotor<P, D> {
    fn set(&mut self, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };

        let dir_result = if value < 0.0 {
            self.dir.set_low()
        } else {
            self.dir.set_high()
        };
        if let Err(e) = dir_result {
            warn!("motor direction write failed ({e:?}), holding {}", self.command);
            return;
        }

        let duty = self.duty_for(value.abs());
        if let Err(e) = self.pwm.set_duty_cycle(duty) {
            warn!("motor duty write failed ({e:?}), holding {}", self.command);
            return;
        }
        self.command = value;
    }
}
