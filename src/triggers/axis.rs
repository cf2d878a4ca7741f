//! Analog axis trigger: a joystick axis (or any analog value) used as a
//! button.
//!
//! Active once the value has stayed at or beyond `threshold` for the
//! minimum hold time (default 100 ms). The hold time keeps a jittery
//! analog reading from firing the trigger over and over.

use core::time::Duration;

use super::debounce::{Debounce, FilterState};
use super::{Condition, at_or_above, at_or_below};
use crate::config::AxisTriggerConfig;
use crate::error::{Result, finite};
use crate::ports::{AnalogSource, Clock};

/// Default minimum hold time before an axis trigger activates.
pub const DEFAULT_MIN_TIME: Duration = Duration::from_millis(100);

/// Raw, unfiltered threshold comparison.
pub struct AxisThreshold<S> {
    source: S,
    threshold: f64,
    reverse: bool,
}

impl<S: AnalogSource> Condition for AxisThreshold<S> {
    fn poll(&mut self) -> bool {
        let value = self.source.read();
        if self.reverse {
            at_or_below(value, self.threshold)
        } else {
            at_or_above(value, self.threshold)
        }
    }
}

pub struct AxisTrigger<S, K> {
    filter: Debounce<AxisThreshold<S>, K>,
}

impl<S: AnalogSource, K: Clock> AxisTrigger<S, K> {
    /// Active while `value >= threshold`.
    pub fn new(source: S, clock: K, threshold: f64) -> Result<Self> {
        Self::build(source, clock, threshold, false)
    }

    /// Active while `value <= threshold`, e.g. an axis pushed the other way.
    pub fn reversed(source: S, clock: K, threshold: f64) -> Result<Self> {
        Self::build(source, clock, threshold, true)
    }

    pub fn from_config(source: S, clock: K, config: &AxisTriggerConfig) -> Result<Self> {
        let mut trigger = Self::build(source, clock, config.threshold, config.reverse)?;
        trigger.set_min_time_required(config.min_time_secs)?;
        Ok(trigger)
    }

    fn build(source: S, clock: K, threshold: f64, reverse: bool) -> Result<Self> {
        let threshold = finite("threshold", threshold)?;
        let raw = AxisThreshold {
            source,
            threshold,
            reverse,
        };
        Ok(Self {
            filter: Debounce::with_duration(raw, clock, DEFAULT_MIN_TIME),
        })
    }

    /// Change the minimum hold time, in seconds.
    pub fn set_min_time_required(&mut self, secs: f64) -> Result<()> {
        self.filter.set_required_duration(secs)
    }

    pub fn min_time_required(&self) -> Duration {
        self.filter.required()
    }

    pub fn threshold(&self) -> f64 {
        self.filter.inner().threshold
    }

    pub fn is_reversed(&self) -> bool {
        self.filter.inner().reverse
    }

    pub fn state(&self) -> FilterState {
        self.filter.state()
    }
}

impl<S: AnalogSource, K: Clock> Condition for AxisTrigger<S, K> {
    fn poll(&mut self) -> bool {
        self.filter.poll()
    }
}
