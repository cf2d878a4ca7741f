//! Overcurrent monitor.
//!
//! A [`Debounce`] over `current >= limit`: active once a motor channel
//! has drawn at least `current_limit` amps continuously for
//! `overcurrent_time` seconds. The monitor owns no actuator;
//! [`ProtectedMotor`](crate::safety::ProtectedMotor) decides what an
//! activation means.
//!
//! ## States
//!
//! | State     | Meaning                                          |
//! |-----------|--------------------------------------------------|
//! | Idle      | current below limit                              |
//! | Pending   | at/above limit, window not yet elapsed           |
//! | Confirmed | at/above limit for at least `overcurrent_time`   |
//!
//! Dropping below the limit returns to Idle immediately and resets the
//! window. While disabled the monitor reports false and its timer is
//! frozen: it neither reads the source nor advances or resets the window.

use core::time::Duration;

use log::debug;

use super::debounce::{Debounce, FilterState};
use super::{Condition, at_or_above};
use crate::config::ProtectionConfig;
use crate::error::{Result, duration_secs, non_negative};
use crate::ports::{AnalogSource, Clock};

/// `current >= limit` on every poll.
pub struct CurrentExceeded<S> {
    source: S,
    limit: f64,
    last_reading: f64,
}

impl<S: AnalogSource> Condition for CurrentExceeded<S> {
    fn poll(&mut self) -> bool {
        self.last_reading = self.source.read();
        at_or_above(self.last_reading, self.limit)
    }
}

pub struct OvercurrentMonitor<S, K> {
    filter: Debounce<CurrentExceeded<S>, K>,
    enabled: bool,
}

impl<S: AnalogSource, K: Clock> OvercurrentMonitor<S, K> {
    /// `current_limit` in amps, `overcurrent_time` in seconds; both `>= 0`.
    pub fn new(source: S, clock: K, current_limit: f64, overcurrent_time: f64) -> Result<Self> {
        let limit = non_negative("current_limit", current_limit)?;
        let window = duration_secs("overcurrent_time", overcurrent_time)?;
        let raw = CurrentExceeded {
            source,
            limit,
            last_reading: 0.0,
        };
        Ok(Self {
            filter: Debounce::with_duration(raw, clock, window),
            enabled: true,
        })
    }

    pub fn from_config(source: S, clock: K, config: &ProtectionConfig) -> Result<Self> {
        Self::new(
            source,
            clock,
            config.current_limit_amps,
            config.overcurrent_time_secs,
        )
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> FilterState {
        self.filter.state()
    }

    pub fn current_limit(&self) -> f64 {
        self.filter.inner().limit
    }

    pub fn overcurrent_time(&self) -> Duration {
        self.filter.required()
    }

    /// Most recent current sample, in amps. `0.0` before the first poll.
    pub fn last_reading(&self) -> f64 {
        self.filter.inner().last_reading
    }
}

impl<S: AnalogSource, K: Clock> Condition for OvercurrentMonitor<S, K> {
    fn poll(&mut self) -> bool {
        if !self.enabled {
            return false;
        }

        let before = self.filter.state();
        let active = self.filter.poll();
        let after = self.filter.state();
        if before != after {
            debug!(
                "overcurrent {:?} -> {:?} at {:.2} A (limit {:.2} A)",
                before,
                after,
                self.last_reading(),
                self.current_limit()
            );
        }
        active
    }
}
