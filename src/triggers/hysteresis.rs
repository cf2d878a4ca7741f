//! Low-side latch with a release buffer.
//!
//! [`Hysteresis`] latches when a value drops below `threshold` and only
//! releases once it climbs back to `threshold + buffer`. Noise smaller
//! than the buffer cannot make the output chatter.
//!
//! ```text
//!   value ▲
//!         │ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ threshold + buffer  (release)
//!         │   latched stays true in here
//!         │ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ threshold           (trigger)
//!         └──────────────────────────▶ t
//! ```
//!
//! [`VoltageMonitor`] applies it to a supply-voltage source, with a
//! default 0.15 V buffer.

use log::debug;

use super::Condition;
use crate::config::VoltageMonitorConfig;
use crate::error::{Result, finite, non_negative};
use crate::ports::AnalogSource;

/// Default release buffer for battery-voltage monitoring, in volts.
pub const DEFAULT_VOLTAGE_BUFFER: f64 = 0.15;

#[derive(Debug, Clone)]
pub struct Hysteresis {
    threshold: f64,
    buffer: f64,
    latched: bool,
}

impl Hysteresis {
    /// Both parameters must be finite; `buffer_width` must be `>= 0`.
    pub fn new(threshold: f64, buffer_width: f64) -> Result<Self> {
        let threshold = finite("threshold", threshold)?;
        let buffer = non_negative("buffer_width", buffer_width)?;
        finite("threshold + buffer_width", threshold + buffer)?;
        Ok(Self {
            threshold,
            buffer,
            latched: false,
        })
    }

    /// Feed one sample. NaN never crosses either boundary, so it leaves the
    /// latch where it is.
    pub fn poll(&mut self, value: f64) -> bool {
        if self.latched {
            if value >= self.release_level() {
                debug!("hysteresis released at {value} (release {})", self.release_level());
                self.latched = false;
            }
        } else if value < self.threshold {
            debug!("hysteresis latched at {value} (threshold {})", self.threshold);
            self.latched = true;
        }
        self.latched
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn buffer_width(&self) -> f64 {
        self.buffer
    }

    /// Value at or above which a latched filter releases.
    pub fn release_level(&self) -> f64 {
        self.threshold + self.buffer
    }
}

/// Brown-out detector: active while the supply voltage is low.
pub struct VoltageMonitor<S> {
    source: S,
    filter: Hysteresis,
}

impl<S: AnalogSource> VoltageMonitor<S> {
    /// Monitor `source` against `threshold` with the default buffer.
    pub fn new(source: S, threshold: f64) -> Result<Self> {
        Self::with_buffer(source, threshold, DEFAULT_VOLTAGE_BUFFER)
    }

    pub fn with_buffer(source: S, threshold: f64, buffer_width: f64) -> Result<Self> {
        Ok(Self {
            source,
            filter: Hysteresis::new(threshold, buffer_width)?,
        })
    }

    pub fn from_config(source: S, config: &VoltageMonitorConfig) -> Result<Self> {
        Self::with_buffer(source, config.threshold_volts, config.buffer_volts)
    }

    pub fn filter(&self) -> &Hysteresis {
        &self.filter
    }
}

impl<S: AnalogSource> Condition for VoltageMonitor<S> {
    fn poll(&mut self) -> bool {
        let volts = self.source.read();
        self.filter.poll(volts)
    }
}
