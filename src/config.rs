//! Tunable parameters for triggers and motor protection.
//!
//! Values can be loaded from JSON (robot config file, dashboard upload).
//! Every load is validated; invalid ranges are rejected, never clamped.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, duration_secs, finite, non_negative};
use crate::triggers::hysteresis::DEFAULT_VOLTAGE_BUFFER;

/// Overcurrent protection for one motor channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    /// Current (A) at or above which the overcurrent window starts.
    pub current_limit_amps: f64,
    /// Seconds of continuous overcurrent before the motor is blacklisted.
    pub overcurrent_time_secs: f64,
    /// Whether a confirmed overcurrent may blacklist the motor.
    pub protection_enabled: bool,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            current_limit_amps: 40.0, // matches a 40 A branch breaker
            overcurrent_time_secs: 1.0,
            protection_enabled: true,
        }
    }
}

impl ProtectionConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("current_limit", self.current_limit_amps)?;
        duration_secs("overcurrent_time", self.overcurrent_time_secs)?;
        Ok(())
    }
}

/// Low supply-voltage monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageMonitorConfig {
    /// Voltage below which the monitor latches.
    pub threshold_volts: f64,
    /// Extra voltage above the threshold required to release.
    pub buffer_volts: f64,
}

impl Default for VoltageMonitorConfig {
    fn default() -> Self {
        Self {
            threshold_volts: 7.0,
            buffer_volts: DEFAULT_VOLTAGE_BUFFER,
        }
    }
}

impl VoltageMonitorConfig {
    pub fn validate(&self) -> Result<()> {
        finite("threshold", self.threshold_volts)?;
        non_negative("buffer_width", self.buffer_volts)?;
        Ok(())
    }
}

/// Analog axis used as a button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisTriggerConfig {
    pub threshold: f64,
    /// Fire at or below the threshold instead of at or above.
    pub reverse: bool,
    /// Minimum hold time in seconds.
    pub min_time_secs: f64,
}

impl Default for AxisTriggerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            reverse: false,
            min_time_secs: 0.1,
        }
    }
}

impl AxisTriggerConfig {
    pub fn validate(&self) -> Result<()> {
        finite("threshold", self.threshold)?;
        duration_secs("required_duration", self.min_time_secs)?;
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub protection: ProtectionConfig,
    pub voltage: VoltageMonitorConfig,
    pub axis: AxisTriggerConfig,
    /// Control loop period (milliseconds); every trigger is polled once per loop.
    pub control_loop_interval_ms: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protection: ProtectionConfig::default(),
            voltage: VoltageMonitorConfig::default(),
            axis: AxisTriggerConfig::default(),
            control_loop_interval_ms: 20, // 50 Hz
        }
    }
}

impl GuardConfig {
    pub fn validate(&self) -> Result<()> {
        self.protection.validate()?;
        self.voltage.validate()?;
        self.axis.validate()?;
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::Zero {
                field: "control_loop_interval_ms",
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("config parse failed: {e}");
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialisation cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Control loop period in seconds.
    pub fn tick_secs(&self) -> f64 {
        f64::from(self.control_loop_interval_ms) / 1000.0
    }
}
