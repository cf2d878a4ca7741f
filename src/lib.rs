//! RobotGuard: reactive trigger framework and motor overcurrent protection.
//!
//! - [`triggers`]: sampled conditions, debounce and hysteresis filters,
//!   boolean combinators, analog axis and overcurrent monitors.
//! - [`safety`]: [`ProtectedMotor`](safety::ProtectedMotor), which
//!   blacklists a motor after a sustained overcurrent.
//! - [`ports`]: the traits through which the framework reaches clocks,
//!   sensors and actuators; [`adapters`] implements them.
//!
//! Everything is polled from a single control loop, once per tick.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod error;
pub mod ports;
pub mod safety;
pub mod triggers;

pub use error::{ConfigError, Result};
