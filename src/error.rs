//! Configuration error types and the shared parameter validators.
//!
//! Runtime polling never fails, so the only fallible operations in the
//! crate are constructors and setters that take numeric parameters.
//! Every one of them funnels into [`ConfigError`]; nothing is clamped.

use core::fmt;
use core::time::Duration;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A numeric parameter was rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The parameter must be zero or positive.
    Negative { field: &'static str, value: f64 },
    /// The parameter is NaN or infinite.
    NotFinite { field: &'static str },
    /// The parameter must be strictly positive.
    Zero { field: &'static str },
    /// The parameter does not fit in a [`Duration`].
    OutOfRange { field: &'static str },
    /// A serialised configuration could not be decoded.
    Corrupted,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::NotFinite { field } => write!(f, "{field} must be a finite number"),
            Self::Zero { field } => write!(f, "{field} must be greater than zero"),
            Self::OutOfRange { field } => write!(f, "{field} is too large to represent"),
            Self::Corrupted => write!(f, "configuration corrupted"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Reject NaN and infinities.
pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

/// Reject NaN, infinities and negative values.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(value)
}

/// Convert a duration given in seconds, rejecting anything that is not a
/// representable, non-negative span.
pub(crate) fn duration_secs(field: &'static str, secs: f64) -> Result<Duration> {
    let secs = non_negative(field, secs)?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::OutOfRange { field })
}
