//! Configuration validation shared by the application components.

use std::time::Duration;

/// Error returned when component configuration validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The named duration must be greater than zero
    ZeroDuration(&'static str),
    /// A probability outside `0.0..=1.0`
    InvalidProbability(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroDuration(name) => {
                write!(f, "{} must be greater than 0", name)
            }
            ConfigError::InvalidProbability(name) => {
                write!(f, "{} must be between 0.0 and 1.0", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reject zero durations.
pub(crate) fn non_zero(name: &'static str, duration: Duration) -> Result<Duration, ConfigError> {
    if duration.is_zero() {
        Err(ConfigError::ZeroDuration(name))
    } else {
        Ok(duration)
    }
}
