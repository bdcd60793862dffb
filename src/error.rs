//! Configuration errors
//!
//! The physics core itself never fails; only loading tuning files does.

use core::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed into a config
    Parse(serde_json::Error),
    /// A value that must be strictly positive was not
    NonPositive { field: &'static str, value: f64 },
    /// A value fell outside its allowed range
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be > 0 (got {value})")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be in [{min}, {max}] (got {value})"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
