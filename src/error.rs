//! Configuration error types.
//!
//! The simulation itself never fails: degenerate geometry collapses to zero
//! vectors. Everything that can go wrong happens while loading or validating
//! a [`GameConfig`](crate::GameConfig), and is reported through [`ConfigError`].

use std::fmt;

/// Errors raised while parsing or validating game configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a config.
    Parse(serde_json::Error),

    /// The config file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A value that must be strictly positive was zero or negative.
    NonPositive {
        /// Name of the field (for logging).
        field: &'static str,
        /// The value that was rejected.
        value: f64,
    },

    /// A `min`/`max` pair is inverted or empty.
    InvalidRange {
        /// Name of the range field.
        field: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// A per-frame decay factor outside `(0, 1]`.
    NotAFraction {
        /// Name of the field (for logging).
        field: &'static str,
        /// The value that was rejected.
        value: f64,
    },

    /// A shrink hit could take an enemy's radius to zero or below.
    ShrinkTooLarge {
        /// Smallest radius that still shrinks instead of being destroyed.
        split_threshold: f64,
        /// Radius removed by a shrink hit.
        shrink_amount: f64,
    },

    /// The enemy palette has no colors to choose from.
    EmptyPalette,

    /// A color string is not of the form `#RRGGBB`.
    InvalidColor {
        /// The offending string.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid config JSON: {}", err),
            ConfigError::Io { path, source } => {
                write!(f, "could not read config '{}': {}", path, source)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "'{}' must be positive, got {}", field, value)
            }
            ConfigError::InvalidRange { field, min, max } => write!(
                f,
                "'{}' range is invalid: min {} must be below max {}",
                field, min, max
            ),
            ConfigError::NotAFraction { field, value } => {
                write!(f, "'{}' must be in (0, 1], got {}", field, value)
            }
            ConfigError::ShrinkTooLarge {
                split_threshold,
                shrink_amount,
            } => write!(
                f,
                "shrink amount {} must be below the split threshold {}",
                shrink_amount, split_threshold
            ),
            ConfigError::EmptyPalette => write!(f, "enemy palette must contain at least one color"),
            ConfigError::InvalidColor { value } => {
                write!(f, "invalid color '{}', expected #RRGGBB", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConfigError::NonPositive {
            field: "missile_speed",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "'missile_speed' must be positive, got 0");

        let err = ConfigError::InvalidColor {
            value: "red".to_string(),
        };
        assert!(err.to_string().contains("#RRGGBB"));

        let err = ConfigError::NotAFraction {
            field: "particle_friction",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "'particle_friction' must be in (0, 1], got 1.5");

        let err = ConfigError::ShrinkTooLarge {
            split_threshold: 17.0,
            shrink_amount: 30.0,
        };
        assert_eq!(
            err.to_string(),
            "shrink amount 30 must be below the split threshold 17"
        );
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid config JSON"));
    }
}
