//! Tuning parameters for trip alignment.

use std::num::ParseIntError;

use thiserror::Error;

/// Default number of penalized elements the aligner may jump over.
const DEFAULT_LOOKAHEAD: usize = 3;

/// Configuration parameters for the aligner.
///
/// Scores always compare by net score first and by fewer unranked stops
/// second, so there is no weight to tune for unranked stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// How many scoring pattern elements the aligner may skip over when
    /// looking for a later match of an out-of-place stop.
    pub lookahead: usize,
}

/// A lookahead override that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid lookahead {value:?}: {source}")]
pub struct ConfigError {
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

impl SplitConfig {
    /// Create a new configuration with the given lookahead.
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// Build a configuration from an optional lookahead override.
    ///
    /// `None` keeps the default. Surrounding whitespace is ignored.
    pub fn with_lookahead_override(value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };
        let lookahead = value.trim().parse().map_err(|source| ConfigError {
            value: value.to_string(),
            source,
        })?;
        Ok(Self::new(lookahead))
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD)
    }
}
