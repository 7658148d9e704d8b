//! Error taxonomy for the statistics engine.

use thiserror::Error;

/// Errors reported by the computational core.
///
/// Every fallible operation returns one of these synchronously; nothing
/// inside the engine is retried or swallowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("sample size must be at least 1, got {0}")]
    InvalidSampleSize(usize),

    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("confidence level must be in (0, 100], got {0}")]
    InvalidConfidenceLevel(f64),

    #[error("significance level must be in (0, 1], got {0}")]
    InvalidSignificanceLevel(f64),

    #[error("invalid null hypothesis {0:?}: expected \"Mean = <value>\"")]
    InvalidNullHypothesis(String),

    #[error("unknown test type {0:?}")]
    InvalidTestType(String),

    #[error("insufficient samples for a t-test: need at least {needed}, got {got}")]
    InsufficientSamples { needed: usize, got: usize },

    #[error("unknown population {0:?}")]
    UnknownPopulation(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors raised while loading a [`crate::config::LabConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] StatsError),
}

/// Errors raised while writing CSV exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Fails with [`StatsError::InsufficientData`] unless `got >= needed`.
pub(crate) fn require_len(got: usize, needed: usize) -> Result<()> {
    if got < needed {
        Err(StatsError::InsufficientData { needed, got })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_len() {
        assert!(require_len(3, 3).is_ok());
        assert_eq!(
            require_len(1, 2),
            Err(StatsError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_messages() {
        let e = StatsError::InvalidConfidenceLevel(120.0);
        assert_eq!(e.to_string(), "confidence level must be in (0, 100], got 120");
        let e = StatsError::InvalidTestType("sideways".into());
        assert_eq!(e.to_string(), "unknown test type \"sideways\"");
    }
}
