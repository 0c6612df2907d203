//! # CLI Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in pactole                                │
//! │                                                                         │
//! │  loader.rs ──── LoadError ─────┐                                        │
//! │                                │                                        │
//! │  config.rs ──── ConfigError ───┼──► CliError ──► anyhow (main) ──► stderr│
//! │                                │                                        │
//! │  pactole-core ─ CoreError ─────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use pactole_core::{CoreError, Money};
use thiserror::Error;

/// Errors raised while reading an actions file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header matches none of the supported layouts.
    #[error("Unrecognised header {found:?}; expected name,price,profit or the French dataset columns")]
    UnknownLayout { found: Vec<String> },

    #[error("Line {line}: cannot read {column} value '{value}' as a number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Errors raised while building the effective configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// `compare` found two different optimal profits.
    #[error("Solvers disagree: dynamic programming found {dp}, brute force found {brute_force}")]
    SolverMismatch { dp: Money, brute_force: Money },
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LoadError::InvalidNumber {
            line: 4,
            column: "cost",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Line 4: cannot read cost value 'abc' as a number");

        let err = ConfigError::invalid("budget", "must not be negative");
        assert_eq!(err.to_string(), "Invalid value for budget: must not be negative");

        let err = CliError::SolverMismatch {
            dp: Money::from_cents(12000),
            brute_force: Money::from_cents(11990),
        };
        assert_eq!(
            err.to_string(),
            "Solvers disagree: dynamic programming found 120.00, brute force found 119.90"
        );
    }

    #[test]
    fn test_core_error_passes_through() {
        let err: CliError = CoreError::InvalidBudget(-1).into();
        assert_eq!(
            err.to_string(),
            "Invalid budget: -1 cents (budget must be zero or positive)"
        );
    }
}
