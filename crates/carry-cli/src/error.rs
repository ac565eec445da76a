//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Rate outside the accepted percentage range.
    #[error("Invalid {name}: {value}%. Must be between {min}% and {max}%.")]
    InvalidRate {
        /// Argument name.
        name: &'static str,
        /// Rejected value, in percent.
        value: f64,
        /// Lower bound, in percent.
        min: f64,
        /// Upper bound, in percent.
        max: f64,
    },

    /// Invalid price.
    #[error("Invalid {name}: {value}. Must be positive.")]
    InvalidPrice {
        /// Argument name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Explicit configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Configuration file could not be parsed or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
