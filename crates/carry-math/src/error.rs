//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Division by zero or near-zero value.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// An iterate or function value became NaN or infinite.
    #[error("Non-finite value at iteration {iteration}: {value}")]
    NonFinite {
        /// Iteration at which the value appeared.
        iteration: u32,
        /// The offending value.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates a non-finite value error.
    #[must_use]
    pub fn non_finite(iteration: u32, value: f64) -> Self {
        Self::NonFinite { iteration, value }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Number of iterations consumed before the failure, where known.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        match self {
            Self::ConvergenceFailed { iterations, .. } => *iterations,
            Self::NonFinite { iteration, .. } => *iteration,
            Self::DivisionByZero { .. } | Self::InvalidInput { .. } => 0,
        }
    }

    /// Last residual reported with the failure, or NaN when none applies.
    #[must_use]
    pub fn residual(&self) -> f64 {
        match self {
            Self::ConvergenceFailed { residual, .. } => *residual,
            Self::NonFinite { value, .. } => *value,
            Self::DivisionByZero { .. } | Self::InvalidInput { .. } => f64::NAN,
        }
    }
}
