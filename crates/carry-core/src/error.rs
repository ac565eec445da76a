//! Error types for the Carry library.
//!
//! Every calculation in the workspace reports failure through [`CarryError`].
//! An error always means the inputs were outside the domain of a formula;
//! nothing here is transient.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for Carry operations.
pub type CarryResult<T> = Result<T, CarryError>;

/// The error type for all pricing, yield and basis calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarryError {
    /// Settlement falls outside the coupon schedule, so there is no
    /// last/next coupon pair to accrue between.
    #[error("No coupon period covers settlement {settlement} (schedule covers {accrual_start} to {maturity})")]
    NoCouponFound {
        /// The settlement date that was looked up.
        settlement: Date,
        /// Start of the first accrual period in the schedule.
        accrual_start: Date,
        /// Final scheduled payment date.
        maturity: Date,
    },

    /// The yield solver exhausted its iteration budget or diverged.
    #[error("Yield solver failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last absolute residual seen by the solver.
        residual: f64,
    },

    /// A time interval used as an annualization denominator is not positive.
    #[error("Invalid date range: {end} must be strictly after {start}")]
    InvalidDateRange {
        /// Start of the interval (settlement).
        start: Date,
        /// End of the interval (delivery).
        end: Date,
    },

    /// A numeric or structural parameter is outside its valid domain.
    #[error("Invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A calendar date could not be constructed or parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl CarryError {
    /// Creates a no-coupon-found error.
    #[must_use]
    pub fn no_coupon_found(settlement: Date, accrual_start: Date, maturity: Date) -> Self {
        Self::NoCouponFound {
            settlement,
            accrual_start,
            maturity,
        }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_date_range(start: Date, end: Date) -> Self {
        Self::InvalidDateRange { start, end }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
