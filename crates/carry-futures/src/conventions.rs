//! Futures contract conventions.

use serde::{Deserialize, Serialize};

use carry_core::daycounts::DayCountBasis;
use carry_core::error::{CarryError, CarryResult};

/// Default notional yield for conversion factors (6%).
pub const DEFAULT_REFERENCE_YIELD: f64 = 0.06;

/// Default decimal places of the basis report.
pub const DEFAULT_REPORT_DECIMALS: u32 = 8;

/// Default decimal places of the conversion factor.
pub const DEFAULT_CF_DECIMALS: u32 = 4;

/// Conventions of a bond futures contract and its financing.
///
/// Every field has a serde default so partial configuration files work:
///
/// ```rust
/// use carry_futures::FuturesConventions;
///
/// let conventions: FuturesConventions = serde_json::from_str(r#"{"repo_basis": "act365"}"#).unwrap();
/// assert_eq!(conventions.repo_basis.basis(), 365);
/// assert_eq!(conventions.reference_yield, 0.06);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuturesConventions {
    /// Notional yield at which conversion factors are computed.
    #[serde(default = "default_reference_yield")]
    pub reference_yield: f64,
    /// Day count basis annualizing repo and financing cost.
    #[serde(default)]
    pub repo_basis: DayCountBasis,
    /// Decimal places of the rounded basis report.
    #[serde(default = "default_report_decimals")]
    pub report_decimals: u32,
    /// Decimal places the conversion factor is rounded to.
    #[serde(default = "default_cf_decimals")]
    pub cf_decimals: u32,
}

fn default_reference_yield() -> f64 {
    DEFAULT_REFERENCE_YIELD
}

fn default_report_decimals() -> u32 {
    DEFAULT_REPORT_DECIMALS
}

fn default_cf_decimals() -> u32 {
    DEFAULT_CF_DECIMALS
}

impl Default for FuturesConventions {
    fn default() -> Self {
        Self {
            reference_yield: DEFAULT_REFERENCE_YIELD,
            repo_basis: DayCountBasis::default(),
            report_decimals: DEFAULT_REPORT_DECIMALS,
            cf_decimals: DEFAULT_CF_DECIMALS,
        }
    }
}

impl FuturesConventions {
    /// Sets the conversion factor reference yield.
    #[must_use]
    pub fn with_reference_yield(mut self, reference_yield: f64) -> Self {
        self.reference_yield = reference_yield;
        self
    }

    /// Sets the repo day count basis.
    #[must_use]
    pub fn with_repo_basis(mut self, basis: DayCountBasis) -> Self {
        self.repo_basis = basis;
        self
    }

    /// Sets the report precision.
    #[must_use]
    pub fn with_report_decimals(mut self, decimals: u32) -> Self {
        self.report_decimals = decimals;
        self
    }

    /// Checks the conventions are usable.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` for a non-finite reference
    /// yield or a precision beyond what `Decimal` can hold.
    pub fn validate(&self) -> CarryResult<()> {
        if !self.reference_yield.is_finite() {
            return Err(CarryError::invalid_parameter(
                "reference_yield",
                format!("must be finite, got {}", self.reference_yield),
            ));
        }
        for (name, value) in [
            ("report_decimals", self.report_decimals),
            ("cf_decimals", self.cf_decimals),
        ] {
            if value > MAX_DECIMALS {
                return Err(CarryError::invalid_parameter(
                    name,
                    format!("must be at most {MAX_DECIMALS}, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Largest scale `rust_decimal` supports.
pub(crate) const MAX_DECIMALS: u32 = 28;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conventions = FuturesConventions::default();
        assert_eq!(conventions.reference_yield, 0.06);
        assert_eq!(conventions.repo_basis, DayCountBasis::Act360);
        assert_eq!(conventions.report_decimals, 8);
        assert_eq!(conventions.cf_decimals, 4);
        assert!(conventions.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let conventions: FuturesConventions = serde_json::from_str("{}").unwrap();
        assert_eq!(conventions, FuturesConventions::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let conventions = FuturesConventions::default().with_reference_yield(f64::NAN);
        assert!(conventions.validate().is_err());

        let conventions = FuturesConventions::default().with_report_decimals(40);
        assert!(matches!(
            conventions.validate(),
            Err(CarryError::InvalidParameter {
                parameter: "report_decimals",
                ..
            })
        ));
    }
}
