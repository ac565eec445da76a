//! Day count conventions.
//!
//! Only the two actual-day conventions the basis engine needs are provided:
//!
//! - [`Act365Fixed`]: the time measure inside the fractional-period discount
//!   exponent of the price engine
//! - [`Act360`]: the repo convention used to annualize financing cost and
//!   the implied repo rate
//!
//! Accrued interest does not go through a [`DayCount`]; it is straight-line
//! actual/actual within the coupon period.
//!
//! ```rust
//! use carry_core::daycounts::{DayCount, DayCountBasis};
//! use carry_core::types::Date;
//!
//! let dc = DayCountBasis::Act360.to_day_count();
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(dc.year_fraction(start, end), 0.25);
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CarryError;
use crate::types::Date;

/// Trait for day count conventions.
pub trait DayCount: Send + Sync {
    /// Market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Days-per-year denominator.
    fn basis(&self) -> u32;

    /// Number of days between two dates under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Fraction of a year between two dates. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / f64::from(self.basis())
    }
}

/// Runtime selection of an annualization basis.
///
/// Serialized as `"act360"` / `"act365"` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCountBasis {
    /// Actual/360 - repo and money market
    #[default]
    Act360,
    /// Actual/365 Fixed
    #[serde(alias = "act365fixed")]
    Act365,
}

impl DayCountBasis {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountBasis::Act360 => Box::new(Act360),
            DayCountBasis::Act365 => Box::new(Act365Fixed),
        }
    }

    /// Days-per-year denominator.
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountBasis::Act360 => 360,
            DayCountBasis::Act365 => 365,
        }
    }

    /// Market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountBasis::Act360 => "ACT/360",
            DayCountBasis::Act365 => "ACT/365F",
        }
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountBasis {
    type Err = CarryError;

    /// Accepts "ACT/360", "act360", "360", "ACT/365", "ACT/365F", "365", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" | "360" => Ok(DayCountBasis::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365" | "ACT365FIXED"
            | "365" => Ok(DayCountBasis::Act365),
            _ => Err(CarryError::invalid_parameter(
                "day_count_basis",
                format!("unknown day count basis '{s}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_values() {
        assert_eq!(DayCountBasis::Act360.basis(), 360);
        assert_eq!(DayCountBasis::Act365.basis(), 365);
        assert_eq!(DayCountBasis::default(), DayCountBasis::Act360);
    }

    #[test]
    fn test_boxed_matches_enum() {
        for basis in [DayCountBasis::Act360, DayCountBasis::Act365] {
            let dc = basis.to_day_count();
            assert_eq!(dc.basis(), basis.basis());
            assert_eq!(dc.name(), basis.name());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("ACT/360".parse::<DayCountBasis>().unwrap(), DayCountBasis::Act360);
        assert_eq!("act/365f".parse::<DayCountBasis>().unwrap(), DayCountBasis::Act365);
        assert_eq!("365".parse::<DayCountBasis>().unwrap(), DayCountBasis::Act365);
        assert!("30/360".parse::<DayCountBasis>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&DayCountBasis::Act365).unwrap();
        assert_eq!(json, "\"act365\"");
        let parsed: DayCountBasis = serde_json::from_str("\"act360\"").unwrap();
        assert_eq!(parsed, DayCountBasis::Act360);
    }
}
