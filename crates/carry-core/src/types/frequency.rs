//! Coupon payment frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CarryError, CarryResult};

/// Payment frequency for coupon bonds.
///
/// Only the frequencies deliverable government bonds actually use are
/// supported. The yield is compounded at the same frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - US Treasuries
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
        }
    }

    /// Returns the number of months per period (`12 / periods_per_year`).
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Periods per year as `f64`, for compounding formulas.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        f64::from(self.periods_per_year())
    }

    /// Builds a frequency from a number of payments per year.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` for anything other than 1, 2 or 4.
    pub fn from_periods(periods: u32) -> CarryResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            other => Err(CarryError::invalid_parameter(
                "frequency",
                format!("must be 1, 2 or 4 payments per year, got {other}"),
            )),
        }
    }
}

impl TryFrom<u32> for Frequency {
    type Error = CarryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_periods(value)
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> Self {
        freq.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
        };
        write!(f, "{name}")
    }
}
