//! Coupon schedule generation.
//!
//! Schedules are generated backward from maturity with no stubs and no
//! business-day adjustment: every payment date is maturity shifted back a
//! whole number of coupon periods.
//!
//! # Example
//!
//! ```rust
//! use carry_bonds::schedule::generate_schedule;
//! use carry_core::types::{Date, Frequency};
//!
//! let maturity = Date::from_ymd(2026, 1, 1).unwrap();
//! let schedule = generate_schedule(maturity, Frequency::SemiAnnual, 2).unwrap();
//!
//! assert_eq!(schedule.len(), 4);
//! assert_eq!(schedule.maturity(), maturity);
//! assert_eq!(schedule.accrual_start(), Date::from_ymd(2024, 1, 1).unwrap());
//! ```

use serde::Serialize;

use carry_core::error::{CarryError, CarryResult};
use carry_core::types::{Date, Frequency};

/// An ordered set of coupon payment dates ending at maturity.
///
/// Invariants:
/// - `dates` is strictly ascending and non-empty
/// - the last date is the maturity date
/// - `accrual_start` is one period before the first payment date
/// - if maturity is the last day of its month, so is every date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponSchedule {
    dates: Vec<Date>,
    accrual_start: Date,
    frequency: Frequency,
    end_of_month: bool,
}

/// Generates the coupon schedule for a bond.
///
/// Produces `tenor_years × frequency` payment dates spaced `12 / frequency`
/// months apart, the last equal to `maturity`. The `k`-th date before
/// maturity is `maturity - k × months`, clamped to the month length. When
/// maturity falls on a month end every date is rolled to its month end.
///
/// # Errors
///
/// Returns `CarryError::InvalidParameter` if `tenor_years` is zero, and
/// `CarryError::InvalidDate` if a date would leave the calendar range.
pub fn generate_schedule(
    maturity: Date,
    frequency: Frequency,
    tenor_years: u32,
) -> CarryResult<CouponSchedule> {
    if tenor_years == 0 {
        return Err(CarryError::invalid_parameter(
            "tenor_years",
            "must be at least one year",
        ));
    }

    let months = frequency.months_per_period() as i32;
    let count = tenor_years * frequency.periods_per_year();
    let end_of_month = maturity.is_end_of_month();

    let roll = |periods_back: u32| -> CarryResult<Date> {
        let date = maturity.add_months(-(periods_back as i32) * months)?;
        Ok(if end_of_month { date.end_of_month() } else { date })
    };

    let dates = (0..count)
        .rev()
        .map(roll)
        .collect::<CarryResult<Vec<_>>>()?;
    let accrual_start = roll(count)?;

    Ok(CouponSchedule {
        dates,
        accrual_start,
        frequency,
        end_of_month,
    })
}

impl CouponSchedule {
    /// Returns the payment dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns an iterator over the payment dates.
    pub fn iter(&self) -> impl Iterator<Item = &Date> + '_ {
        self.dates.iter()
    }

    /// Number of scheduled payments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a generated schedule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Final payment date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// First payment date.
    #[must_use]
    pub fn first_coupon(&self) -> Date {
        self.dates[0]
    }

    /// Start of the first accrual period.
    #[must_use]
    pub fn accrual_start(&self) -> Date {
        self.accrual_start
    }

    /// Payment frequency the schedule was generated with.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Whether the dates follow the end-of-month rule.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.end_of_month
    }

    /// Returns an iterator over the accrual periods `(start, end)`,
    /// beginning with `(accrual_start, first_coupon)`.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        std::iter::once(self.accrual_start)
            .chain(self.dates.iter().copied())
            .zip(self.dates.iter().copied())
    }

    /// Finds the accrual period containing `settlement`.
    ///
    /// Returns `(last, next)` with `last <= settlement < next`. The last
    /// coupon of the first period is the accrual start.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::NoCouponFound` if settlement is before the
    /// accrual start or on/after maturity.
    pub fn period_containing(&self, settlement: Date) -> CarryResult<(Date, Date)> {
        if settlement < self.accrual_start || settlement >= self.maturity() {
            return Err(CarryError::no_coupon_found(
                settlement,
                self.accrual_start,
                self.maturity(),
            ));
        }

        let next_idx = self.dates.partition_point(|d| *d <= settlement);
        let next = self.dates[next_idx];
        let last = if next_idx == 0 {
            self.accrual_start
        } else {
            self.dates[next_idx - 1]
        };
        Ok((last, next))
    }

    /// Payment dates strictly after `settlement`.
    pub fn remaining(&self, settlement: Date) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied().filter(move |d| *d > settlement)
    }

    /// Payment dates in the half-open window `(start, end]`.
    pub fn coupons_between(&self, start: Date, end: Date) -> impl Iterator<Item = Date> + '_ {
        self.dates
            .iter()
            .copied()
            .filter(move |d| *d > start && *d <= end)
    }
}

impl<'a> IntoIterator for &'a CouponSchedule {
    type Item = &'a Date;
    type IntoIter = std::slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}
