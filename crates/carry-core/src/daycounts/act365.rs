//! Actual/365 Fixed day count convention.
//!
//! The price engine's fractional discount exponent is measured on this basis.

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The denominator is always 365, leap years included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn basis(&self) -> u32 {
        365
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
