//! Clean price, accrued interest and dirty price from a yield.
//!
//! All functions take the schedule by reference so it is generated once per
//! bond and shared across calls.

use log::trace;
use serde::Serialize;

use carry_core::error::{CarryError, CarryResult};
use carry_core::types::Date;

use crate::bond::BondSpec;
use crate::discounting::FractionalPeriods;
use crate::schedule::CouponSchedule;

/// Accrued interest at a settlement date, with the period it was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccruedInterest {
    /// Accrued amount in the bond's face units.
    pub amount: f64,
    /// Coupon date (or accrual start) on or before settlement.
    pub last_coupon: Date,
    /// First coupon date after settlement.
    pub next_coupon: Date,
    /// Actual days from `last_coupon` to settlement.
    pub days_accrued: i64,
    /// Actual days from `last_coupon` to `next_coupon`.
    pub days_in_period: i64,
}

/// Prices for a bond at one settlement date and yield.
///
/// Invariant: `dirty_price == clean_price + accrued.amount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingQuote {
    /// Settlement date the prices refer to.
    pub settlement: Date,
    /// Yield the prices were computed at.
    pub yield_value: f64,
    /// Clean price.
    pub clean_price: f64,
    /// Accrued interest detail.
    pub accrued: AccruedInterest,
    /// Dirty (full) price.
    pub dirty_price: f64,
}

/// Present value of the remaining cash flows under fractional-period
/// discounting.
///
/// Only payment dates strictly after settlement are counted; the final
/// payment also redeems face. Settlement on or after maturity prices to 0.
///
/// # Errors
///
/// Returns `CarryError::InvalidParameter` if the yield is not finite or the
/// schedule does not belong to the bond.
pub fn clean_price(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    settlement: Date,
    ytm: f64,
) -> CarryResult<f64> {
    bond.check_schedule(schedule)?;
    if !ytm.is_finite() {
        return Err(CarryError::invalid_parameter(
            "yield",
            format!("must be finite, got {ytm}"),
        ));
    }

    let coupon = bond.coupon_payment();
    let maturity = schedule.maturity();
    let flows = schedule.remaining(settlement).map(|date| {
        if date == maturity {
            (date, coupon + bond.face_value())
        } else {
            (date, coupon)
        }
    });

    let pv = FractionalPeriods::new(bond.frequency()).present_value(flows, settlement, ytm);
    trace!("clean price at {settlement} for yield {ytm}: {pv}");
    Ok(pv)
}

/// Straight-line accrued interest within the coupon period containing
/// settlement.
///
/// `accrued = coupon × days_since_last / days_in_period`; zero on a coupon
/// date.
///
/// # Errors
///
/// Returns `CarryError::NoCouponFound` if settlement is outside the schedule
/// and `CarryError::InvalidParameter` on a schedule mismatch.
pub fn accrued_interest(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    settlement: Date,
) -> CarryResult<AccruedInterest> {
    bond.check_schedule(schedule)?;
    let (last_coupon, next_coupon) = schedule.period_containing(settlement)?;

    let days_accrued = last_coupon.days_between(&settlement);
    let days_in_period = last_coupon.days_between(&next_coupon);
    let amount = bond.coupon_payment() * days_accrued as f64 / days_in_period as f64;

    Ok(AccruedInterest {
        amount,
        last_coupon,
        next_coupon,
        days_accrued,
        days_in_period,
    })
}

/// Clean price plus accrued interest.
///
/// # Errors
///
/// Propagates errors from [`clean_price`] and [`accrued_interest`].
pub fn dirty_price(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    settlement: Date,
    ytm: f64,
) -> CarryResult<f64> {
    Ok(price(bond, schedule, settlement, ytm)?.dirty_price)
}

/// Full pricing quote for a settlement date and yield.
///
/// # Errors
///
/// Propagates errors from [`clean_price`] and [`accrued_interest`].
pub fn price(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    settlement: Date,
    ytm: f64,
) -> CarryResult<PricingQuote> {
    let clean = clean_price(bond, schedule, settlement, ytm)?;
    let accrued = accrued_interest(bond, schedule, settlement)?;

    Ok(PricingQuote {
        settlement,
        yield_value: ytm,
        clean_price: clean,
        accrued,
        dirty_price: clean + accrued.amount,
    })
}
