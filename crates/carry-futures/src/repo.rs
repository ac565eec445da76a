//! Implied repo rate.

use log::debug;

use carry_bonds::pricing::{accrued_interest, dirty_price};
use carry_bonds::{BondSpec, CouponSchedule};
use carry_core::error::{CarryError, CarryResult};
use carry_core::types::Date;

use crate::conventions::FuturesConventions;
use crate::conversion::{check_futures_price, conversion_factor};

/// Annualized return from buying the bond today and delivering it.
///
/// `IRR = (F × CF + AI_delivery - dirty_today) / dirty_today × basis / days`
///
/// CF and accrued interest are taken at delivery; today's dirty price comes
/// from `ytm`. The basis is the repo day count (360 by default).
///
/// # Errors
///
/// - `CarryError::InvalidDateRange` if delivery is not after settlement
///   (checked before anything else)
/// - `CarryError::NoCouponFound` if either date is outside the schedule
/// - `CarryError::InvalidParameter` for invalid prices or conventions
#[allow(clippy::too_many_arguments)]
pub fn implied_repo_rate(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    futures_price: f64,
    settlement: Date,
    delivery: Date,
    ytm: f64,
    conventions: &FuturesConventions,
) -> CarryResult<f64> {
    let days = check_delivery(settlement, delivery)?;
    check_futures_price(futures_price)?;

    let cf = conversion_factor(bond, schedule, delivery, conventions)?;
    let ai_delivery = accrued_interest(bond, schedule, delivery)?.amount;
    let dirty_today = dirty_price(bond, schedule, settlement, ytm)?;
    check_dirty_price(dirty_today)?;

    let invoice = futures_price * cf + ai_delivery;
    let year_fraction = conventions.repo_basis.to_day_count().year_fraction(settlement, delivery);
    let irr = (invoice - dirty_today) / dirty_today / year_fraction;

    debug!(
        "implied repo {irr:.8}: invoice {invoice:.6} vs dirty {dirty_today:.6} over {days} days ({})",
        conventions.repo_basis
    );
    Ok(irr)
}

/// Days from settlement to delivery, which must be positive.
pub(crate) fn check_delivery(settlement: Date, delivery: Date) -> CarryResult<i64> {
    let days = settlement.days_between(&delivery);
    if days <= 0 {
        return Err(CarryError::invalid_date_range(settlement, delivery));
    }
    Ok(days)
}

pub(crate) fn check_dirty_price(dirty: f64) -> CarryResult<()> {
    if !dirty.is_finite() || dirty <= 0.0 {
        return Err(CarryError::invalid_parameter(
            "dirty_price",
            format!("must be positive and finite, got {dirty}"),
        ));
    }
    Ok(())
}
