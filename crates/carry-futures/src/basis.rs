//! Gross basis, net basis, carry and basis net of carry.
//!
//! Everything here works on unrounded `f64` values. Rounding happens once,
//! when a [`BasisBreakdown`] is turned into a [`BasisReport`].

use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use carry_bonds::pricing::{accrued_interest, price};
use carry_bonds::{BondSpec, CouponSchedule};
use carry_core::error::{CarryError, CarryResult};
use carry_core::types::Date;

use crate::conventions::{FuturesConventions, MAX_DECIMALS};
use crate::conversion::{check_futures_price, conversion_factor};
use crate::repo::{check_delivery, check_dirty_price};
use crate::rounding::round_decimal;

/// Gross basis on the clean price: `clean - F × CF`.
#[must_use]
pub fn gross_basis_clean(clean_price_today: f64, futures_price: f64, conversion_factor: f64) -> f64 {
    clean_price_today - futures_price * conversion_factor
}

/// Gross basis on the dirty price: `dirty - F × CF`.
#[must_use]
pub fn gross_basis_dirty(dirty_price_today: f64, futures_price: f64, conversion_factor: f64) -> f64 {
    dirty_price_today - futures_price * conversion_factor
}

/// Net basis against the invoice price: `dirty - (F × CF + AI_delivery)`.
#[must_use]
pub fn net_basis(
    dirty_price_today: f64,
    futures_price: f64,
    conversion_factor: f64,
    ai_delivery: f64,
) -> f64 {
    dirty_price_today - (futures_price * conversion_factor + ai_delivery)
}

/// Income carry from settlement to delivery, with no roll-down.
///
/// `carry = (AI_delivery - AI_today) + coupons - repo × dirty_today × days / basis`
///
/// Coupons are those paid in `(settlement, delivery]`, excluding the
/// maturity payment.
///
/// # Errors
///
/// - `CarryError::InvalidDateRange` if delivery is not after settlement
/// - `CarryError::NoCouponFound` if either date is outside the schedule
/// - `CarryError::InvalidParameter` for a non-finite repo rate or dirty price
#[allow(clippy::too_many_arguments)]
pub fn carry_to_delivery(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    settlement: Date,
    delivery: Date,
    repo_rate: f64,
    dirty_today: f64,
    conventions: &FuturesConventions,
) -> CarryResult<f64> {
    check_delivery(settlement, delivery)?;
    check_repo_rate(repo_rate)?;
    check_dirty_price(dirty_today)?;

    let ai_today = accrued_interest(bond, schedule, settlement)?.amount;
    let ai_delivery = accrued_interest(bond, schedule, delivery)?.amount;

    let maturity = schedule.maturity();
    let coupons_received: f64 = schedule
        .coupons_between(settlement, delivery)
        .filter(|d| *d != maturity)
        .map(|_| bond.coupon_payment())
        .sum();

    let financing_cost = repo_rate
        * dirty_today
        * conventions
            .repo_basis
            .to_day_count()
            .year_fraction(settlement, delivery);

    Ok((ai_delivery - ai_today) + coupons_received - financing_cost)
}

/// Unrounded basis analytics for one bond against one futures contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasisBreakdown {
    /// Futures price the analysis was run against.
    pub futures_price: f64,
    /// Clean price at settlement.
    pub clean_today: f64,
    /// Dirty price at settlement.
    pub dirty_today: f64,
    /// Conversion factor at delivery.
    pub conversion_factor: f64,
    /// Accrued interest at delivery.
    pub ai_delivery: f64,
    /// Net basis at settlement.
    pub net_basis_today: f64,
    /// Carry from settlement to delivery.
    pub carry_to_delivery: f64,
    /// `net_basis_today - carry_to_delivery`.
    pub basis_net_of_carry: f64,
}

impl BasisBreakdown {
    /// Gross basis on today's clean price.
    #[must_use]
    pub fn gross_basis_clean(&self) -> f64 {
        gross_basis_clean(self.clean_today, self.futures_price, self.conversion_factor)
    }

    /// Gross basis on today's dirty price.
    #[must_use]
    pub fn gross_basis_dirty(&self) -> f64 {
        gross_basis_dirty(self.dirty_today, self.futures_price, self.conversion_factor)
    }

    /// Rounds every figure to `decimals` places.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` if `decimals` exceeds what
    /// `Decimal` supports or a figure is not finite.
    pub fn report(&self, decimals: u32) -> CarryResult<BasisReport> {
        if decimals > MAX_DECIMALS {
            return Err(CarryError::invalid_parameter(
                "report_decimals",
                format!("must be at most {MAX_DECIMALS}, got {decimals}"),
            ));
        }

        Ok(BasisReport {
            clean_today: round_decimal(self.clean_today, decimals, "clean_today")?,
            dirty_today: round_decimal(self.dirty_today, decimals, "dirty_today")?,
            conversion_factor: round_decimal(self.conversion_factor, decimals, "conversion_factor")?,
            ai_delivery: round_decimal(self.ai_delivery, decimals, "ai_delivery")?,
            net_basis_today: round_decimal(self.net_basis_today, decimals, "net_basis_today")?,
            carry_to_delivery: round_decimal(self.carry_to_delivery, decimals, "carry_to_delivery")?,
            basis_net_of_carry: round_decimal(
                self.basis_net_of_carry,
                decimals,
                "basis_net_of_carry",
            )?,
        })
    }
}

/// Basis analytics rounded for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasisReport {
    /// Clean price at settlement.
    pub clean_today: Decimal,
    /// Dirty price at settlement.
    pub dirty_today: Decimal,
    /// Conversion factor at delivery.
    pub conversion_factor: Decimal,
    /// Accrued interest at delivery.
    pub ai_delivery: Decimal,
    /// Net basis at settlement.
    pub net_basis_today: Decimal,
    /// Carry from settlement to delivery.
    pub carry_to_delivery: Decimal,
    /// Net basis less carry.
    pub basis_net_of_carry: Decimal,
}

impl BasisReport {
    /// Figures as `(name, value)` pairs in report order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Decimal); 7] {
        [
            ("clean_today", self.clean_today),
            ("dirty_today", self.dirty_today),
            ("conversion_factor", self.conversion_factor),
            ("ai_delivery", self.ai_delivery),
            ("net_basis_today", self.net_basis_today),
            ("carry_to_delivery", self.carry_to_delivery),
            ("basis_net_of_carry", self.basis_net_of_carry),
        ]
    }
}

/// Net basis, carry and basis net of carry for a bond held to delivery.
///
/// Today's prices come from `ytm`; CF and accrued interest are taken at
/// delivery; carry is financed at `repo_rate`.
///
/// # Errors
///
/// - `CarryError::InvalidDateRange` if delivery is not after settlement
///   (checked before anything else)
/// - `CarryError::NoCouponFound` if either date is outside the schedule
/// - `CarryError::InvalidParameter` for invalid prices, rates or conventions
#[allow(clippy::too_many_arguments)]
pub fn basis_net_of_carry(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    futures_price: f64,
    settlement: Date,
    delivery: Date,
    ytm: f64,
    repo_rate: f64,
    conventions: &FuturesConventions,
) -> CarryResult<BasisBreakdown> {
    check_delivery(settlement, delivery)?;
    check_futures_price(futures_price)?;

    let quote = price(bond, schedule, settlement, ytm)?;
    let cf = conversion_factor(bond, schedule, delivery, conventions)?;
    let ai_delivery = accrued_interest(bond, schedule, delivery)?.amount;

    let net_basis_today = net_basis(quote.dirty_price, futures_price, cf, ai_delivery);
    let carry = carry_to_delivery(
        bond,
        schedule,
        settlement,
        delivery,
        repo_rate,
        quote.dirty_price,
        conventions,
    )?;

    debug!(
        "basis {settlement} -> {delivery}: net {net_basis_today:.8}, carry {carry:.8}, cf {cf}"
    );

    Ok(BasisBreakdown {
        futures_price,
        clean_today: quote.clean_price,
        dirty_today: quote.dirty_price,
        conversion_factor: cf,
        ai_delivery,
        net_basis_today,
        carry_to_delivery: carry,
        basis_net_of_carry: net_basis_today - carry,
    })
}

fn check_repo_rate(repo_rate: f64) -> CarryResult<()> {
    if !repo_rate.is_finite() {
        return Err(CarryError::invalid_parameter(
            "repo_rate",
            format!("must be finite, got {repo_rate}"),
        ));
    }
    Ok(())
}
