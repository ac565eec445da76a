//! Futures-side analytics bundled for one deliverable bond.

use serde::Serialize;

use carry_bonds::yield_solver::YieldSolver;
use carry_bonds::{BondSpec, CouponSchedule};
use carry_core::error::CarryResult;
use carry_core::types::Date;

use crate::conventions::FuturesConventions;
use crate::conversion::{conversion_factor, implied_forward_yield};
use crate::repo::{check_delivery, implied_repo_rate};

/// A futures contract seen from one deliverable bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuturesContext {
    /// Futures price (per 100 face).
    pub futures_price: f64,
    /// Delivery date.
    pub delivery: Date,
    /// Conversion factor at delivery.
    pub conversion_factor: f64,
    /// Implied repo rate from settlement to delivery.
    pub implied_repo_rate: f64,
    /// Yield implied by the futures price.
    pub implied_forward_yield: f64,
}

impl FuturesContext {
    /// Computes conversion factor, implied repo and implied forward yield.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidDateRange` if delivery is not after
    /// settlement, then propagates the errors of the individual calculations.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate(
        bond: &BondSpec,
        schedule: &CouponSchedule,
        futures_price: f64,
        settlement: Date,
        delivery: Date,
        ytm: f64,
        conventions: &FuturesConventions,
        solver: &YieldSolver,
    ) -> CarryResult<Self> {
        check_delivery(settlement, delivery)?;

        let conversion_factor = conversion_factor(bond, schedule, delivery, conventions)?;
        let implied_repo_rate = implied_repo_rate(
            bond,
            schedule,
            futures_price,
            settlement,
            delivery,
            ytm,
            conventions,
        )?;
        let implied_forward_yield = implied_forward_yield(
            bond,
            schedule,
            futures_price,
            settlement,
            conventions,
            solver,
        )?;

        Ok(Self {
            futures_price,
            delivery,
            conversion_factor,
            implied_repo_rate,
            implied_forward_yield,
        })
    }

    /// Invoice amount at delivery for a given accrued interest.
    #[must_use]
    pub fn invoice_price(&self, ai_delivery: f64) -> f64 {
        self.futures_price * self.conversion_factor + ai_delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use carry_core::error::CarryError;
    use carry_core::types::Frequency;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_evaluate_reference() {
        let bond = BondSpec::new(100.0, 0.04, Frequency::SemiAnnual, date(2026, 1, 1), 2).unwrap();
        let schedule = bond.schedule().unwrap();

        let ctx = FuturesContext::evaluate(
            &bond,
            &schedule,
            105.0,
            date(2025, 3, 15),
            date(2025, 10, 1),
            0.03,
            &FuturesConventions::default(),
            &YieldSolver::new(),
        )
        .unwrap();

        assert_relative_eq!(ctx.conversion_factor, 1.0049, epsilon = 1e-12);
        assert_relative_eq!(ctx.implied_repo_rate, 0.072_545_055_229_765_05, epsilon = 1e-9);
        assert_relative_eq!(ctx.implied_forward_yield, 0.018_449_528_408_378_4, epsilon = 1e-9);
        assert_relative_eq!(ctx.invoice_price(1.0), 105.0 * 1.0049 + 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_evaluate_rejects_bad_interval() {
        let bond = BondSpec::new(100.0, 0.04, Frequency::SemiAnnual, date(2026, 1, 1), 2).unwrap();
        let schedule = bond.schedule().unwrap();

        let result = FuturesContext::evaluate(
            &bond,
            &schedule,
            105.0,
            date(2025, 10, 1),
            date(2025, 10, 1),
            0.03,
            &FuturesConventions::default(),
            &YieldSolver::new(),
        );
        assert!(matches!(result, Err(CarryError::InvalidDateRange { .. })));
    }
}
