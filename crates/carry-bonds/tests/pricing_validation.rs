//! Validation against independently computed reference values.
//!
//! Bond: 4% semi-annual coupon, maturity 2026-01-01, 2-year tenor, face 100.
//! Reference figures were computed by hand from the closed-form formulas.

use approx::assert_relative_eq;

use carry_bonds::prelude::*;
use carry_core::error::CarryError;
use carry_core::types::{Date, Frequency};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn reference_bond() -> BondSpec {
    BondSpec::builder()
        .coupon_rate(0.04)
        .maturity(date(2026, 1, 1))
        .tenor_years(2)
        .build()
        .unwrap()
}

// =============================================================================
// SCHEDULE
// =============================================================================

#[test]
fn schedule_for_reference_bond() {
    let schedule = reference_bond().schedule().unwrap();
    assert_eq!(
        schedule.dates(),
        &[
            date(2024, 7, 1),
            date(2025, 1, 1),
            date(2025, 7, 1),
            date(2026, 1, 1)
        ]
    );
}

#[test]
fn schedule_shared_across_calls() {
    let bond = reference_bond();
    let schedule = bond.schedule().unwrap();

    let settlements = [date(2024, 2, 1), date(2024, 12, 31), date(2025, 8, 15)];
    for settlement in settlements {
        let quote = price(&bond, &schedule, settlement, 0.035).unwrap();
        assert!(quote.clean_price > 0.0);
        assert!(quote.accrued.amount >= 0.0);
    }
}

// =============================================================================
// PRICE ENGINE
// =============================================================================

#[test]
fn full_quote_mid_period() {
    let bond = reference_bond();
    let schedule = bond.schedule().unwrap();
    let quote = price(&bond, &schedule, date(2025, 3, 15), 0.03).unwrap();

    assert_relative_eq!(quote.clean_price, 101.581_347_141_004_7, epsilon = 1e-9);
    assert_relative_eq!(quote.accrued.amount, 0.806_629_834_254_143_7, epsilon = 1e-12);
    assert_relative_eq!(quote.dirty_price, 102.387_976_975_258_84, epsilon = 1e-9);
    assert_eq!(quote.accrued.days_accrued, 73);
}

#[test]
fn conversion_yield_price_at_delivery() {
    // Clean price at 6% on 2025-10-01, the basis for the conversion factor
    let bond = reference_bond();
    let schedule = bond.schedule().unwrap();
    let clean = clean_price(&bond, &schedule, date(2025, 10, 1), 0.06).unwrap();
    assert_relative_eq!(clean, 100.491_378_488_352_61, epsilon = 1e-9);
}

#[test]
fn zero_coupon_bond() {
    let bond = BondSpec::new(100.0, 0.0, Frequency::SemiAnnual, date(2035, 6, 30), 10).unwrap();
    let schedule = bond.schedule().unwrap();
    let settlement = date(2025, 6, 30);

    let quote = price(&bond, &schedule, settlement, 0.045).unwrap();
    assert_eq!(quote.accrued.amount, 0.0);
    assert_eq!(quote.clean_price, quote.dirty_price);

    // 3652 days to maturity
    let expected = 100.0 / 1.0225_f64.powf(3652.0 / 365.0 * 2.0);
    assert_relative_eq!(quote.clean_price, expected, epsilon = 1e-10);
}

#[test]
fn settlement_outside_schedule() {
    let bond = reference_bond();
    let schedule = bond.schedule().unwrap();

    let err = accrued_interest(&bond, &schedule, date(2023, 12, 1)).unwrap_err();
    assert!(matches!(err, CarryError::NoCouponFound { .. }));

    // The quote needs accrued interest, so it fails too
    assert!(price(&bond, &schedule, date(2026, 3, 1), 0.03).is_err());
}

// =============================================================================
// YIELD SOLVER
// =============================================================================

#[test]
fn whole_period_reference_price() {
    let price = whole_period_price(0.03, 2.0, 0.04, 100.0, Frequency::SemiAnnual).unwrap();
    assert!((price - 101.93).abs() < 0.005);
}

#[test]
fn yield_from_dirty_price() {
    // The dirty price from the fractional engine inverted on whole periods
    let bond = reference_bond();
    let schedule = bond.schedule().unwrap();
    let dirty = dirty_price(&bond, &schedule, date(2025, 3, 15), 0.03).unwrap();

    let result = YieldSolver::new().solve_for_bond(&bond, dirty).unwrap();
    assert!(result.yield_value > 0.0 && result.yield_value < 0.03);
    assert!(result.iterations <= 10);
}

#[test]
fn fractional_and_whole_periods_differ() {
    // Same bond, same yield, one full tenor before maturity
    let bond = reference_bond();
    let schedule = bond.schedule().unwrap();
    let fractional = clean_price(&bond, &schedule, date(2024, 1, 1), 0.03).unwrap();
    let whole = whole_period_price(0.03, 2.0, 0.04, 100.0, Frequency::SemiAnnual).unwrap();

    assert!((fractional - whole).abs() > 1e-6);
}
