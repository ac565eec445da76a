//! Conversion factor and implied forward yield.

use log::debug;

use carry_bonds::pricing::clean_price;
use carry_bonds::yield_solver::YieldSolver;
use carry_bonds::{BondSpec, CouponSchedule};
use carry_core::error::{CarryError, CarryResult};
use carry_core::types::Date;

use crate::conventions::FuturesConventions;
use crate::rounding::round_f64;

/// Price quotation base the conversion factor is expressed against.
const PRICE_BASE: f64 = 100.0;

/// Conversion factor of a deliverable bond.
///
/// The clean price at the contract's reference yield, evaluated at `at`,
/// divided by 100 and rounded to `cf_decimals` places. The clean price is
/// in face units, so the factor scales with face and `futures_price × CF`
/// stays on the same scale as the bond's dirty price.
///
/// # Errors
///
/// Returns `CarryError::InvalidParameter` for invalid conventions or a
/// schedule that does not belong to the bond.
pub fn conversion_factor(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    at: Date,
    conventions: &FuturesConventions,
) -> CarryResult<f64> {
    conventions.validate()?;
    let clean = clean_price(bond, schedule, at, conventions.reference_yield)?;
    round_f64(
        clean / PRICE_BASE,
        conventions.cf_decimals,
        "conversion_factor",
    )
}

/// Yield implied by the futures price.
///
/// The forward price `futures_price × CF` (CF taken at settlement) is
/// inverted with the yield solver over the bond's whole tenor.
///
/// # Errors
///
/// Returns `CarryError::InvalidParameter` for a non-positive futures price
/// and propagates conversion factor and solver errors.
pub fn implied_forward_yield(
    bond: &BondSpec,
    schedule: &CouponSchedule,
    futures_price: f64,
    settlement: Date,
    conventions: &FuturesConventions,
    solver: &YieldSolver,
) -> CarryResult<f64> {
    check_futures_price(futures_price)?;

    let cf = conversion_factor(bond, schedule, settlement, conventions)?;
    let forward_price = futures_price * cf;
    let result = solver.solve_for_bond(bond, forward_price)?;

    debug!(
        "implied forward yield {:.8} from forward price {forward_price:.6} (cf {cf})",
        result.yield_value
    );
    Ok(result.yield_value)
}

pub(crate) fn check_futures_price(futures_price: f64) -> CarryResult<()> {
    if !futures_price.is_finite() || futures_price <= 0.0 {
        return Err(CarryError::invalid_parameter(
            "futures_price",
            format!("must be positive and finite, got {futures_price}"),
        ));
    }
    Ok(())
}
