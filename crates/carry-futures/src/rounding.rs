//! Decimal rounding of `f64` results.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use carry_core::error::{CarryError, CarryResult};

/// Rounds `value` half-to-even at `decimals` places.
///
/// The exact binary value of the float is used, so a result like
/// `1.00495` that is stored just below the midpoint rounds down.
pub(crate) fn round_decimal(
    value: f64,
    decimals: u32,
    parameter: &'static str,
) -> CarryResult<Decimal> {
    let exact = Decimal::from_f64_retain(value).ok_or_else(|| {
        CarryError::invalid_parameter(parameter, format!("cannot represent {value} as a decimal"))
    })?;
    Ok(exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven))
}

/// Rounds `value` at `decimals` places and converts back to `f64`.
pub(crate) fn round_f64(value: f64, decimals: u32, parameter: &'static str) -> CarryResult<f64> {
    round_decimal(value, decimals, parameter)?
        .to_f64()
        .ok_or_else(|| CarryError::invalid_parameter(parameter, "rounded value out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_decimal() {
        assert_eq!(round_decimal(1.004_913_784_883, 4, "x").unwrap(), dec!(1.0049));
        assert_eq!(round_decimal(-4.126_523_024_741_147, 8, "x").unwrap(), dec!(-4.12652302));
    }

    #[test]
    fn test_half_even_on_exact_midpoint() {
        // 0.125 and 0.375 are exact in binary
        assert_eq!(round_decimal(0.125, 2, "x").unwrap(), dec!(0.12));
        assert_eq!(round_decimal(0.375, 2, "x").unwrap(), dec!(0.38));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(round_decimal(f64::NAN, 4, "x").is_err());
        assert!(round_f64(f64::INFINITY, 4, "x").is_err());
    }

    #[test]
    fn test_round_f64() {
        assert!((round_f64(0.992_51, 4, "x").unwrap() - 0.9925).abs() < 1e-12);
    }
}
