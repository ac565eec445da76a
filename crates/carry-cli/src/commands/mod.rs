//! CLI command implementations.

pub mod basis;
pub mod config;
pub mod demo;
pub mod futures;
pub mod price;
pub mod schedule;
pub mod yield_;

pub use basis::BasisArgs;
pub use config::ConfigArgs;
pub use demo::DemoArgs;
pub use futures::FuturesArgs;
pub use price::PriceArgs;
pub use schedule::ScheduleArgs;
pub use yield_::YieldArgs;

use clap::Args;
use tracing::debug;

use carry_bonds::{BondSpec, CouponSchedule};
use carry_core::types::{Date, Frequency};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Bond terms shared by the pricing commands.
#[derive(Args, Debug, Clone)]
pub struct BondArgs {
    /// Annual coupon rate (as percentage, e.g., 4.0 for 4%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Tenor in whole years. Defaults to the shortest tenor covering settlement.
    #[arg(short, long)]
    pub tenor: Option<u32>,

    /// Face value. Defaults to the configured face value.
    #[arg(long)]
    pub face: Option<f64>,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly
    #[arg(long)]
    pub frequency: Option<u32>,
}

impl BondArgs {
    /// Builds the bond and its schedule.
    ///
    /// Without `--tenor`, the tenor is the shortest one whose schedule
    /// accrues on `settlement`.
    pub fn build(
        &self,
        config: &AppConfig,
        settlement: Date,
    ) -> anyhow::Result<(BondSpec, CouponSchedule)> {
        let coupon = validate_rate("coupon", self.coupon, 0.0, 100.0)?;
        let maturity = parse_date(&self.maturity)?;
        let frequency = resolve_frequency(self.frequency, config)?;
        let face = validate_price("face", self.face.unwrap_or(config.bond.face_value))?;

        let builder = BondSpec::builder()
            .face_value(face)
            .coupon_rate(coupon / 100.0)
            .frequency(frequency)
            .maturity(maturity);
        let builder = match self.tenor {
            Some(years) => builder.tenor_years(years),
            None => builder.tenor_covering(settlement),
        };

        let bond = builder.build()?;
        debug!(
            tenor = bond.tenor_years(),
            frequency = %bond.frequency(),
            "bond built"
        );
        let schedule = bond.schedule()?;
        Ok((bond, schedule))
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
///
/// This is the only place the wall clock is read.
pub fn settlement_or_today(s: Option<&str>) -> CliResult<Date> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(Date::from(chrono::Local::now().date_naive())),
    }
}

/// Frequency from a flag, falling back to the configured default.
pub fn resolve_frequency(flag: Option<u32>, config: &AppConfig) -> anyhow::Result<Frequency> {
    match flag {
        Some(periods) => Ok(Frequency::from_periods(periods)?),
        None => Ok(config.bond.frequency),
    }
}

/// Validates a percentage rate against `[min, max]`.
pub fn validate_rate(name: &'static str, value: f64, min: f64, max: f64) -> CliResult<f64> {
    if !value.is_finite() || !(min..=max).contains(&value) {
        return Err(CliError::InvalidRate {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Validates a yield or repo rate given in percent.
pub fn validate_yield(name: &'static str, value: f64) -> CliResult<f64> {
    validate_rate(name, value, -10.0, 100.0)
}

/// Validates a price value.
pub fn validate_price(name: &'static str, value: f64) -> CliResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CliError::InvalidPrice { name, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-15").unwrap(),
            Date::from_ymd(2025, 3, 15).unwrap()
        );
        assert!(matches!(parse_date("15/03/2025"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_validators() {
        assert!(validate_rate("coupon", 4.0, 0.0, 100.0).is_ok());
        assert!(validate_rate("coupon", -1.0, 0.0, 100.0).is_err());
        assert!(validate_yield("yield", f64::NAN).is_err());
        assert!(validate_price("price", 0.0).is_err());
        assert!(validate_price("price", 101.5).is_ok());
    }

    #[test]
    fn test_bond_args_tenor_covering() {
        let args = BondArgs {
            coupon: 4.0,
            maturity: "2026-01-01".to_string(),
            tenor: None,
            face: None,
            frequency: None,
        };
        let settlement = Date::from_ymd(2025, 3, 15).unwrap();
        let (bond, schedule) = args.build(&AppConfig::default(), settlement).unwrap();

        assert_eq!(bond.tenor_years(), 1);
        assert_eq!(bond.coupon_rate(), 0.04);
        assert_eq!(schedule.len(), 2);
        assert!(schedule.accrual_start() <= settlement);
    }
}
