//! Fixed coupon bond definition.

use serde::Serialize;

use carry_core::error::{CarryError, CarryResult};
use carry_core::types::{Date, Frequency};

use crate::schedule::{generate_schedule, CouponSchedule};

/// Default face value.
pub const DEFAULT_FACE_VALUE: f64 = 100.0;

/// Longest tenor `tenor_covering` will search.
const MAX_TENOR_YEARS: u32 = 100;

/// A plain fixed-rate bullet bond.
///
/// The tenor is stored alongside the maturity so the coupon schedule is
/// always derived from a single source via [`BondSpec::schedule`].
///
/// # Example
///
/// ```rust
/// use carry_bonds::BondSpec;
/// use carry_core::types::{Date, Frequency};
///
/// let bond = BondSpec::builder()
///     .coupon_rate(0.04)
///     .maturity(Date::from_ymd(2026, 1, 1).unwrap())
///     .tenor_years(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(bond.coupon_payment(), 2.0);
/// assert_eq!(bond.frequency(), Frequency::SemiAnnual);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondSpec {
    face_value: f64,
    coupon_rate: f64,
    frequency: Frequency,
    maturity: Date,
    tenor_years: u32,
}

impl BondSpec {
    /// Creates a bond, validating every field.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` if the face value is not
    /// positive, the coupon rate is negative or not finite, or the tenor is
    /// zero.
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        frequency: Frequency,
        maturity: Date,
        tenor_years: u32,
    ) -> CarryResult<Self> {
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(CarryError::invalid_parameter(
                "face_value",
                format!("must be positive, got {face_value}"),
            ));
        }
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(CarryError::invalid_parameter(
                "coupon_rate",
                format!("must be finite and non-negative, got {coupon_rate}"),
            ));
        }
        if tenor_years == 0 {
            return Err(CarryError::invalid_parameter(
                "tenor_years",
                "must be at least one year",
            ));
        }

        Ok(Self {
            face_value,
            coupon_rate,
            frequency,
            maturity,
            tenor_years,
        })
    }

    /// Creates a builder with face 100 and semi-annual coupons.
    #[must_use]
    pub fn builder() -> BondSpecBuilder {
        BondSpecBuilder::default()
    }

    /// Face (redemption) value.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Tenor in whole years.
    #[must_use]
    pub fn tenor_years(&self) -> u32 {
        self.tenor_years
    }

    /// Cash amount of one coupon: `face × rate / frequency`.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.face_value * self.coupon_rate / self.frequency.as_f64()
    }

    /// Total number of coupon payments.
    #[must_use]
    pub fn coupon_count(&self) -> u32 {
        self.tenor_years * self.frequency.periods_per_year()
    }

    /// Returns true if the bond pays no coupon.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0
    }

    /// Generates the bond's coupon schedule.
    ///
    /// # Errors
    ///
    /// Propagates schedule generation errors.
    pub fn schedule(&self) -> CarryResult<CouponSchedule> {
        generate_schedule(self.maturity, self.frequency, self.tenor_years)
    }

    /// Checks that `schedule` belongs to this bond.
    ///
    /// Maturity, frequency and payment count must all agree, so a schedule
    /// generated for a shorter tenor is rejected.
    pub(crate) fn check_schedule(&self, schedule: &CouponSchedule) -> CarryResult<()> {
        if schedule.maturity() != self.maturity
            || schedule.frequency() != self.frequency
            || schedule.len() != self.coupon_count() as usize
        {
            return Err(CarryError::invalid_parameter(
                "schedule",
                format!(
                    "schedule ({} {}, {} payments) does not match bond ({} {}, {} payments)",
                    schedule.maturity(),
                    schedule.frequency(),
                    schedule.len(),
                    self.maturity,
                    self.frequency,
                    self.coupon_count()
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for [`BondSpec`].
#[derive(Debug, Clone)]
pub struct BondSpecBuilder {
    face_value: f64,
    coupon_rate: Option<f64>,
    frequency: Frequency,
    maturity: Option<Date>,
    tenor: TenorSource,
}

#[derive(Debug, Clone, Copy)]
enum TenorSource {
    Unset,
    Years(u32),
    Covering(Date),
}

impl Default for BondSpecBuilder {
    fn default() -> Self {
        Self {
            face_value: DEFAULT_FACE_VALUE,
            coupon_rate: None,
            frequency: Frequency::default(),
            maturity: None,
            tenor: TenorSource::Unset,
        }
    }
}

impl BondSpecBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = face_value;
        self
    }

    /// Sets the annual coupon rate (decimal).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, maturity: Date) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the tenor in whole years.
    #[must_use]
    pub fn tenor_years(mut self, years: u32) -> Self {
        self.tenor = TenorSource::Years(years);
        self
    }

    /// Uses the shortest whole-year tenor whose schedule accrues on
    /// `settlement`.
    #[must_use]
    pub fn tenor_covering(mut self, settlement: Date) -> Self {
        self.tenor = TenorSource::Covering(settlement);
        self
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` if the coupon rate, maturity or
    /// tenor is missing or invalid, and `CarryError::InvalidDateRange` if a
    /// covering tenor is requested for a settlement on or after maturity.
    pub fn build(self) -> CarryResult<BondSpec> {
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| CarryError::invalid_parameter("coupon_rate", "is required"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| CarryError::invalid_parameter("maturity", "is required"))?;

        let tenor_years = match self.tenor {
            TenorSource::Unset => {
                return Err(CarryError::invalid_parameter("tenor_years", "is required"));
            }
            TenorSource::Years(years) => years,
            TenorSource::Covering(settlement) => {
                covering_tenor(maturity, self.frequency, settlement)?
            }
        };

        BondSpec::new(
            self.face_value,
            coupon_rate,
            self.frequency,
            maturity,
            tenor_years,
        )
    }
}

fn covering_tenor(maturity: Date, frequency: Frequency, settlement: Date) -> CarryResult<u32> {
    if settlement >= maturity {
        return Err(CarryError::invalid_date_range(settlement, maturity));
    }

    for years in 1..=MAX_TENOR_YEARS {
        let schedule = generate_schedule(maturity, frequency, years)?;
        if schedule.accrual_start() <= settlement {
            return Ok(years);
        }
    }

    Err(CarryError::invalid_parameter(
        "tenor_years",
        format!("settlement {settlement} is more than {MAX_TENOR_YEARS} years before maturity"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let bond = BondSpec::builder()
            .coupon_rate(0.04)
            .maturity(date(2026, 1, 1))
            .tenor_years(2)
            .build()
            .unwrap();

        assert_eq!(bond.face_value(), 100.0);
        assert_eq!(bond.frequency(), Frequency::SemiAnnual);
        assert_eq!(bond.coupon_count(), 4);
        assert_eq!(bond.schedule().unwrap().len(), 4);
    }

    #[test]
    fn test_invalid_fields() {
        let maturity = date(2026, 1, 1);
        assert!(BondSpec::new(0.0, 0.04, Frequency::Annual, maturity, 2).is_err());
        assert!(BondSpec::new(100.0, -0.01, Frequency::Annual, maturity, 2).is_err());
        assert!(BondSpec::new(100.0, f64::NAN, Frequency::Annual, maturity, 2).is_err());
        assert!(BondSpec::new(100.0, 0.04, Frequency::Annual, maturity, 0).is_err());
    }

    #[test]
    fn test_missing_fields() {
        let result = BondSpec::builder().maturity(date(2026, 1, 1)).tenor_years(2).build();
        assert!(matches!(
            result,
            Err(CarryError::InvalidParameter {
                parameter: "coupon_rate",
                ..
            })
        ));

        let result = BondSpec::builder().coupon_rate(0.04).maturity(date(2026, 1, 1)).build();
        assert!(matches!(
            result,
            Err(CarryError::InvalidParameter {
                parameter: "tenor_years",
                ..
            })
        ));
    }

    #[test]
    fn test_tenor_covering() {
        let builder = BondSpec::builder().coupon_rate(0.04).maturity(date(2026, 1, 1));

        // 2024-01-01 is exactly the accrual start of a 2-year schedule
        let bond = builder.clone().tenor_covering(date(2024, 1, 1)).build().unwrap();
        assert_eq!(bond.tenor_years(), 2);

        let bond = builder.clone().tenor_covering(date(2023, 12, 31)).build().unwrap();
        assert_eq!(bond.tenor_years(), 3);

        let bond = builder.clone().tenor_covering(date(2025, 10, 1)).build().unwrap();
        assert_eq!(bond.tenor_years(), 1);

        let result = builder.tenor_covering(date(2026, 1, 1)).build();
        assert!(matches!(result, Err(CarryError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_zero_coupon() {
        let bond = BondSpec::new(100.0, 0.0, Frequency::Annual, date(2030, 6, 15), 5).unwrap();
        assert!(bond.is_zero_coupon());
        assert_eq!(bond.coupon_payment(), 0.0);
    }
}
