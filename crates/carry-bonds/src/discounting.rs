//! Discounting conventions.
//!
//! Two conventions coexist and are never interchangeable:
//!
//! - [`FractionalPeriods`]: date-based. A cash flow paid `d` days after
//!   settlement is discounted by `(1 + y/f)^-(d/365 × f)`. Used for clean
//!   price, conversion factor and everything priced off a settlement date.
//! - [`WholePeriods`]: count-based. Flows fall on integer periods
//!   `t = 1..n` with `n = floor(tenor × f)`. Used only by the yield solver.
//!
//! A price computed with one convention and inverted with the other does not
//! round-trip.

use carry_core::daycounts::{Act365Fixed, DayCount};
use carry_core::error::{CarryError, CarryResult};
use carry_core::types::{Date, Frequency};

/// Date-based discounting with a fractional actual/365 exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionalPeriods {
    frequency: Frequency,
}

impl FractionalPeriods {
    /// Creates the convention for a compounding frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    /// Number of (fractional) compounding periods from settlement to payment.
    #[must_use]
    pub fn periods(&self, settlement: Date, payment: Date) -> f64 {
        Act365Fixed.year_fraction(settlement, payment) * self.frequency.as_f64()
    }

    /// Discount factor for a payment at `payment` seen from `settlement`.
    #[must_use]
    pub fn discount_factor(&self, ytm: f64, settlement: Date, payment: Date) -> f64 {
        let f = self.frequency.as_f64();
        (1.0 + ytm / f).powf(-self.periods(settlement, payment))
    }

    /// Present value of dated cash flows.
    pub fn present_value<I>(&self, flows: I, settlement: Date, ytm: f64) -> f64
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        flows
            .into_iter()
            .map(|(date, amount)| amount * self.discount_factor(ytm, settlement, date))
            .sum()
    }
}

/// Integer-period discounting of a regular bullet bond.
///
/// ```rust
/// use carry_bonds::discounting::WholePeriods;
/// use carry_core::types::Frequency;
///
/// let pricer = WholePeriods::new(Frequency::SemiAnnual, 2.0).unwrap();
/// let price = pricer.price(2.0, 100.0, 0.03);
/// assert!((price - 101.9272).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WholePeriods {
    frequency: Frequency,
    periods: u32,
}

impl WholePeriods {
    /// Creates the convention for `floor(tenor_years × frequency)` periods.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` if the tenor is not finite or
    /// yields zero whole periods.
    pub fn new(frequency: Frequency, tenor_years: f64) -> CarryResult<Self> {
        if !tenor_years.is_finite() || tenor_years <= 0.0 {
            return Err(CarryError::invalid_parameter(
                "tenor_years",
                format!("must be positive and finite, got {tenor_years}"),
            ));
        }

        let periods = (tenor_years * frequency.as_f64()).floor();
        if periods < 1.0 || periods > f64::from(i32::MAX) {
            return Err(CarryError::invalid_parameter(
                "tenor_years",
                format!("{tenor_years} years gives no whole {frequency} period"),
            ));
        }

        Ok(Self {
            frequency,
            periods: periods as u32,
        })
    }

    /// Number of whole periods `n`.
    #[must_use]
    pub fn periods(&self) -> u32 {
        self.periods
    }

    /// `Σ_{t=1..n} c/(1+y/f)^t + face/(1+y/f)^n`.
    #[must_use]
    pub fn price(&self, coupon_payment: f64, face_value: f64, ytm: f64) -> f64 {
        let v = 1.0 / (1.0 + ytm / self.frequency.as_f64());
        let mut pv = 0.0;
        let mut vt = 1.0;
        for _ in 0..self.periods {
            vt *= v;
            pv += coupon_payment * vt;
        }
        pv + face_value * vt
    }

    /// Derivative of [`WholePeriods::price`] with respect to the yield.
    #[must_use]
    pub fn price_derivative(&self, coupon_payment: f64, face_value: f64, ytm: f64) -> f64 {
        let f = self.frequency.as_f64();
        let v = 1.0 / (1.0 + ytm / f);
        let mut dpv = 0.0;
        let mut vt = v;
        for t in 1..=self.periods {
            vt *= v;
            dpv -= f64::from(t) * coupon_payment * vt;
        }
        dpv -= f64::from(self.periods) * face_value * vt;
        dpv / f
    }
}
