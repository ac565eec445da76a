//! Domain types for bond basis analytics.
//!
//! - [`Date`]: Calendar date for schedule and accrual calculations
//! - [`Frequency`]: Coupon payment frequency

mod date;
mod frequency;

pub use date::Date;
pub use frequency::Frequency;
