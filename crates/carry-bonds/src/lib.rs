//! # Carry Bonds
//!
//! Coupon schedules, pricing and yield solving for plain fixed-rate bonds.
//!
//! - **Schedule**: backward generation from maturity with the end-of-month rule
//! - **Pricing**: clean price, accrued interest, dirty price
//! - **Yield**: Newton-Raphson (or secant) inversion of the whole-period price
//!
//! ## Example
//!
//! ```rust
//! use carry_bonds::prelude::*;
//! use carry_core::types::{Date, Frequency};
//!
//! let bond = BondSpec::new(100.0, 0.04, Frequency::SemiAnnual, Date::from_ymd(2026, 1, 1).unwrap(), 2)
//!     .unwrap();
//! let schedule = bond.schedule().unwrap();
//! let settlement = Date::from_ymd(2025, 3, 15).unwrap();
//!
//! let quote = price(&bond, &schedule, settlement, 0.03).unwrap();
//! assert_eq!(quote.dirty_price, quote.clean_price + quote.accrued.amount);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]

pub mod bond;
pub mod discounting;
pub mod pricing;
pub mod schedule;
pub mod yield_solver;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{BondSpec, BondSpecBuilder};
    pub use crate::discounting::{FractionalPeriods, WholePeriods};
    pub use crate::pricing::{
        accrued_interest, clean_price, dirty_price, price, AccruedInterest, PricingQuote,
    };
    pub use crate::schedule::{generate_schedule, CouponSchedule};
    pub use crate::yield_solver::{
        solve_yield, whole_period_price, SolverMethod, YieldResult, YieldSolver,
        YieldSolverConfig,
    };
}

pub use bond::{BondSpec, BondSpecBuilder};
pub use pricing::{accrued_interest, clean_price, dirty_price, price, AccruedInterest, PricingQuote};
pub use schedule::{generate_schedule, CouponSchedule};
pub use yield_solver::{solve_yield, SolverMethod, YieldSolver, YieldSolverConfig};
