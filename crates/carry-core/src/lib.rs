//! # Carry Core
//!
//! Core types and the error taxonomy for the Carry bond basis library.
//!
//! - **Types**: [`Date`] and [`Frequency`]
//! - **Day Count Conventions**: actual/360 and actual/365 fixed
//! - **Errors**: [`CarryError`], shared by every crate in the workspace
//!
//! ## Example
//!
//! ```rust
//! use carry_core::prelude::*;
//!
//! let maturity = Date::from_ymd(2026, 1, 1).unwrap();
//! let freq = Frequency::from_periods(2).unwrap();
//! assert_eq!(freq.months_per_period(), 6);
//! assert!(!maturity.is_end_of_month());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountBasis};
    pub use crate::error::{CarryError, CarryResult};
    pub use crate::types::{Date, Frequency};
}

pub use error::{CarryError, CarryResult};
pub use types::{Date, Frequency};
