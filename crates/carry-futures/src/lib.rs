//! # Carry Futures
//!
//! Cash-and-carry analytics for a deliverable bond against a bond future.
//!
//! - **Conversion factor**: clean price at the contract's notional yield
//! - **Implied repo**: annualized return of buying today and delivering
//! - **Basis**: gross, net, carry to delivery and basis net of carry
//!
//! ## Example
//!
//! ```rust
//! use carry_bonds::BondSpec;
//! use carry_core::types::{Date, Frequency};
//! use carry_futures::prelude::*;
//!
//! let bond = BondSpec::new(100.0, 0.04, Frequency::SemiAnnual, Date::from_ymd(2026, 1, 1).unwrap(), 2)
//!     .unwrap();
//! let schedule = bond.schedule().unwrap();
//!
//! let breakdown = basis_net_of_carry(
//!     &bond,
//!     &schedule,
//!     105.0,
//!     Date::from_ymd(2025, 3, 15).unwrap(),
//!     Date::from_ymd(2025, 10, 1).unwrap(),
//!     0.03,
//!     0.04,
//!     &FuturesConventions::default(),
//! )
//! .unwrap();
//!
//! let report = breakdown.report(8).unwrap();
//! assert_eq!(
//!     breakdown.basis_net_of_carry,
//!     breakdown.net_basis_today - breakdown.carry_to_delivery
//! );
//! assert!(report.basis_net_of_carry < rust_decimal::Decimal::ZERO);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod basis;
pub mod context;
pub mod conventions;
pub mod conversion;
pub mod repo;

mod rounding;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::basis::{
        basis_net_of_carry, carry_to_delivery, gross_basis_clean, gross_basis_dirty, net_basis,
        BasisBreakdown, BasisReport,
    };
    pub use crate::context::FuturesContext;
    pub use crate::conventions::FuturesConventions;
    pub use crate::conversion::{conversion_factor, implied_forward_yield};
    pub use crate::repo::implied_repo_rate;
}

pub use basis::{basis_net_of_carry, carry_to_delivery, BasisBreakdown, BasisReport};
pub use context::FuturesContext;
pub use conventions::FuturesConventions;
pub use conversion::{conversion_factor, implied_forward_yield};
pub use repo::implied_repo_rate;
