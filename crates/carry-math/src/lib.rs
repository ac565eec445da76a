//! # Carry Math
//!
//! Numerical root finders used by the Carry yield solver.
//!
//! - **Solvers**: Newton-Raphson with an analytic derivative and the
//!   derivative-free secant method, both seeded from a single guess

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        newton_raphson, secant, secant_from_guess, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
