//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when the derivative is known
//! - [`secant`]: derivative-free, superlinear, needs two starting points
//! - [`secant_from_guess`]: secant seeded from a single guess
//!
//! Both methods declare convergence on the size of the step, not on the
//! residual, and stop with an error as soon as an iterate or a function
//! value stops being finite.
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use carry_math::solvers::{newton_raphson, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= f64::from(t) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv -= 5.0 * 100.0 / (1.0 + y).powi(6);
//!     dpv
//! };
//!
//! let result = newton_raphson(price_fn, d_price_fn, 0.05, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod newton;
mod secant;

pub use newton::newton_raphson;
pub use secant::{secant, secant_from_guess};

/// Default step tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1.48e-8;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Derivatives (or secant slopes) smaller than this are treated as zero.
pub(crate) const MIN_SLOPE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the step between successive iterates.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_iterations, 50);
        assert_relative_eq!(config.tolerance, 1.48e-8);
    }

    #[test]
    fn test_builder() {
        let config = SolverConfig::default()
            .with_tolerance(1e-12)
            .with_max_iterations(200);
        assert_eq!(config, SolverConfig::new(1e-12, 200));
    }

    #[test]
    fn test_methods_agree_on_ytm() {
        // 4% semiannual coupon, 2 years, price 101
        let price = |y: f64| {
            let v = 1.0 / (1.0 + y / 2.0);
            let mut pv = 0.0;
            for t in 1..=4 {
                pv += 2.0 * v.powi(t);
            }
            pv + 100.0 * v.powi(4) - 101.0
        };
        let dprice = |y: f64| {
            let v = 1.0 / (1.0 + y / 2.0);
            let mut d = 0.0;
            for t in 1..=4 {
                d -= f64::from(t) * 2.0 * v.powi(t + 1) / 2.0;
            }
            d - 4.0 * 100.0 * v.powi(5) / 2.0
        };

        let config = SolverConfig::default();
        let newton = newton_raphson(price, dprice, 0.03, &config).unwrap();
        let secant = secant_from_guess(price, 0.03, &config).unwrap();

        assert_relative_eq!(newton.root, secant.root, epsilon = 1e-9);
        assert!(newton.root < 0.04);
    }
}
