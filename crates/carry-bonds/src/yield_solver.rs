//! Yield-to-maturity solver.
//!
//! Inverts the whole-period price (see [`WholePeriods`]) for a target price.
//! Newton-Raphson with the analytic derivative is the default; the secant
//! method is available for callers that want a derivative-free iteration.
//!
//! # Example
//!
//! ```rust
//! use carry_bonds::yield_solver::YieldSolver;
//! use carry_core::types::Frequency;
//!
//! let result = YieldSolver::new()
//!     .solve(101.9272, 2.0, 0.04, 100.0, Frequency::SemiAnnual)
//!     .unwrap();
//! assert!((result.yield_value - 0.03).abs() < 1e-5);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use carry_core::error::{CarryError, CarryResult};
use carry_core::types::Frequency;
use carry_math::solvers::{
    newton_raphson, secant_from_guess, SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use carry_math::MathError;

use crate::bond::BondSpec;
use crate::discounting::WholePeriods;

/// Default starting yield.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.03;

/// Root-finding method used by the yield solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverMethod {
    /// Newton-Raphson with analytic derivative.
    #[default]
    Newton,
    /// Derivative-free secant method.
    Secant,
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverMethod::Newton => write!(f, "newton"),
            SolverMethod::Secant => write!(f, "secant"),
        }
    }
}

impl std::str::FromStr for SolverMethod {
    type Err = CarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newton" | "newton-raphson" => Ok(SolverMethod::Newton),
            "secant" => Ok(SolverMethod::Secant),
            other => Err(CarryError::invalid_parameter(
                "method",
                format!("unknown solver method '{other}'"),
            )),
        }
    }
}

/// Serializable yield solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSolverConfig {
    /// Root-finding method.
    #[serde(default)]
    pub method: SolverMethod,
    /// Absolute tolerance on the yield step.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Starting yield.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_initial_guess() -> f64 {
    DEFAULT_INITIAL_GUESS
}

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: DEFAULT_INITIAL_GUESS,
        }
    }
}

impl YieldSolverConfig {
    /// Validates tolerance, budget and guess.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::InvalidParameter` for a non-positive tolerance,
    /// a zero budget or a non-finite guess.
    pub fn validate(&self) -> CarryResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CarryError::invalid_parameter(
                "tolerance",
                format!("must be positive, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(CarryError::invalid_parameter(
                "max_iterations",
                "must be at least 1",
            ));
        }
        if !self.initial_guess.is_finite() {
            return Err(CarryError::invalid_parameter(
                "initial_guess",
                format!("must be finite, got {}", self.initial_guess),
            ));
        }
        Ok(())
    }
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldResult {
    /// The solved yield as a decimal (0.05 for 5%).
    pub yield_value: f64,
    /// Iterations used.
    pub iterations: u32,
    /// Price residual at the solved yield.
    pub residual: f64,
    /// Method that produced the result.
    pub method: SolverMethod,
}

/// Yield-to-maturity solver over whole-period discounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldSolver {
    config: YieldSolverConfig,
}

impl YieldSolver {
    /// Creates a solver with default settings.
    ///
    /// Default method: Newton-Raphson
    /// Default tolerance: 1.48e-8
    /// Default max iterations: 50
    /// Default initial guess: 3%
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver from configuration.
    #[must_use]
    pub fn from_config(config: YieldSolverConfig) -> Self {
        Self { config }
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets the starting yield.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.config.initial_guess = guess;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &YieldSolverConfig {
        &self.config
    }

    /// Solves for the yield at which the whole-period price equals `target_price`.
    ///
    /// # Errors
    ///
    /// - `CarryError::InvalidParameter` for non-finite or non-positive inputs
    ///   or fewer than one whole period
    /// - `CarryError::ConvergenceFailed` if the iteration fails for any reason
    pub fn solve(
        &self,
        target_price: f64,
        tenor_years: f64,
        coupon_rate: f64,
        face_value: f64,
        frequency: Frequency,
    ) -> CarryResult<YieldResult> {
        self.config.validate()?;
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(CarryError::invalid_parameter(
                "price",
                format!("must be positive and finite, got {target_price}"),
            ));
        }
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(CarryError::invalid_parameter(
                "coupon_rate",
                format!("must be finite and non-negative, got {coupon_rate}"),
            ));
        }
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(CarryError::invalid_parameter(
                "face_value",
                format!("must be positive, got {face_value}"),
            ));
        }

        let pricer = WholePeriods::new(frequency, tenor_years)?;
        let coupon = face_value * coupon_rate / frequency.as_f64();

        let objective = |y: f64| pricer.price(coupon, face_value, y) - target_price;
        let solver_config = SolverConfig::new(self.config.tolerance, self.config.max_iterations);

        let outcome = match self.config.method {
            SolverMethod::Newton => newton_raphson(
                objective,
                |y: f64| pricer.price_derivative(coupon, face_value, y),
                self.config.initial_guess,
                &solver_config,
            ),
            SolverMethod::Secant => {
                secant_from_guess(objective, self.config.initial_guess, &solver_config)
            }
        };

        let result = outcome.map_err(|e| {
            debug!("yield solve for price {target_price} failed: {e}");
            convergence_error(&e)
        })?;

        debug!(
            "solved yield {:.10} for price {target_price} in {} {} iterations",
            result.root, result.iterations, self.config.method
        );

        Ok(YieldResult {
            yield_value: result.root,
            iterations: result.iterations,
            residual: result.residual,
            method: self.config.method,
        })
    }

    /// Solves for the yield of `bond` using its tenor, coupon, face and frequency.
    ///
    /// # Errors
    ///
    /// See [`YieldSolver::solve`].
    pub fn solve_for_bond(&self, bond: &BondSpec, target_price: f64) -> CarryResult<YieldResult> {
        self.solve(
            target_price,
            f64::from(bond.tenor_years()),
            bond.coupon_rate(),
            bond.face_value(),
            bond.frequency(),
        )
    }
}

fn convergence_error(e: &MathError) -> CarryError {
    CarryError::convergence_failed(e.iterations(), e.residual())
}

/// Solves for yield with Newton-Raphson from `guess`.
///
/// # Errors
///
/// See [`YieldSolver::solve`].
pub fn solve_yield(
    price: f64,
    tenor_years: f64,
    coupon_rate: f64,
    face_value: f64,
    frequency: Frequency,
    guess: f64,
) -> CarryResult<f64> {
    YieldSolver::new()
        .with_initial_guess(guess)
        .solve(price, tenor_years, coupon_rate, face_value, frequency)
        .map(|r| r.yield_value)
}

/// Whole-period price for a yield; the inverse of [`solve_yield`].
///
/// # Errors
///
/// Returns `CarryError::InvalidParameter` if the tenor gives no whole period.
pub fn whole_period_price(
    ytm: f64,
    tenor_years: f64,
    coupon_rate: f64,
    face_value: f64,
    frequency: Frequency,
) -> CarryResult<f64> {
    let pricer = WholePeriods::new(frequency, tenor_years)?;
    let coupon = face_value * coupon_rate / frequency.as_f64();
    Ok(pricer.price(coupon, face_value, ytm))
}
