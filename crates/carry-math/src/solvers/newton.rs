//! Newton-Raphson root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_SLOPE};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Converges when `|x_{n+1} - x_n| <= tolerance`, or immediately when
/// `f(x_n)` is exactly zero.
///
/// # Errors
///
/// - `MathError::DivisionByZero` if the derivative vanishes
/// - `MathError::NonFinite` if an iterate or function value is NaN/infinite
/// - `MathError::ConvergenceFailed` if the iteration budget is exhausted
///
/// # Example
///
/// ```rust
/// use carry_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !initial_guess.is_finite() {
        return Err(MathError::invalid_input(format!(
            "initial guess must be finite, got {initial_guess}"
        )));
    }

    let mut x = initial_guess;
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        if !fx.is_finite() {
            return Err(MathError::non_finite(iteration, fx));
        }

        if fx == 0.0 {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if !dfx.is_finite() {
            return Err(MathError::non_finite(iteration, dfx));
        }
        if dfx.abs() < MIN_SLOPE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;
        if !x.is_finite() {
            return Err(MathError::non_finite(iteration + 1, x));
        }
        fx = f(x);

        trace!("newton iteration {}: x = {x:.12}, f(x) = {fx:.3e}", iteration + 1);

        if step.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}
