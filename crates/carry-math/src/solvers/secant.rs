//! Secant root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_SLOPE};

/// Relative offset used to derive the second secant point from a guess.
const SEED_RELATIVE_STEP: f64 = 1e-4;

/// Secant root-finding algorithm.
///
/// Approximates the derivative from the two most recent iterates, so no
/// analytic derivative or bracket is needed. Convergence is superlinear
/// (order ~1.618).
///
/// # Errors
///
/// - `MathError::InvalidInput` if the starting points coincide or are not finite
/// - `MathError::DivisionByZero` if the secant line is flat
/// - `MathError::NonFinite` if an iterate or function value is NaN/infinite
/// - `MathError::ConvergenceFailed` if the iteration budget is exhausted
///
/// # Example
///
/// ```rust
/// use carry_math::solvers::{secant, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if !x0.is_finite() || !x1.is_finite() {
        return Err(MathError::invalid_input(format!(
            "starting points must be finite, got {x0} and {x1}"
        )));
    }
    if x0 == x1 {
        return Err(MathError::invalid_input("starting points must differ"));
    }

    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = f(x_prev);
    let mut f_curr = f(x_curr);

    for iteration in 0..config.max_iterations {
        if !f_prev.is_finite() {
            return Err(MathError::non_finite(iteration, f_prev));
        }
        if !f_curr.is_finite() {
            return Err(MathError::non_finite(iteration, f_curr));
        }

        if f_curr == 0.0 {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        let denom = f_curr - f_prev;
        if denom.abs() < MIN_SLOPE {
            // Flat secant between two points already within tolerance
            if (x_curr - x_prev).abs() <= config.tolerance {
                return Ok(SolverResult {
                    root: x_curr,
                    iterations: iteration,
                    residual: f_curr,
                });
            }
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
        if !x_next.is_finite() {
            return Err(MathError::non_finite(iteration + 1, x_next));
        }

        let step = x_next - x_curr;
        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f(x_curr);

        trace!(
            "secant iteration {}: x = {x_curr:.12}, f(x) = {f_curr:.3e}",
            iteration + 1
        );

        if step.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration + 1,
                residual: f_curr,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
    ))
}

/// Secant method seeded from a single guess.
///
/// The second point is `x0 * (1 + 1e-4) ± 1e-4`, the sign following `x0`,
/// which keeps the two points distinct even for a zero guess.
///
/// ```rust
/// use carry_math::solvers::{secant_from_guess, SolverConfig};
///
/// let result = secant_from_guess(|x| x * x - 2.0, 1.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant_from_guess<F>(f: F, x0: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let offset = if x0 >= 0.0 {
        SEED_RELATIVE_STEP
    } else {
        -SEED_RELATIVE_STEP
    };
    let x1 = x0 * (1.0 + SEED_RELATIVE_STEP) + offset;
    secant(f, x0, x1, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;

        let result = secant(f, 2.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_seed_from_zero_guess() {
        let f = |x: f64| x - 0.05;

        let result = secant_from_guess(f, 0.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_seed_negative_guess() {
        let f = |x: f64| x + 2.0;

        let result = secant_from_guess(f, -1.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_points_rejected() {
        let result = secant(|x| x, 1.0, 1.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    #[test]
    fn test_flat_function() {
        let result = secant(|_x| 3.0, 0.0, 1.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }
}
