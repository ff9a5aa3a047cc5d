//! lbfgs::finite_diff — finite-difference gradients with error capture.
//!
//! Purpose
//! -------
//! Differentiate a loss numerically when no analytic gradient is available
//! (or when a strategy must derive the gradient from the loss itself),
//! without depending directly on the `finitediff` API elsewhere.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences when an evaluation failed or the central
//!   approximation did not validate.
//! - [`run_fd_diff`] performs the forward-difference pass with error
//!   capture and post-hoc validation.
//!
//! Conventions
//! -----------
//! - `finitediff` closures must return `f64`, so the first error raised by
//!   the loss is parked in a `RefCell` and `NaN` is returned; the parked
//!   error is surfaced once the pass finishes.
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::{
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Finite-difference gradient of `cost` at `theta`, central first.
///
/// # Errors
/// - The first error raised by `cost` during the forward fallback.
/// - `GradientDimMismatch` / `InvalidGradient` if the forward-difference
///   gradient fails validation.
pub fn fd_gradient<C>(theta: &Theta, cost: C) -> OptResult<Grad>
where
    C: Fn(&Theta) -> OptResult<Cost>,
{
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let func = |x: &Theta| -> f64 {
        match cost(x) {
            Ok(val) => val,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            }
        }
    };
    let central = theta.central_diff(&func);
    let failed = closure_err.borrow().is_some();
    if !failed && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, &func, &closure_err)
}

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, returns any error the closure
/// parked, then validates the gradient.
///
/// # Errors
/// - The error captured in `closure_err`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<OptError>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accuracy of `fd_gradient` on a smooth quadratic.
    // - Fallback to forward differences when the central pass fails.
    // - Propagation of loss errors out of the finite-difference pass.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Central differences recover the gradient of a quadratic.
    //
    // Given
    // -----
    // - `f(x) = Σ (x_i - t_i)²` with `t = [1, 2, 3]`, at `x = 0`.
    //
    // Expect
    // ------
    // - Gradient ≈ `[-2, -4, -6]`.
    fn fd_gradient_matches_analytic_quadratic_gradient() {
        // Arrange
        let target = array![1.0, 2.0, 3.0];
        let x = Theta::zeros(3);
        let cost = |x: &Theta| -> OptResult<Cost> {
            let d = x - &target;
            Ok(d.dot(&d))
        };

        // Act
        let grad = fd_gradient(&x, cost).expect("FD gradient should succeed");

        // Assert
        for (g, expected) in grad.iter().zip([-2.0, -4.0, -6.0]) {
            assert_abs_diff_eq!(*g, expected, epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // A loss that fails only on the backward side still differentiates via
    // forward differences.
    //
    // Given
    // -----
    // - `f(x) = x²` that errors for `x < 0`, evaluated at `x = 0`.
    //
    // Expect
    // ------
    // - Forward-difference gradient ≈ 0 (within the FD step).
    fn fd_gradient_falls_back_to_forward_differences() {
        // Arrange
        let x = array![0.0];
        let cost = |x: &Theta| -> OptResult<Cost> {
            if x[0] < 0.0 {
                return Err(OptError::ObjectiveFailed { text: "negative input".to_string() });
            }
            Ok(x[0] * x[0])
        };

        // Act
        let grad = fd_gradient(&x, cost).expect("forward fallback should succeed");

        // Assert
        assert_abs_diff_eq!(grad[0], 0.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A loss that always fails surfaces its own error.
    //
    // Given
    // -----
    // - A loss returning `ObjectiveFailed` for every input.
    //
    // Expect
    // ------
    // - `fd_gradient` returns that same error.
    fn fd_gradient_propagates_loss_errors() {
        // Arrange
        let x = array![1.0, 2.0];
        let cost = |_: &Theta| -> OptResult<Cost> {
            Err(OptError::ObjectiveFailed { text: "boom".to_string() })
        };

        // Act
        let result = fd_gradient(&x, cost);

        // Assert
        assert_eq!(result, Err(OptError::ObjectiveFailed { text: "boom".to_string() }));
    }
}
