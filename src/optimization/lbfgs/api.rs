//! High-level entry point for minimizing a user-provided [`Objective`] on an
//! explicitly chosen backend.
//!
//! This is the single function the GCP driver calls: it forwards to
//! [`Backend::minimize`], which validates, handles the zero-budget and
//! no-L-BFGS cases, and routes to the backend's strategy.
use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        backend::Backend,
        traits::{LbfgsOptions, LbfgsOutcome, Objective},
        types::Theta,
    },
};

/// Minimize `objective` from `x0` with L-BFGS on `backend`.
///
/// # Behavior
/// - `Reference`: bound-aware run (`opts.bounds`), one history entry per
///   solver iteration, analytic gradient when [`Objective::grad`] is
///   implemented.
/// - `Autodiff`: `opts.max_iter` strong-Wolfe steps, gradient derived from
///   the loss, non-negativity by clamping.
/// - `Graph`: `opts.max_iter` single-iteration runs, analytic gradient when
///   available; `NonNegative` is rejected.
/// - `Accelerated`: one run, gradient derived from the loss, empty history;
///   `NonNegative` is rejected.
/// - `Distributed`: always [`OptError::NoLbfgsForBackend`].
///
/// History entries are objective values divided by `opts.norm`.
///
/// # Parameters
/// - `backend`: numerical backend to run on.
/// - `objective`: loss (and optional gradient) implementing [`Objective`].
/// - `x0`: starting point; moved in, never mutated in the caller's hands.
/// - `opts`: iteration budget, constraint, history divisor and solver tuning.
///
/// # Errors
/// - Configuration errors (`NoLbfgsForBackend`, `UnsupportedConstraint`,
///   `InvalidNorm`, tolerance and memory errors).
/// - Errors returned by the caller's `value`/`grad`, unchanged.
/// - Solver failures mapped from argmin.
///
/// # Returns
/// An [`LbfgsOutcome`]; [`LbfgsOutcome::into_parts`] yields the
/// `(x_final, error_history)` pair.
///
/// # Example
/// ```no_run
/// use gcp_lbfgs::optimization::lbfgs::{lbfgs, Backend, FnObjective, LbfgsOptions, Theta};
/// use ndarray::array;
///
/// let target = array![1.0, 2.0, 3.0];
/// let objective = FnObjective::new(|x: &Theta| {
///     let d = x - &target;
///     Ok(d.dot(&d))
/// });
/// let opts = LbfgsOptions::new(100, false, 1.0)?;
/// let (x, errors) = lbfgs(Backend::Reference, &objective, Theta::zeros(3), &opts)?.into_parts();
/// println!("x̂ = {x}, {} iterations recorded", errors.len());
/// # Ok::<(), gcp_lbfgs::optimization::errors::OptError>(())
/// ```
///
/// [`OptError::NoLbfgsForBackend`]: crate::optimization::errors::OptError::NoLbfgsForBackend
pub fn lbfgs<F: Objective>(
    backend: Backend, objective: &F, x0: Theta, opts: &LbfgsOptions,
) -> OptResult<LbfgsOutcome> {
    backend.minimize(objective, x0, opts)
}
