//! Autodiff strategy: a manual loop of L-BFGS steps whose gradient is always
//! derived from the loss itself.
//!
//! Each outer iteration evaluates the loss at the current point, clamps the
//! point onto the bounds, then applies one L-BFGS step: an inner run of
//! [`AUTODIFF_INNER_ITERS`] iterations with the strong-Wolfe (More–Thuente)
//! line search, started with fresh curvature memory. The pre-step loss,
//! divided by `norm`, is appended to the history. The caller's analytic
//! gradient is never consulted.
use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        adapter::{ArgMinAdapter, GradientPolicy},
        run::{merge_fn_evals, solve},
        traits::{Bounds, LbfgsOptions, LbfgsOutcome, LineSearcher, Objective},
        types::{AUTODIFF_INNER_ITERS, FnEvalMap, Theta},
    },
};
use argmin::core::TerminationStatus;

/// Run exactly `opts.max_iter` outer steps from `x0`.
///
/// The inner problem is unconstrained; `NonNegative` is enforced by clamping
/// before every step and once more after the last one, so the returned point
/// never has a negative component. `iterations` counts outer steps.
///
/// # Errors
/// - Caller errors from the loss, unchanged.
/// - Solver errors from any inner run; the partial history is dropped.
pub fn minimize<F: Objective>(
    objective: &F, x0: Theta, opts: &LbfgsOptions,
) -> OptResult<LbfgsOutcome> {
    let mut x = x0;
    let mut errors = Vec::with_capacity(opts.max_iter);
    let mut fn_evals = FnEvalMap::new();
    let mut termination = TerminationStatus::NotTerminated;

    for _ in 0..opts.max_iter {
        let problem =
            ArgMinAdapter::new(objective, Bounds::Unconstrained, GradientPolicy::DeriveFromLoss);
        let value = problem.checked_value(&x)?;
        opts.bounds.project_in_place(&mut x);

        let step =
            solve(problem, x, AUTODIFF_INNER_ITERS, LineSearcher::MoreThuente, opts, None)?;
        merge_fn_evals(&mut fn_evals, &step.fn_evals);
        termination = step.termination;
        x = step.param;
        errors.push(value / opts.norm);
    }
    opts.bounds.project_in_place(&mut x);

    LbfgsOutcome::new(Some(x), errors, termination, opts.max_iter as u64, fn_evals)
}
