//! Accelerated strategy: a single L-BFGS run with no per-step introspection.
//!
//! The gradient is always derived from the loss; the caller's analytic
//! gradient is not threaded through. The error history is always empty.
use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        adapter::{ArgMinAdapter, GradientPolicy},
        run::solve,
        traits::{Bounds, LbfgsOptions, LbfgsOutcome, Objective},
        types::Theta,
    },
};

/// Minimize `objective` from `x0` in one run of at most `opts.max_iter`
/// iterations.
///
/// # Errors
/// - Caller errors from the loss, unchanged.
/// - Solver errors from the run.
pub fn minimize<F: Objective>(
    objective: &F, x0: Theta, opts: &LbfgsOptions,
) -> OptResult<LbfgsOutcome> {
    let problem =
        ArgMinAdapter::new(objective, Bounds::Unconstrained, GradientPolicy::DeriveFromLoss);
    let run = solve(problem, x0, opts.max_iter as u64, opts.line_searcher, opts, None)?;
    LbfgsOutcome::new(Some(run.param), Vec::new(), run.termination, run.iterations, run.fn_evals)
}
