//! Graph strategy: `max_iter` single-iteration L-BFGS runs, each restarted
//! from the previous position.
//!
//! Every run is capped at one iteration regardless of the solver's own
//! convergence tests, which makes `max_iter` a literal count of L-BFGS
//! updates. Curvature memory does not survive between runs, so each update
//! is a line-searched steepest-descent step.
use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        adapter::{ArgMinAdapter, GradientPolicy},
        run::{merge_fn_evals, solve},
        traits::{Bounds, LbfgsOptions, LbfgsOutcome, Objective},
        types::{FnEvalMap, Theta},
    },
};
use argmin::core::TerminationStatus;

/// Run `opts.max_iter` one-step solves, recording each run's objective.
///
/// Uses the caller's gradient when implemented and finite differences
/// otherwise. Bounds are not supported here; the dispatcher rejects
/// `NonNegative` before this is reached.
///
/// # Errors
/// - Caller errors from the loss/gradient, unchanged.
/// - Solver errors from any run.
pub fn minimize<F: Objective>(
    objective: &F, x0: Theta, opts: &LbfgsOptions,
) -> OptResult<LbfgsOutcome> {
    let mut x = x0;
    let mut errors = Vec::with_capacity(opts.max_iter);
    let mut fn_evals = FnEvalMap::new();
    let mut termination = TerminationStatus::NotTerminated;

    for _ in 0..opts.max_iter {
        let problem =
            ArgMinAdapter::new(objective, Bounds::Unconstrained, GradientPolicy::PreferAnalytic);
        let step = solve(problem, x, 1, opts.line_searcher, opts, None)?;
        merge_fn_evals(&mut fn_evals, &step.fn_evals);
        errors.push(step.cost / opts.norm);
        termination = step.termination;
        x = step.param;
    }

    LbfgsOutcome::new(Some(x), errors, termination, opts.max_iter as u64, fn_evals)
}
