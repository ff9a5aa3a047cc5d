//! Execution helpers that run an `argmin` L-BFGS solver on an adapted
//! [`Objective`] and hand back the raw pieces each strategy needs.
use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        observer::ErrorRecorder,
        traits::{LbfgsOptions, LineSearcher, Objective},
        types::{Cost, FnEvalMap, LbfgsState, Theta},
        validation::validate_theta_hat,
    },
};
use argmin::core::{Executor, State, TerminationStatus, observers::ObserverMode};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Raw result of one solver run.
///
/// `param` is the best point the solver visited, **not** yet projected onto
/// the bounds; strategies project before returning it to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub param: Theta,
    pub cost: Cost,
    pub iterations: u64,
    pub termination: TerminationStatus,
    pub fn_evals: FnEvalMap,
}

/// Build the solver for `line_searcher` and run it.
///
/// # Errors
/// - Builder errors (rejected tolerances).
/// - Anything [`run_lbfgs`] returns.
pub fn solve<F: Objective>(
    problem: ArgMinAdapter<'_, F>, x0: Theta, max_iter: u64, line_searcher: LineSearcher,
    opts: &LbfgsOptions, recorder: Option<ErrorRecorder>,
) -> OptResult<RunOutcome> {
    match line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(problem, solver, x0, max_iter, opts, recorder)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(problem, solver, x0, max_iter, opts, recorder)
        }
    }
}

/// Run an `argmin` solver from `x0` for at most `max_iter` iterations.
///
/// Wires the adapted problem, the solver, the starting point, the iteration
/// budget, the optional [`ErrorRecorder`] (attached with
/// `ObserverMode::Always`, so it fires once per completed iteration) and,
/// behind the `obs_slog` feature with `opts.verbose`, a terminal slog
/// observer plus a one-line report of `f(x0)` and `‖∇f(x0)‖`.
///
/// # Errors
/// - Argmin runtime errors (line-search failures, observer failures) and
///   caller errors raised inside the loss or gradient, via
///   `From<argmin::core::Error>`.
/// - [`validate_theta_hat`] failures on the best parameter.
#[cfg_attr(not(feature = "obs_slog"), allow(unused_variables))]
pub fn run_lbfgs<'a, F, S>(
    problem: ArgMinAdapter<'a, F>, solver: S, x0: Theta, max_iter: u64, opts: &LbfgsOptions,
    recorder: Option<ErrorRecorder>,
) -> OptResult<RunOutcome>
where
    F: Objective,
    S: argmin::core::Solver<ArgMinAdapter<'a, F>, LbfgsState> + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&x0, &problem)?;
    }
    let mut optimizer =
        Executor::new(problem, solver).configure(|state| state.param(x0).max_iters(max_iter));
    if let Some(recorder) = recorder {
        optimizer = optimizer.add_observer(recorder, ObserverMode::Always);
    }
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let fn_evals = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let cost = result.get_best_cost();
    let param = validate_theta_hat(result.take_best_param())?;
    Ok(RunOutcome { param, cost, iterations, termination, fn_evals })
}

/// Add the counters of one run into a running total.
pub fn merge_fn_evals(total: &mut FnEvalMap, run: &FnEvalMap) {
    for (name, count) in run {
        *total.entry(name.clone()).or_insert(0) += count;
    }
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(x0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let f0 = problem.projected_value(x0)?;
    let g0n = problem.projected_gradient(x0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: f(x0) = {:.6}{}",
        f0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
