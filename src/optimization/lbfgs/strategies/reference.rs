//! Reference strategy: one bound-aware L-BFGS run with a per-iteration
//! error recorder.
//!
//! This is the only strategy whose history is exact: the recorder fires once
//! per completed solver iteration, so `errors.len() == iterations` and every
//! entry is `f(P(x_k)) / norm`, where `P` projects onto the bounds.
use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        adapter::{ArgMinAdapter, GradientPolicy},
        observer::{ErrorHistory, ErrorRecorder},
        run::solve,
        traits::{LbfgsOptions, LbfgsOutcome, Objective},
        types::Theta,
    },
};

/// Minimize `objective` from `x0` with the configured line search.
///
/// `x0` is projected onto `opts.bounds` before the run and the returned
/// point is projected again, so a `NonNegative` run never returns a
/// negative component. The analytic gradient is used when implemented.
///
/// # Errors
/// - Caller errors from the loss/gradient, unchanged.
/// - Solver and validation errors from [`solve`].
pub fn minimize<F: Objective>(
    objective: &F, x0: Theta, opts: &LbfgsOptions,
) -> OptResult<LbfgsOutcome> {
    let mut x0 = x0;
    opts.bounds.project_in_place(&mut x0);
    let problem = ArgMinAdapter::new(objective, opts.bounds, GradientPolicy::PreferAnalytic);
    let history = ErrorHistory::new();
    let recorder = ErrorRecorder::new(history.clone(), opts.norm);

    let run = solve(problem, x0, opts.max_iter as u64, opts.line_searcher, opts, Some(recorder))?;
    let x = opts.bounds.project(&run.param);
    LbfgsOutcome::new(Some(x), history.take()?, run.termination, run.iterations, run.fn_evals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::lbfgs::traits::FnObjective;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::cell::RefCell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exactness of the recorded history (`f(x_k) / norm`, one per iteration)
    //   for every entry, not just the last.
    // - Non-negativity of the result under `Bounds::NonNegative`.
    //
    // They intentionally DO NOT cover:
    // - Backend dispatch and input validation; see `backend`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The history has one entry per iteration, and every entry is the loss
    // at a point the solver evaluated, divided by `norm`.
    //
    // Given
    // -----
    // - `f(x) = Σ (x_i - t_i)² + 1` with `t = [3, -1]`, `norm = 2`.
    // - The loss logs every value it returns.
    //
    // Expect
    // ------
    // - `errors.len() == iterations`.
    // - Each `errors[k] * 2` is one of the logged loss values.
    // - Last entry ≈ `f(x̂) / 2 ≈ 0.5`.
    fn history_matches_loss_over_norm_per_iteration() {
        // Arrange
        let target = array![3.0, -1.0];
        let evaluated = RefCell::new(Vec::new());
        let objective = FnObjective::new(|x: &Theta| {
            let d = x - &target;
            let value = d.dot(&d) + 1.0;
            evaluated.borrow_mut().push(value);
            Ok(value)
        });
        let opts = LbfgsOptions::new(40, false, 2.0).expect("options should be valid");

        // Act
        let out = minimize(&objective, Theta::zeros(2), &opts).expect("run should succeed");

        // Assert
        assert!(!out.errors.is_empty());
        assert_eq!(out.errors.len(), out.iterations);
        let evaluated = evaluated.borrow();
        for (k, entry) in out.errors.iter().enumerate() {
            assert!(
                evaluated.contains(&(entry * 2.0)),
                "entry {k} = {entry} is not a recorded loss over norm"
            );
        }
        let last = *out.errors.last().expect("history should be non-empty");
        assert_abs_diff_eq!(last, 0.5, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // `norm` divides every entry of the history and leaves the trajectory
    // untouched.
    //
    // Given
    // -----
    // - The same shifted quadratic run with `norm = 1` and `norm = 8`.
    //
    // Expect
    // ------
    // - Identical `x̂` and iteration counts; `e₈[k] == e₁[k] / 8` for every `k`.
    fn every_history_entry_is_divided_by_norm() {
        // Arrange
        let target = array![3.0, -1.0];
        let objective = FnObjective::new(|x: &Theta| {
            let d = x - &target;
            Ok(d.dot(&d) + 1.0)
        });
        let opts_1 = LbfgsOptions::new(40, false, 1.0).expect("options should be valid");
        let opts_8 = LbfgsOptions::new(40, false, 8.0).expect("options should be valid");

        // Act
        let out_1 = minimize(&objective, Theta::zeros(2), &opts_1).expect("run should succeed");
        let out_8 = minimize(&objective, Theta::zeros(2), &opts_8).expect("run should succeed");

        // Assert
        assert_eq!(out_1.x, out_8.x);
        assert_eq!(out_1.errors.len(), out_8.errors.len());
        for (e1, e8) in out_1.errors.iter().zip(&out_8.errors) {
            assert_eq!(e1 / 8.0, *e8);
        }
    }

    #[test]
    // Purpose
    // -------
    // A negative unconstrained minimizer is cut off at zero.
    //
    // Given
    // -----
    // - `f(x) = (x + 5)²` per coordinate, `x0 = [1, 0]`, non-negative.
    //
    // Expect
    // ------
    // - Result ≈ `[0, 0]`, no negative component.
    fn non_negative_run_stops_at_the_bound() {
        // Arrange
        let objective = FnObjective::new(|x: &Theta| Ok(x.mapv(|v| (v + 5.0).powi(2)).sum()))
            .with_gradient(|x: &Theta| Ok(x.mapv(|v| 2.0 * (v + 5.0))));
        let opts = LbfgsOptions::new(50, true, 1.0).expect("options should be valid");

        // Act
        let out = minimize(&objective, array![1.0, 0.0], &opts).expect("run should succeed");

        // Assert
        assert!(out.x.iter().all(|&v| v >= 0.0));
        assert_abs_diff_eq!(out.x[0], 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(out.x[1], 0.0, epsilon = 1e-8);
    }
}
