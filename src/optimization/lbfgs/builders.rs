//! lbfgs::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Hide Argmin’s generic wiring behind one builder per line search and apply
//! the crate-level tolerances and memory size from [`LbfgsOptions`].
//!
//! Conventions
//! -----------
//! - The builders never set the initial point or the iteration budget; those
//!   are runtime concerns of [`run`](crate::optimization::lbfgs::run).
//! - Invalid tolerances rejected by Argmin surface as [`OptError`] through
//!   the crate’s `From<Error>` conversion.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    lbfgs::{
        traits::LbfgsOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with the Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falls back to [`DEFAULT_LBFGS_MEM`]) and the
/// optional tolerances in `opts.tols`.
///
/// # Errors
/// - `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &LbfgsOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with the More–Thuente line search.
///
/// More–Thuente enforces the strong Wolfe conditions, which is what the
/// autodiff strategy requires for every step.
///
/// # Errors
/// - `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &LbfgsOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver, whatever its line search.
///
/// A `None` tolerance leaves Argmin’s default in effect.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &LbfgsOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
