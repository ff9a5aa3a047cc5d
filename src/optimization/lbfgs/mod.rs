//! lbfgs — backend-dispatching, argmin-powered L-BFGS minimizer.
//!
//! Purpose
//! -------
//! Minimize a scalar loss `f(x)` over a flat parameter vector with L-BFGS,
//! the way the GCP tensor-decomposition driver needs it: the backend is an
//! explicit argument, non-negativity is an optional box constraint, and the
//! result is the final point plus the per-iteration loss history divided by
//! a caller-supplied `norm`.
//!
//! Key behaviors
//! -------------
//! - [`lbfgs`] forwards to [`Backend::minimize`], which fails fast on
//!   unsupported requests and routes to one of the [`strategies`]:
//!   - `reference`: one bound-aware run, exact per-iteration history;
//!   - `autodiff`: manual loop of strong-Wolfe steps, clamping per step;
//!   - `graph`: manual loop of single-iteration runs;
//!   - `accelerated`: one opaque run, no history.
//! - [`adapter::ArgMinAdapter`] bridges an [`Objective`] into argmin, clamping
//!   evaluation points onto the bounds and projecting gradients.
//! - [`finite_diff`] supplies gradients when the caller has none, or when
//!   the backend derives them from the loss.
//! - [`observer::ErrorRecorder`] records the normalized loss at every
//!   iteration of a run.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x0` is moved in; every strategy returns a fresh vector of the same
//!   length. The caller's data is never mutated behind its back.
//! - With `Bounds::NonNegative`, every returned component is `≥ 0`.
//! - History entries are finite; a non-finite loss aborts the run with
//!   [`OptError::NonFiniteCost`].
//! - Caller errors propagate unchanged; partial histories are dropped.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray` `Array1<f64>` aliases ([`Theta`], [`Grad`]).
//! - The optimizer minimizes `f` directly; there is no sign flip.
//! - Everything returns [`OptResult<T>`]; nothing here panics on bad input.
//!
//! Downstream usage
//! ----------------
//! - Implement [`Objective`] (or wrap closures in [`FnObjective`]), build
//!   [`LbfgsOptions`], pick a [`Backend`] (parsed from a name if needed) and
//!   call [`lbfgs`].
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover local wiring: projection and
//!   gradient policy in [`adapter`], history recording in [`observer`],
//!   dispatch order in [`backend`], and the numerics of each strategy.
//! - `tests/integration_lbfgs_backends.rs` exercises [`lbfgs`] end to end.
//!
//! [`OptError::NonFiniteCost`]: crate::optimization::errors::OptError::NonFiniteCost
//! [`OptResult<T>`]: crate::optimization::errors::OptResult

pub mod adapter;
pub mod api;
pub mod backend;
pub mod builders;
pub mod finite_diff;
pub mod observer;
pub mod run;
pub mod strategies;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::lbfgs;
pub use self::backend::Backend;
pub use self::traits::{
    Bounds, FnObjective, LbfgsOptions, LbfgsOutcome, LineSearcher, Objective, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use gcp_lbfgs::optimization::lbfgs::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::lbfgs;
    pub use super::backend::Backend;
    pub use super::traits::{Bounds, FnObjective, LbfgsOptions, LbfgsOutcome, Objective};
    pub use super::types::{Cost, Grad, Theta};
}
