//! lbfgs::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by every L-BFGS
//! strategy, so the rest of the optimizer stays agnostic to `ndarray` and
//! Argmin generics.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are `ndarray` containers over `f64`.
//! - `Cost` is the loss value being **minimized**; no sign flips happen
//!   anywhere in this layer.
//! - The line-search aliases assume Argmin’s three-parameter forms
//!   `(Param, Gradient, Float)` as of the pinned Argmin version.
//!
//! Testing notes
//! -------------
//! - Type aliases and constants only; exercised by the surrounding modules.
use argmin::core::IterState;
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Flat parameter vector `x` (the flattened GCP factors).
pub type Theta = Array1<f64>;

/// Gradient vector `∇f(x)`, matching the shape of [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar loss value.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Argmin iteration state shared by every L-BFGS run in this crate.
pub type LbfgsState = IterState<Theta, Grad, (), (), (), Cost>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 10;

/// Inner L-BFGS iterations performed by one step of the autodiff strategy.
pub const AUTODIFF_INNER_ITERS: u64 = 20;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
