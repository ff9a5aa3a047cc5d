//! optimization — L-BFGS stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used when fitting a GCP tensor
//! decomposition: an argmin-backed L-BFGS minimizer that dispatches on an
//! explicit backend (`lbfgs`), and a single error/result surface
//! (`errors::OptError`, `OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray` `Array1<f64>` aliases
//!   (`Theta`, `Grad`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors.
//! - Progress reporting is opt-in through the `obs_slog` feature; nothing
//!   else here performs I/O.
//!
//! Testing notes
//! -------------
//! - `errors`: conversions from argmin errors and round-tripping of caller
//!   errors.
//! - `lbfgs`: per-module unit tests plus end-to-end integration tests.

pub mod errors;
pub mod lbfgs;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use gcp_lbfgs::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::lbfgs::prelude::*;
}
