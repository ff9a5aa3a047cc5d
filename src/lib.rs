//! gcp_lbfgs — backend-dispatching L-BFGS for GCP tensor decomposition.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and, with the `python-bindings`
//! feature, as the PyO3 bridge exposing the optimizer to Python through the
//! `_gcp_lbfgs` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the optimization layer (`optimization::lbfgs`,
//!   `optimization::errors`) as the public crate surface.
//! - Define the `lbfgs` `#[pyfunction]` and the `#[pymodule]` initializer
//!   for `_gcp_lbfgs`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in `optimization`; this file performs only FFI
//!   glue, input conversion and error mapping.
//! - Python callables passed as `loss`/`gradient` are wrapped in
//!   [`utils::PyObjective`]; their exceptions come back as `ValueError`.
//!
//! Conventions
//! -----------
//! - The Python signature mirrors the GCP driver:
//!   `lbfgs(loss, x0, gradient=None, n_iter_max=100, non_negative=False,
//!   norm=1.0, backend="reference")` returning `(numpy.ndarray, list)`.
//! - Errors from core Rust code are `OptError` internally and are converted
//!   to `PyErr` only at the PyO3 boundary.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in `optimization` and by the
//!   integration tests under `tests/`.

pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{PyArray1, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::lbfgs::{Backend, LbfgsOptions, lbfgs},
    utils::{PyObjective, extract_theta},
};

/// Minimize a Python loss with L-BFGS on the named backend.
///
/// Parameters
/// ----------
/// - `loss`: callable `loss(x: numpy.ndarray) -> float`.
/// - `x0`: 1-D array-like of `float64` starting values.
/// - `gradient`: optional callable `gradient(x) -> numpy.ndarray`; only the
///   `reference` and `graph` backends consult it.
/// - `n_iter_max`: iteration budget (`0` returns `x0` untouched).
/// - `non_negative`: keep every component `≥ 0` (`reference`/`autodiff`
///   only).
/// - `norm`: positive divisor applied to every recorded loss value.
/// - `backend`: backend name or alias (`numpy`, `pytorch`, `tensorflow`,
///   `jax`, `mxnet`).
///
/// Returns
/// -------
/// `(x_final, error_history)` as `(numpy.ndarray, list[float])`.
///
/// Errors
/// ------
/// - `ValueError` for unknown backends, unsupported constraints, invalid
///   options, exceptions raised by `loss`/`gradient`, and solver failures.
/// - `TypeError` if `x0` is not a 1-D float array-like.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "lbfgs")]
#[pyo3(
    text_signature = "(loss, x0, gradient=None, n_iter_max=100, non_negative=False, norm=1.0, backend='reference')",
    signature = (loss, x0, gradient = None, n_iter_max = 100, non_negative = false, norm = 1.0, backend = "reference")
)]
#[allow(clippy::too_many_arguments)]
pub fn py_lbfgs<'py>(
    py: Python<'py>, loss: Bound<'py, PyAny>, x0: &Bound<'py, PyAny>,
    gradient: Option<Bound<'py, PyAny>>, n_iter_max: usize, non_negative: bool, norm: f64,
    backend: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Vec<f64>)> {
    let backend: Backend = backend.parse()?;
    let opts = LbfgsOptions::new(n_iter_max, non_negative, norm)?;
    let x0 = extract_theta(py, x0)?;
    let objective = PyObjective::new(loss, gradient);

    let (x, errors) = lbfgs(backend, &objective, x0, &opts)?.into_parts();
    Ok((x.to_pyarray(py), errors))
}

/// `_gcp_lbfgs` — PyO3 module initializer.
///
/// Registers [`py_lbfgs`] as `lbfgs` and the list of canonical backend
/// names as `BACKENDS`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _gcp_lbfgs<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_lbfgs, m)?)?;
    let names: Vec<&'static str> = Backend::ALL.iter().map(|b| b.name()).collect();
    m.add("BACKENDS", names)?;
    Ok(())
}
