//! Python-side conversion helpers for the `_gcp_lbfgs` extension.

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::{
        traits::Objective,
        types::{Cost, Grad, Theta},
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    ToPyArray, // &Array1 → PyArray
};

/// Borrow a contiguous 1-D `float64` view of `raw_data`, copying only when
/// the input is not already such an array (sequences, pandas objects, torch
/// tensors exposing `to_numpy`/`numpy`).
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    for method in ["to_numpy", "numpy"] {
        if let Ok(obj) = raw_data.call_method0(method) {
            if let Ok(converted) = obj.extract::<PyReadonlyArray1<f64>>() {
                if converted.as_slice().is_ok() {
                    return Ok(converted);
                }
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, tensor, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python 1-D array-like into an owned [`Theta`].
#[cfg(feature = "python-bindings")]
pub fn extract_theta<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Theta> {
    Ok(extract_f64_array(py, raw_data)?.as_array().to_owned())
}

/// [`Objective`] backed by Python callables.
///
/// `loss(x) -> float` is required; `gradient(x) -> array` is optional. Both
/// receive `x` as a fresh `numpy.ndarray`. Python exceptions are captured as
/// [`OptError::ObjectiveFailed`] carrying the exception's text.
#[cfg(feature = "python-bindings")]
pub struct PyObjective<'py> {
    loss: Bound<'py, PyAny>,
    gradient: Option<Bound<'py, PyAny>>,
}

#[cfg(feature = "python-bindings")]
impl<'py> PyObjective<'py> {
    pub fn new(loss: Bound<'py, PyAny>, gradient: Option<Bound<'py, PyAny>>) -> Self {
        Self { loss, gradient }
    }
}

#[cfg(feature = "python-bindings")]
fn objective_failed(err: PyErr) -> OptError {
    OptError::ObjectiveFailed { text: err.to_string() }
}

#[cfg(feature = "python-bindings")]
impl Objective for PyObjective<'_> {
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        let py = self.loss.py();
        self.loss
            .call1((x.to_pyarray(py),))
            .and_then(|out| out.extract::<f64>())
            .map_err(objective_failed)
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        let Some(gradient) = &self.gradient else {
            return Err(OptError::GradientNotImplemented);
        };
        let py = gradient.py();
        gradient
            .call1((x.to_pyarray(py),))
            .and_then(|out| extract_theta(py, &out))
            .map_err(objective_failed)
    }
}
