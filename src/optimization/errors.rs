//! optimization::errors — unified error surface for the L-BFGS layer.
//!
//! Every fallible entry point in `optimization` returns [`OptResult<T>`].
//! Argmin errors are unpacked variant-by-variant; an [`OptError`] raised by a
//! caller's loss or gradient travels through argmin's boxed error type and is
//! recovered unchanged by [`From<Error> for OptError`].
use argmin::core::{ArgminError, Error};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- LbfgsOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Error-history divisor needs to be positive and finite.
    InvalidNorm {
        norm: f64,
        reason: &'static str,
    },

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Backend ----
    /// Backend name did not match any known backend.
    UnknownBackend {
        name: String,
    },

    /// Backend has no L-BFGS implementation.
    NoLbfgsForBackend {
        backend: &'static str,
    },

    /// Backend cannot enforce the requested bound constraint.
    UnsupportedConstraint {
        backend: &'static str,
        constraint: &'static str,
    },

    // ---- Initial parameters ----
    /// Initial parameter vector has no entries.
    EmptyParameters,

    /// Initial parameters must be finite.
    InvalidInitialParam {
        index: usize,
        value: f64,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    /// Caller-supplied loss or gradient failed.
    ObjectiveFailed {
        text: String,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    /// Error-history recorder could not be read back.
    HistoryUnavailable,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- LbfgsOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidNorm { norm, reason } => {
                write!(f, "Invalid error-history norm {norm}: {reason}")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Backend ----
            OptError::UnknownBackend { name } => {
                write!(f, "Unknown backend '{name}'")
            }
            OptError::NoLbfgsForBackend { backend } => {
                write!(f, "There is no L-BFGS method for the '{backend}' backend")
            }
            OptError::UnsupportedConstraint { backend, constraint } => {
                write!(f, "The '{backend}' backend cannot enforce a {constraint} constraint")
            }

            // ---- Initial parameters ----
            OptError::EmptyParameters => {
                write!(f, "Initial parameter vector is empty")
            }
            OptError::InvalidInitialParam { index, value } => {
                write!(f, "Invalid initial parameter at index {index}: {value}, must be finite")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::ObjectiveFailed { text } => {
                write!(f, "Objective evaluation failed: {text}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::HistoryUnavailable => {
                write!(f, "Error history could not be recovered from the observer")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own adapters or the caller's objective come back verbatim.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(format!("OptError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of `OptError` values that were boxed into argmin's `Error`.
    // - Mapping of argmin's own error kinds and foreign errors.
    // - `Display` payloads for the backend-related variants.
    //
    // They intentionally DO NOT cover:
    // - The `From<OptError> for PyErr` conversion, which needs the Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A caller error routed through argmin must come back unchanged.
    //
    // Given
    // -----
    // - `OptError::ObjectiveFailed` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Converting back yields the identical variant and payload.
    fn from_argmin_error_recovers_opt_error_verbatim() {
        // Arrange
        let original = OptError::ObjectiveFailed { text: "loss exploded".to_string() };
        let boxed: Error = original.clone().into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // Argmin's structured errors map onto the matching wrapper variant.
    //
    // Given
    // -----
    // - `ArgminError::ConditionViolated` boxed into `Error`.
    //
    // Expect
    // ------
    // - `OptError::ConditionViolated` carrying the same text.
    fn from_argmin_error_maps_condition_violated() {
        // Arrange
        let boxed: Error =
            ArgminError::ConditionViolated { text: "not a descent direction".to_string() }.into();

        // Act
        let mapped = OptError::from(boxed);

        // Assert
        assert_eq!(
            mapped,
            OptError::ConditionViolated { text: "not a descent direction".to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // Unknown error types fall back to `BackendError` with their message.
    //
    // Given
    // -----
    // - A plain message error built with `Error::msg`.
    //
    // Expect
    // ------
    // - `OptError::BackendError` whose text is the message.
    fn from_argmin_error_wraps_foreign_errors_as_backend_error() {
        // Arrange
        let boxed = Error::msg("line search diverged");

        // Act
        let mapped = OptError::from(boxed);

        // Assert
        assert_eq!(mapped, OptError::BackendError { text: "line search diverged".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Backend configuration errors name the backend in their message.
    //
    // Given
    // -----
    // - `NoLbfgsForBackend` and `UnsupportedConstraint` values.
    //
    // Expect
    // ------
    // - Both messages contain the backend name.
    fn display_names_backend_in_configuration_errors() {
        // Arrange
        let missing = OptError::NoLbfgsForBackend { backend: "distributed" };
        let unsupported =
            OptError::UnsupportedConstraint { backend: "graph", constraint: "non-negative" };

        // Act
        let missing_msg = missing.to_string();
        let unsupported_msg = unsupported.to_string();

        // Assert
        assert!(missing_msg.contains("distributed"));
        assert!(unsupported_msg.contains("graph"));
        assert!(unsupported_msg.contains("non-negative"));
    }
}
