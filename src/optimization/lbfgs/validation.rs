//! Validation helpers for L-BFGS optimization.
//!
//! This module centralizes the consistency checks used across the
//! optimizer interface:
//!
//! - **Configuration checks**: [`verify_tol_grad`], [`verify_tol_cost`],
//!   [`verify_norm`] ensure numeric settings are finite and strictly
//!   positive when provided.
//! - **Initial parameters**: [`validate_x0`] rejects empty or non-finite
//!   starting points before any solver work happens.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Results**: [`validate_theta_hat`] and [`validate_value`] check the
//!   solver output.
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::types::{Grad, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance (for convergence).
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the divisor applied to every recorded objective value.
///
/// # Errors
/// Returns [`OptError::InvalidNorm`] if `norm` is non-finite or ≤ 0.0.
pub fn verify_norm(norm: f64) -> OptResult<()> {
    if !norm.is_finite() {
        return Err(OptError::InvalidNorm { norm, reason: "Norm must be finite." });
    }
    if norm <= 0.0 {
        return Err(OptError::InvalidNorm { norm, reason: "Norm must be positive." });
    }
    Ok(())
}

/// Validate the caller's starting point.
///
/// # Errors
/// - [`OptError::EmptyParameters`] if `x0` has no entries.
/// - [`OptError::InvalidInitialParam`] for the first non-finite entry.
pub fn validate_x0(x0: &Theta) -> OptResult<()> {
    if x0.is_empty() {
        return Err(OptError::EmptyParameters);
    }
    for (index, &value) in x0.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidInitialParam { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar loss value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
