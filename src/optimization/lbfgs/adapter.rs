//! Adapter that exposes a user [`Objective`] as an `argmin` problem.
//!
//! The adapter owns the two policies that differ between backend strategies:
//! - **Bounds**: the loss is evaluated at the projection of `x` onto the box,
//!   and gradient components that would push an active coordinate out of
//!   the box are zeroed (projected-gradient heuristic).
//! - **Gradient source**: [`GradientPolicy::PreferAnalytic`] uses the
//!   caller's gradient when one is implemented; [`GradientPolicy::DeriveFromLoss`]
//!   always differentiates the loss numerically and never calls
//!   [`Objective::grad`].
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::{
        finite_diff::fd_gradient,
        traits::{Bounds, Objective},
        types::{Cost, Grad, Theta},
        validation::{validate_grad, validate_value},
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Where the adapter gets `∇f(x)` from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientPolicy {
    /// Caller's analytic gradient, finite differences when it is not implemented.
    PreferAnalytic,
    /// Finite differences of the loss, even when an analytic gradient exists.
    DeriveFromLoss,
}

/// Bridges a user [`Objective`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub bounds: Bounds,
    pub policy: GradientPolicy,
}

impl<'a, F: Objective> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user [`Objective`].
    pub fn new(f: &'a F, bounds: Bounds, policy: GradientPolicy) -> Self {
        Self { f, bounds, policy }
    }

    /// Loss at `x` (no projection), rejecting non-finite values.
    ///
    /// # Errors
    /// - Any error from [`Objective::value`].
    /// - [`OptError::NonFiniteCost`] if the loss is `NaN` or infinite.
    pub fn checked_value(&self, x: &Theta) -> OptResult<Cost> {
        let output = self.f.value(x)?;
        validate_value(output)?;
        Ok(output)
    }

    /// Loss at the projection of `x` onto the bounds.
    pub fn projected_value(&self, x: &Theta) -> OptResult<Cost> {
        self.checked_value(&self.bounds.project(x))
    }

    /// Gradient at the projection of `x`, honoring the gradient policy and
    /// projecting the result.
    ///
    /// # Errors
    /// - Caller errors from [`Objective::grad`] other than
    ///   `GradientNotImplemented`.
    /// - Errors raised by the loss during finite differencing.
    /// - Validation errors for wrong dimension or non-finite entries.
    pub fn projected_gradient(&self, x: &Theta) -> OptResult<Grad> {
        let projected = self.bounds.project(x);
        let mut grad = match self.policy {
            GradientPolicy::PreferAnalytic => match self.f.grad(&projected) {
                Ok(g) => {
                    validate_grad(&g, projected.len())?;
                    g
                }
                Err(OptError::GradientNotImplemented) => {
                    fd_gradient(&projected, |y| self.checked_value(y))?
                }
                Err(e) => return Err(e),
            },
            GradientPolicy::DeriveFromLoss => fd_gradient(&projected, |y| self.checked_value(y))?,
        };
        self.bounds.project_gradient(&projected, &mut grad);
        Ok(grad)
    }
}

impl<'a, F: Objective> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.projected_value(theta)?)
    }
}

impl<'a, F: Objective> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.projected_gradient(theta)?)
    }
}
