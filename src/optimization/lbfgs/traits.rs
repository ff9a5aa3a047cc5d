//! Public API surface for L-BFGS minimization.
//!
//! - [`Objective`]: trait callers implement for their loss (GCP loss over the
//!   flattened factor matrices, or anything else mapping `x` to a scalar).
//! - [`FnObjective`]: closure wrapper implementing [`Objective`].
//! - [`Bounds`]: the binary box constraint (unconstrained or non-negative).
//! - [`LbfgsOptions`], [`Tolerances`], [`LineSearcher`]: configuration.
//! - [`LbfgsOutcome`]: normalized `(x, error_history)` result shared by every
//!   backend strategy.
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, verify_norm, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use std::str::FromStr;

/// User-implemented loss interface.
///
/// Required:
/// - `value(&Theta) -> OptResult<Cost>`: evaluate the loss `f(x)`. Errors
///   returned here propagate unchanged out of [`lbfgs`](crate::optimization::lbfgs::lbfgs).
///
/// Optional:
/// - `grad(&Theta) -> OptResult<Grad>`: analytic gradient `∇f(x)`. When not
///   implemented, strategies that want a gradient fall back to finite
///   differences of `value`.
/// - `check(&Theta) -> OptResult<()>`: validation hook called once on `x0`
///   before any strategy runs.
pub trait Objective {
    // Required methods
    fn value(&self, x: &Theta) -> OptResult<Cost>;

    // Optional methods
    fn grad(&self, _x: &Theta) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn check(&self, _x: &Theta) -> OptResult<()> {
        Ok(())
    }
}

/// Plain function pointer used as the gradient type of a gradient-free
/// [`FnObjective`].
pub type NoGradient = fn(&Theta) -> OptResult<Grad>;

/// [`Objective`] built from a loss closure and an optional gradient closure.
///
/// ```ignore
/// let objective = FnObjective::new(|x: &Theta| Ok(x.dot(x)))
///     .with_gradient(|x: &Theta| Ok(x.mapv(|v| 2.0 * v)));
/// ```
pub struct FnObjective<L, G = NoGradient> {
    loss: L,
    gradient: Option<G>,
}

impl<L> FnObjective<L, NoGradient>
where
    L: Fn(&Theta) -> OptResult<Cost>,
{
    pub fn new(loss: L) -> Self {
        Self { loss, gradient: None }
    }
}

impl<L, G> FnObjective<L, G>
where
    L: Fn(&Theta) -> OptResult<Cost>,
    G: Fn(&Theta) -> OptResult<Grad>,
{
    /// Attach an analytic gradient.
    pub fn with_gradient<H>(self, gradient: H) -> FnObjective<L, H>
    where
        H: Fn(&Theta) -> OptResult<Grad>,
    {
        FnObjective { loss: self.loss, gradient: Some(gradient) }
    }

    pub fn has_gradient(&self) -> bool {
        self.gradient.is_some()
    }
}

impl<L, G> Objective for FnObjective<L, G>
where
    L: Fn(&Theta) -> OptResult<Cost>,
    G: Fn(&Theta) -> OptResult<Grad>,
{
    fn value(&self, x: &Theta) -> OptResult<Cost> {
        (self.loss)(x)
    }

    fn grad(&self, x: &Theta) -> OptResult<Grad> {
        match &self.gradient {
            Some(gradient) => gradient(x),
            None => Err(OptError::GradientNotImplemented),
        }
    }
}

/// Per-parameter box constraint.
///
/// Only two boxes exist: `(-∞, ∞)` and `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    #[default]
    Unconstrained,
    NonNegative,
}

impl Bounds {
    /// Distance from the lower bound under which a coordinate counts as active.
    pub const ACTIVE_EPS: f64 = 1e-12;

    pub fn from_non_negative(non_negative: bool) -> Self {
        if non_negative { Bounds::NonNegative } else { Bounds::Unconstrained }
    }

    pub fn is_constrained(self) -> bool {
        self == Bounds::NonNegative
    }

    pub fn lower(self) -> f64 {
        match self {
            Bounds::Unconstrained => f64::NEG_INFINITY,
            Bounds::NonNegative => 0.0,
        }
    }

    /// Human-readable constraint name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Bounds::Unconstrained => "unconstrained",
            Bounds::NonNegative => "non-negative",
        }
    }

    /// Clamp `x` into the box, returning a new vector.
    pub fn project(self, x: &Theta) -> Theta {
        match self {
            Bounds::Unconstrained => x.clone(),
            Bounds::NonNegative => x.mapv(|v| v.max(0.0)),
        }
    }

    /// Clamp `x` into the box in place.
    pub fn project_in_place(self, x: &mut Theta) {
        if let Bounds::NonNegative = self {
            x.mapv_inplace(|v| v.max(0.0));
        }
    }

    /// Zero the gradient components that would push an active coordinate
    /// further out of the box. `x` must already be projected.
    pub fn project_gradient(self, x: &Theta, grad: &mut Grad) {
        let lower = self.lower();
        if !lower.is_finite() {
            return;
        }
        for (g, &xi) in grad.iter_mut().zip(x.iter()) {
            if xi <= lower + Self::ACTIVE_EPS && *g > 0.0 {
                *g = 0.0;
            }
        }
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing accepts case-insensitive names (`"MoreThuente"`, `"HagerZhang"`).
/// Unknown names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearcher {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Convergence tolerances handed to each L-BFGS run.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
///
/// `None` leaves Argmin's default in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    pub fn new(tol_grad: Option<f64>, tol_cost: Option<f64>) -> OptResult<Self> {
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        Ok(Self { tol_grad, tol_cost })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-7), tol_cost: Some(1e-9) }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `max_iter`: iteration budget; what counts as an iteration depends on
///   the backend (see [`Backend`](crate::optimization::lbfgs::Backend)).
///   Zero is allowed and returns the starting point untouched.
/// - `bounds`: [`Bounds::NonNegative`] when the parameters must stay ≥ 0.
/// - `norm`: divisor applied to every recorded objective value; does not
///   change the trajectory.
/// - `tols`, `line_searcher`, `lbfgs_mem`: solver tuning.
/// - `verbose`: attaches the slog observer when built with `obs_slog`.
///
/// Default: `max_iter = 100`, unconstrained, `norm = 1.0`,
/// [`Tolerances::default`], More–Thuente, default memory, quiet.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOptions {
    pub max_iter: usize,
    pub bounds: Bounds,
    pub norm: f64,
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
}

impl LbfgsOptions {
    /// Options for a run of `max_iter` iterations with the given constraint
    /// and history divisor; solver tuning keeps its defaults.
    ///
    /// # Errors
    /// - [`OptError::InvalidNorm`] if `norm` is non-finite or ≤ 0.
    pub fn new(max_iter: usize, non_negative: bool, norm: f64) -> OptResult<Self> {
        verify_norm(norm)?;
        Ok(Self {
            max_iter,
            bounds: Bounds::from_non_negative(non_negative),
            norm,
            ..Self::default()
        })
    }

    pub fn with_tolerances(mut self, tols: Tolerances) -> Self {
        self.tols = tols;
        self
    }

    pub fn with_line_searcher(mut self, line_searcher: LineSearcher) -> Self {
        self.line_searcher = line_searcher;
        self
    }

    /// Override the L-BFGS history size.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `mem == 0`.
    pub fn with_lbfgs_mem(mut self, mem: usize) -> OptResult<Self> {
        if mem == 0 {
            return Err(OptError::InvalidLBFGSMem {
                mem,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        self.lbfgs_mem = Some(mem);
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Re-check every numeric field; the fields are public, so options may
    /// have been edited after construction.
    ///
    /// # Errors
    /// - `InvalidNorm`, `InvalidTolGrad`, `InvalidTolCost`, `InvalidLBFGSMem`.
    pub fn validate(&self) -> OptResult<()> {
        verify_norm(self.norm)?;
        verify_tol_grad(self.tols.tol_grad)?;
        verify_tol_cost(self.tols.tol_cost)?;
        if let Some(0) = self.lbfgs_mem {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(())
    }
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            max_iter: 100,
            bounds: Bounds::Unconstrained,
            norm: 1.0,
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: false,
        }
    }
}

/// Canonical result returned by every backend strategy.
///
/// - `x`: final parameter vector (fresh value; the caller's `x0` was moved in).
/// - `errors`: normalized objective values, one per completed iteration;
///   empty for backends without per-step introspection.
/// - `iterations`: iterations performed, in the backend's own unit.
/// - `converged`: `true` only if the last solver run reported convergence.
/// - `status`: human-readable termination status of the last solver run.
/// - `fn_evals`: function-evaluation counters summed over all solver runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOutcome {
    pub x: Theta,
    pub errors: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub status: String,
    pub fn_evals: FnEvalMap,
}

impl LbfgsOutcome {
    /// Build a validated [`LbfgsOutcome`] from raw solver results.
    ///
    /// # Errors
    /// - Propagates [`validate_theta_hat`] failures.
    pub fn new(
        x: Option<Theta>, errors: Vec<f64>, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let x = validate_theta_hat(x)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        Ok(Self { x, errors, iterations: iterations as usize, converged, status, fn_evals })
    }

    /// Outcome for a zero iteration budget: `x0` returned as given.
    pub fn unchanged(x0: Theta) -> Self {
        Self {
            x: x0,
            errors: Vec::new(),
            iterations: 0,
            converged: false,
            status: "Iteration budget is zero".to_string(),
            fn_evals: FnEvalMap::new(),
        }
    }

    /// Split into the `(x_final, error_history)` pair.
    pub fn into_parts(self) -> (Theta, Vec<f64>) {
        (self.x, self.errors)
    }
}
