//! lbfgs::backend — the closed set of numerical backends and the dispatcher.
//!
//! Purpose
//! -------
//! Model the array backends a GCP fit can run on as a closed enum, and route
//! a minimization request to the matching strategy. The backend is always an
//! explicit argument; nothing here reads process-wide state.
//!
//! Key behaviors
//! -------------
//! - [`Backend::minimize`] fails fast, in this order:
//!   1. `Distributed` → [`OptError::NoLbfgsForBackend`];
//!   2. `NonNegative` on a backend that cannot enforce it →
//!      [`OptError::UnsupportedConstraint`];
//!   3. invalid options or starting point → the matching validation error;
//!   4. [`Objective::check`] failures.
//! - A zero iteration budget returns `x0` (projected onto the bounds) with an
//!   empty history, without touching the solver.
//! - Otherwise the request is forwarded to the strategy module of the
//!   backend (see [`strategies`](crate::optimization::lbfgs::strategies)).
//!
//! Conventions
//! -----------
//! - Names parse case-insensitively: the canonical names plus the usual
//!   array-library aliases (`numpy`, `pytorch`/`torch`, `tensorflow`, `jax`,
//!   `mxnet`).
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::{
        strategies::{accelerated, autodiff, graph, reference},
        traits::{LbfgsOptions, LbfgsOutcome, Objective},
        types::Theta,
        validation::validate_x0,
    },
};
use std::fmt;
use std::str::FromStr;

/// Numerical backend a minimization runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// General-purpose numeric arrays; bound-aware L-BFGS with exact history.
    Reference,
    /// Reverse-mode autodiff tensors; manual loop of strong-Wolfe steps.
    Autodiff,
    /// Graph-compiled tensors; manual loop of single-iteration solves.
    Graph,
    /// Accelerated arrays; one opaque solve, no history.
    Accelerated,
    /// Distributed deep-learning arrays; no L-BFGS available.
    Distributed,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::Reference,
        Backend::Autodiff,
        Backend::Graph,
        Backend::Accelerated,
        Backend::Distributed,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Reference => "reference",
            Backend::Autodiff => "autodiff",
            Backend::Graph => "graph",
            Backend::Accelerated => "accelerated",
            Backend::Distributed => "distributed",
        }
    }

    pub fn has_lbfgs(self) -> bool {
        self != Backend::Distributed
    }

    /// Whether `Bounds::NonNegative` is enforced on this backend.
    pub fn supports_non_negative(self) -> bool {
        matches!(self, Backend::Reference | Backend::Autodiff)
    }

    /// Whether [`Objective::grad`] is consulted on this backend.
    ///
    /// A gradient attached to an objective only matters on backends where
    /// this is `true`; elsewhere it is derived from the loss.
    ///
    /// ```
    /// use gcp_lbfgs::optimization::lbfgs::{Backend, FnObjective, Theta};
    ///
    /// let objective = FnObjective::new(|x: &Theta| Ok(x.dot(x)))
    ///     .with_gradient(|x: &Theta| Ok(x.mapv(|v| 2.0 * v)));
    /// assert!(objective.has_gradient());
    ///
    /// let consulted: Vec<Backend> =
    ///     Backend::ALL.into_iter().filter(|b| b.uses_external_gradient()).collect();
    /// assert_eq!(consulted, [Backend::Reference, Backend::Graph]);
    /// ```
    pub fn uses_external_gradient(self) -> bool {
        matches!(self, Backend::Reference | Backend::Graph)
    }

    /// Whether the outcome carries a per-iteration error history.
    pub fn records_history(self) -> bool {
        matches!(self, Backend::Reference | Backend::Autodiff | Backend::Graph)
    }

    /// Minimize `objective` from `x0` on this backend.
    ///
    /// # Errors
    /// - [`OptError::NoLbfgsForBackend`] for `Distributed`.
    /// - [`OptError::UnsupportedConstraint`] for `NonNegative` on `Graph` or
    ///   `Accelerated`.
    /// - Option and starting-point validation errors.
    /// - Caller, solver and validation errors from the strategy.
    pub fn minimize<F: Objective>(
        self, objective: &F, x0: Theta, opts: &LbfgsOptions,
    ) -> OptResult<LbfgsOutcome> {
        if !self.has_lbfgs() {
            return Err(OptError::NoLbfgsForBackend { backend: self.name() });
        }
        if opts.bounds.is_constrained() && !self.supports_non_negative() {
            return Err(OptError::UnsupportedConstraint {
                backend: self.name(),
                constraint: opts.bounds.label(),
            });
        }
        opts.validate()?;
        validate_x0(&x0)?;
        objective.check(&x0)?;
        if opts.max_iter == 0 {
            return Ok(LbfgsOutcome::unchanged(opts.bounds.project(&x0)));
        }

        match self {
            Backend::Reference => reference::minimize(objective, x0, opts),
            Backend::Autodiff => autodiff::minimize(objective, x0, opts),
            Backend::Graph => graph::minimize(objective, x0, opts),
            Backend::Accelerated => accelerated::minimize(objective, x0, opts),
            Backend::Distributed => Err(OptError::NoLbfgsForBackend { backend: self.name() }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reference" | "numpy" => Ok(Backend::Reference),
            "autodiff" | "pytorch" | "torch" => Ok(Backend::Autodiff),
            "graph" | "tensorflow" => Ok(Backend::Graph),
            "accelerated" | "jax" => Ok(Backend::Accelerated),
            "distributed" | "mxnet" => Ok(Backend::Distributed),
            _ => Err(OptError::UnknownBackend { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::lbfgs::traits::FnObjective;
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Name parsing, aliases and `Display`.
    // - The fail-fast order of `Backend::minimize`.
    // - The zero-budget shortcut on every executable backend.
    //
    // They intentionally DO NOT cover:
    // - Strategy numerics; see the strategy modules and integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Canonical names and aliases parse; `Display` round-trips the
    // canonical name.
    //
    // Given
    // -----
    // - Every backend's canonical name, a few aliases, and `"cupy"`.
    //
    // Expect
    // ------
    // - Canonical names and aliases map to the right variant.
    // - `"cupy"` is `UnknownBackend`.
    fn names_and_aliases_parse() {
        // Act / Assert
        for backend in Backend::ALL {
            assert_eq!(backend.to_string().parse::<Backend>(), Ok(backend));
        }
        assert_eq!("NumPy".parse::<Backend>(), Ok(Backend::Reference));
        assert_eq!("torch".parse::<Backend>(), Ok(Backend::Autodiff));
        assert_eq!(" tensorflow ".parse::<Backend>(), Ok(Backend::Graph));
        assert_eq!("JAX".parse::<Backend>(), Ok(Backend::Accelerated));
        assert_eq!("mxnet".parse::<Backend>(), Ok(Backend::Distributed));
        assert_eq!(
            "cupy".parse::<Backend>(),
            Err(OptError::UnknownBackend { name: "cupy".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // The distributed backend fails before the loss is ever evaluated.
    //
    // Given
    // -----
    // - A loss that counts its calls.
    //
    // Expect
    // ------
    // - `NoLbfgsForBackend` and zero loss calls.
    fn distributed_backend_fails_without_evaluating_loss() {
        // Arrange
        let calls = Cell::new(0usize);
        let objective = FnObjective::new(|x: &Theta| {
            calls.set(calls.get() + 1);
            Ok(x.dot(x))
        });

        // Act
        let result =
            Backend::Distributed.minimize(&objective, array![1.0], &LbfgsOptions::default());

        // Assert
        assert_eq!(result, Err(OptError::NoLbfgsForBackend { backend: "distributed" }));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Non-negativity is refused where it cannot be enforced and accepted
    // where it can.
    //
    // Given
    // -----
    // - Non-negative options on every executable backend.
    //
    // Expect
    // ------
    // - `Graph` and `Accelerated` return `UnsupportedConstraint`.
    // - `Reference` and `Autodiff` succeed.
    fn non_negative_is_refused_where_unsupported() {
        // Arrange
        let objective = FnObjective::new(|x: &Theta| Ok(x.dot(x)));
        let opts = LbfgsOptions::new(5, true, 1.0).expect("options should be valid");

        // Act / Assert
        for backend in [Backend::Graph, Backend::Accelerated] {
            assert!(!backend.supports_non_negative());
            assert!(matches!(
                backend.minimize(&objective, array![1.0], &opts),
                Err(OptError::UnsupportedConstraint { .. })
            ));
        }
        for backend in [Backend::Reference, Backend::Autodiff] {
            assert!(backend.supports_non_negative());
            assert!(backend.minimize(&objective, array![1.0], &opts).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // A zero budget returns the starting point and an empty history on every
    // executable backend, without evaluating the loss.
    //
    // Given
    // -----
    // - `max_iter = 0`, `x0 = [0.5, -1.5]`, a call-counting loss.
    //
    // Expect
    // ------
    // - `x == x0`, `errors` empty, zero loss calls.
    fn zero_budget_returns_x0_untouched() {
        // Arrange
        let calls = Cell::new(0usize);
        let objective = FnObjective::new(|x: &Theta| {
            calls.set(calls.get() + 1);
            Ok(x.dot(x))
        });
        let opts = LbfgsOptions::new(0, false, 1.0).expect("options should be valid");
        let x0 = array![0.5, -1.5];

        for backend in Backend::ALL.into_iter().filter(|b| b.has_lbfgs()) {
            // Act
            let out = backend.minimize(&objective, x0.clone(), &opts).expect("zero budget");

            // Assert
            assert_eq!(out.x, x0);
            assert!(out.errors.is_empty());
            assert_eq!(out.iterations, 0);
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Options edited after construction are re-validated.
    //
    // Given
    // -----
    // - Default options with `norm` overwritten to `-1`.
    //
    // Expect
    // ------
    // - `InvalidNorm` from the reference backend.
    fn edited_options_are_revalidated() {
        // Arrange
        let objective = FnObjective::new(|x: &Theta| Ok(x.dot(x)));
        let mut opts = LbfgsOptions::default();
        opts.norm = -1.0;

        // Act
        let result = Backend::Reference.minimize(&objective, array![1.0], &opts);

        // Assert
        assert!(matches!(result, Err(OptError::InvalidNorm { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Capability flags describe each backend.
    //
    // Given
    // -----
    // - All five backends.
    //
    // Expect
    // ------
    // - Only `Reference`/`Graph` use an external gradient; only
    //   `Accelerated` and `Distributed` lack history.
    fn capability_flags_match_strategies() {
        // Act / Assert
        assert!(Backend::Reference.uses_external_gradient());
        assert!(Backend::Graph.uses_external_gradient());
        assert!(!Backend::Autodiff.uses_external_gradient());
        assert!(!Backend::Accelerated.uses_external_gradient());
        assert!(!Backend::Accelerated.records_history());
        assert!(!Backend::Distributed.records_history());
        assert!(!Backend::Distributed.has_lbfgs());
    }
}
