//! Executable L-BFGS strategies, one per backend that has an L-BFGS path.
//!
//! Every strategy shares the signature
//! `minimize(&F, Theta, &LbfgsOptions) -> OptResult<LbfgsOutcome>`, takes
//! `x0` by value and returns a fresh point. Input validation, the
//! zero-budget shortcut and the constraint-support check happen once in
//! [`Backend::minimize`](crate::optimization::lbfgs::Backend::minimize)
//! before any of these run.
//!
//! | strategy      | iteration unit              | gradient            | bounds          | history            |
//! |---------------|-----------------------------|---------------------|-----------------|--------------------|
//! | `reference`   | solver iteration            | analytic, else FD   | projected       | one per iteration  |
//! | `autodiff`    | step of 20 inner iterations | FD of the loss only | clamp per step  | pre-step loss      |
//! | `graph`       | one-iteration solve         | analytic, else FD   | not supported   | one per solve      |
//! | `accelerated` | solver iteration            | FD of the loss only | not supported   | always empty       |

pub mod accelerated;
pub mod autodiff;
pub mod graph;
pub mod reference;
