//! Per-iteration error-history recorder.
//!
//! [`ErrorRecorder`] is an argmin observer that appends `cost / norm` after
//! every completed solver iteration. The executor owns the observer for the
//! duration of a run, so the history lives behind an `Arc<Mutex<_>>` and is
//! read back through [`ErrorHistory::take`] once the run returns.
use crate::optimization::{
    errors::{OptError, OptResult},
    lbfgs::types::LbfgsState,
};
use argmin::core::{Error, KV, observers::Observe};
use std::sync::{Arc, Mutex};

/// Shared handle to a recorded error history.
#[derive(Debug, Clone, Default)]
pub struct ErrorHistory {
    values: Arc<Mutex<Vec<f64>>>,
}

impl ErrorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one already-normalized value.
    pub fn push(&self, value: f64) -> OptResult<()> {
        let mut values = self.values.lock().map_err(|_| OptError::HistoryUnavailable)?;
        values.push(value);
        Ok(())
    }

    /// Drain the recorded values.
    pub fn take(&self) -> OptResult<Vec<f64>> {
        let mut values = self.values.lock().map_err(|_| OptError::HistoryUnavailable)?;
        Ok(std::mem::take(&mut *values))
    }
}

/// Observer appending `state.cost / norm` after each iteration.
#[derive(Debug, Clone)]
pub struct ErrorRecorder {
    history: ErrorHistory,
    norm: f64,
}

impl ErrorRecorder {
    /// `norm` is assumed validated (finite, > 0) by `LbfgsOptions`.
    pub fn new(history: ErrorHistory, norm: f64) -> Self {
        Self { history, norm }
    }
}

impl Observe<LbfgsState> for ErrorRecorder {
    fn observe_iter(&mut self, state: &LbfgsState, _kv: &KV) -> Result<(), Error> {
        self.history.push(state.get_cost() / self.norm)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmin::core::State;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Normalization of recorded costs by `norm`.
    // - Draining semantics of `ErrorHistory::take`.
    //
    // They intentionally DO NOT cover:
    // - Observer scheduling inside argmin's executor; see `run`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each observed iteration appends `cost / norm` to the shared history.
    //
    // Given
    // -----
    // - A recorder with `norm = 4` observing states with costs 8 and 2.
    //
    // Expect
    // ------
    // - History `[2.0, 0.5]`, then empty after draining.
    fn recorder_appends_normalized_cost() {
        // Arrange
        let history = ErrorHistory::new();
        let mut recorder = ErrorRecorder::new(history.clone(), 4.0);
        let first = LbfgsState::new().cost(8.0);
        let second = LbfgsState::new().cost(2.0);

        // Act
        recorder.observe_iter(&first, &KV::new()).expect("observe should succeed");
        recorder.observe_iter(&second, &KV::new()).expect("observe should succeed");

        // Assert
        assert_eq!(history.take(), Ok(vec![2.0, 0.5]));
        assert_eq!(history.take(), Ok(vec![]));
    }
}
