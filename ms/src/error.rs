//! Store error types

use thiserror::Error;

/// Errors raised by stores and reducers
///
/// `InconsistentState` signals a logic defect (an intent applied to a state
/// variant it was never meant for) and is treated as fatal by the store.
/// Operational failures (network, backend) are not errors at this level;
/// they are modeled as ordinary state values by the domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Inconsistent state: expected {expected}, was {actual}")]
    InconsistentState { expected: String, actual: String },

    #[error("Store disconnected")]
    Disconnected,
}

impl StoreError {
    /// Build an inconsistent-state error from expected/actual variant names
    pub fn inconsistent(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        StoreError::InconsistentState {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this is a variant-guard violation
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, StoreError::InconsistentState { .. })
    }
}
