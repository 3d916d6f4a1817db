//! Coordinator error taxonomy: validation (field-by-field), missing
//! preconditions, consistency violations (with the exact shortfall), and
//! transport/contention failures. Everything is caught at the operation
//! boundary; nothing propagates as an unhandled fault.

use thiserror::Error;

use husktrack_core::{DomainError, FieldErrors};
use husktrack_store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or missing input, reported field-by-field before any write.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// A referenced client/product/order does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Completing the operation would take stock negative. Names the exact
    /// available quantity so the caller can show the shortfall.
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    /// A concurrent update won the race; no writes were applied. The caller
    /// retries manually (no automatic retry).
    #[error("operation conflicted with a concurrent update: {0}")]
    Conflict(String),

    /// Domain invariant failure outside the insufficient-stock case.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store failed for infrastructure reasons.
    #[error("operation failed: {0}")]
    Store(StoreError),
}

impl From<FieldErrors> for LedgerError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Store(other),
        }
    }
}
