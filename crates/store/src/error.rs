//! Store operation errors.

use thiserror::Error;

/// Store-level error.
///
/// These are **infrastructure** failures (concurrency, transport,
/// serialization) as opposed to domain errors (validation, invariants).
/// There is no automatic retry anywhere: a `Conflict` or `Unavailable` is
/// surfaced to the caller, who resubmits manually.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A revision expectation failed (concurrent write won the race).
    #[error("commit conflict: {0}")]
    Conflict(String),

    /// A document addressed by a conditional write does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A payload could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The backing store could not be reached or answered abnormally.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
