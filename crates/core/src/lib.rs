//! `husktrack-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use id::{ClientId, OrderId, PurchaseId, TransactionId};
pub use validation::FieldErrors;
