//! `husktrack-ledger` — the ledger-consistency coordinator.
//!
//! Applies a business event (purchase recorded, sale completed, export
//! completed) as a single all-or-nothing unit spanning a product's stock
//! quantity and the related documents, using the store's atomic commit. The
//! store handle is injected; this crate owns no connection lifecycle.

pub mod coordinator;
pub mod error;

pub use coordinator::{
    LedgerCoordinator, OrderCompletion, PurchaseReceipt, ResetSummary,
};
pub use error::LedgerError;
