//! `husktrack-purchasing`
//!
//! **Responsibility:** coconut purchase records (stock intake) and their
//! boundary validation. The paired stock increment and expense entry are
//! applied atomically by `husktrack-ledger`.

pub mod purchase;

pub use purchase::{NewPurchase, PaymentStatus, Purchase};
