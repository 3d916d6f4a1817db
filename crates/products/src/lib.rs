//! `husktrack-products`
//!
//! **Responsibility:** the fixed product catalog and the stock invariant.
//!
//! Products are keyed by a closed set of well-known SKUs, are never deleted,
//! and their stock quantity is mutated only through stock-adjustment
//! operations coordinated by `husktrack-ledger`.

pub mod product;

pub use product::{Product, ProductSku};
