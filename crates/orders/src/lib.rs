//! `husktrack-orders`
//!
//! **Responsibility:** sales and export order records and their status
//! lifecycle. The stock side effect of completing an order lives in
//! `husktrack-ledger`, not here; this crate only knows the rules.

pub mod order;

pub use order::{NewOrder, Order, OrderChannel, OrderStatus};
