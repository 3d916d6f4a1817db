//! `husktrack-clients`
//!
//! **Responsibility:** client (customer/supplier) records and their boundary
//! validation. The cached aggregate fields here are informational only; they
//! are updated best-effort outside any transaction.

pub mod client;

pub use client::{Client, ClientKind, ContactInfo, NewClient};
