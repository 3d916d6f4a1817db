//! `husktrack-ai`
//!
//! **Responsibility:** the AI narrative-summary boundary.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on domain records (orders/purchases/etc); callers
//!   hand it plain snapshots.
//! - It must not mutate any state.
//! - The generator is opaque: plain text in, plain text out.

pub mod narrative;

pub use narrative::{
    FinanceSnapshot, MonthSnapshot, NarrativeError, NarrativeRequest, NarrativeSummary,
    TemplateGenerator, TextGenerator, build_prompt, summarize,
};
