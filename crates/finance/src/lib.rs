//! `husktrack-finance`
//!
//! **Responsibility:** the financial-transaction ledger and its read-side
//! projections: monthly breakdowns, dashboard KPIs, and report rows for the
//! external PDF renderer. Everything here is derived freshly from the record
//! set on each request; no caching.

pub mod kpi;
pub mod monthly;
pub mod report;
pub mod transaction;

pub use kpi::KpiSummary;
pub use monthly::{MonthTotals, MonthlyBreakdown};
pub use report::{ReportData, ReportRange, ReportRow};
pub use transaction::{FinancialTransaction, NewTransaction, TransactionKind};
