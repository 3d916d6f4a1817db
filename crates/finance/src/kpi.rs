//! Dashboard KPI summary, derived freshly on each request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use husktrack_orders::Order;
use husktrack_products::{Product, ProductSku};

use crate::transaction::{clamp_amount, FinancialTransaction, TransactionKind};

/// The figures the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Positive magnitudes, smallest currency unit.
    pub total_income: i64,
    pub total_expenses: i64,
    /// `total_income - total_expenses` (may be negative).
    pub net: i64,
    /// Stock on hand per SKU.
    pub stock: BTreeMap<ProductSku, i64>,
    pub client_count: usize,
    /// Orders not yet completed, per channel.
    pub open_local_sales: usize,
    pub open_exports: usize,
}

impl KpiSummary {
    pub fn compute(
        products: &[Product],
        client_count: usize,
        local_sales: &[Order],
        exports: &[Order],
        transactions: &[FinancialTransaction],
    ) -> Self {
        let mut total_income = 0i128;
        let mut total_expenses = 0i128;
        for tx in transactions {
            match tx.kind {
                TransactionKind::Income => total_income += tx.magnitude() as i128,
                TransactionKind::Expense => total_expenses += tx.magnitude() as i128,
            }
        }

        let stock = products.iter().map(|p| (p.sku, p.stock)).collect();

        Self {
            total_income: clamp_amount(total_income),
            total_expenses: clamp_amount(total_expenses),
            net: clamp_amount(total_income - total_expenses),
            stock,
            client_count,
            open_local_sales: local_sales.iter().filter(|o| !o.is_completed()).count(),
            open_exports: exports.iter().filter(|o| !o.is_completed()).count(),
        }
    }
}
