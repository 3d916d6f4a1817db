//! Report-row assembly for the external PDF renderer.
//!
//! Rendering itself is out of scope; this module only filters the ledger to a
//! date range and shapes rows the renderer consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transaction::{clamp_amount, FinancialTransaction, TransactionKind};

/// Inclusive date range for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReportRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && at <= self.to
    }
}

/// One transaction-like row in the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: DateTime<Utc>,
    pub category: String,
    pub description: String,
    /// Signed amount, smallest currency unit.
    pub amount: i64,
}

/// Everything the PDF collaborator needs: title, range, rows, totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub range: ReportRange,
    pub rows: Vec<ReportRow>,
    pub total_income: i64,
    pub total_expenses: i64,
}

impl ReportData {
    /// Filter `transactions` to the range and shape them into rows, oldest
    /// first.
    pub fn assemble(
        title: impl Into<String>,
        range: ReportRange,
        transactions: &[FinancialTransaction],
    ) -> Self {
        let mut in_range: Vec<&FinancialTransaction> = transactions
            .iter()
            .filter(|tx| range.contains(tx.occurred_at))
            .collect();
        in_range.sort_by_key(|tx| tx.occurred_at);

        let mut total_income = 0i128;
        let mut total_expenses = 0i128;
        let rows = in_range
            .into_iter()
            .map(|tx| {
                match tx.kind {
                    TransactionKind::Income => total_income += tx.magnitude() as i128,
                    TransactionKind::Expense => total_expenses += tx.magnitude() as i128,
                }
                ReportRow {
                    date: tx.occurred_at,
                    category: tx.category.clone(),
                    description: tx.description.clone(),
                    amount: tx.amount,
                }
            })
            .collect();

        Self {
            title: title.into(),
            range,
            rows,
            total_income: clamp_amount(total_income),
            total_expenses: clamp_amount(total_expenses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use husktrack_core::TransactionId;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap()
    }

    #[test]
    fn rows_are_filtered_to_range_and_sorted() {
        let txs = vec![
            FinancialTransaction::income(TransactionId::new(), 300, "Coco Pith", "", at(2026, 6, 20)),
            FinancialTransaction::expense(TransactionId::new(), 100, "Transport", "", at(2026, 6, 5)),
            FinancialTransaction::income(TransactionId::new(), 999, "Coir Fiber", "", at(2026, 8, 1)),
        ];

        let range = ReportRange {
            from: at(2026, 6, 1),
            to: at(2026, 6, 30),
        };
        let report = ReportData::assemble("June ledger", range, &txs);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].category, "Transport");
        assert_eq!(report.rows[1].category, "Coco Pith");
        assert_eq!(report.total_income, 300);
        assert_eq!(report.total_expenses, 100);
    }
}
