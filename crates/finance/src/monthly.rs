//! Monthly aggregation of ledger entries for charting and reporting.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::transaction::{clamp_amount, FinancialTransaction, TransactionKind};

/// Totals for one calendar month. Amounts are positive magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Calendar month, 1-12.
    pub month: u32,
    pub sales: i64,
    pub expenses: i64,
}

/// A finite, restartable sequence of twelve [`MonthTotals`].
///
/// Built freshly on each request with no caching: one pass buckets the
/// transactions by calendar month, then iteration yields months 1 through 12.
/// Summation is commutative, so input order never affects the totals.
#[derive(Debug, Clone)]
pub struct MonthlyBreakdown {
    // Buckets accumulate in i128; the yielded totals are narrowed back to
    // the serialized i64 domain, saturating at the bound.
    sales: [i128; 12],
    expenses: [i128; 12],
    next_month: usize,
}

impl MonthlyBreakdown {
    /// Bucket `transactions` falling in `year` by their calendar month.
    /// Entries outside the year are ignored.
    pub fn for_year(transactions: &[FinancialTransaction], year: i32) -> Self {
        let mut sales = [0i128; 12];
        let mut expenses = [0i128; 12];

        for tx in transactions {
            if tx.occurred_at.year() != year {
                continue;
            }
            let idx = (tx.occurred_at.month() - 1) as usize;
            match tx.kind {
                TransactionKind::Income => sales[idx] += tx.magnitude() as i128,
                TransactionKind::Expense => expenses[idx] += tx.magnitude() as i128,
            }
        }

        Self {
            sales,
            expenses,
            next_month: 0,
        }
    }

    /// Restart iteration from January.
    pub fn restart(&mut self) {
        self.next_month = 0;
    }

    /// (total income, total expenses) over the whole year, positive magnitudes.
    pub fn totals(&self) -> (i64, i64) {
        (
            clamp_amount(self.sales.iter().sum()),
            clamp_amount(self.expenses.iter().sum()),
        )
    }
}

impl Iterator for MonthlyBreakdown {
    type Item = MonthTotals;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_month >= 12 {
            return None;
        }
        let idx = self.next_month;
        self.next_month += 1;
        Some(MonthTotals {
            month: (idx + 1) as u32,
            sales: clamp_amount(self.sales[idx]),
            expenses: clamp_amount(self.expenses[idx]),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = 12 - self.next_month;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthlyBreakdown {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use husktrack_core::TransactionId;
    use proptest::prelude::*;

    fn tx(kind: TransactionKind, amount: i64, year: i32, month: u32) -> FinancialTransaction {
        let at = Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap();
        match kind {
            TransactionKind::Income => {
                FinancialTransaction::income(TransactionId::new(), amount, "test", "", at)
            }
            TransactionKind::Expense => {
                FinancialTransaction::expense(TransactionId::new(), amount, "test", "", at)
            }
        }
    }

    #[test]
    fn buckets_by_calendar_month() {
        let txs = vec![
            tx(TransactionKind::Income, 100, 2026, 1),
            tx(TransactionKind::Income, 250, 2026, 1),
            tx(TransactionKind::Expense, 40, 2026, 3),
            tx(TransactionKind::Income, 10, 2025, 1), // other year, ignored
        ];

        let months: Vec<MonthTotals> = MonthlyBreakdown::for_year(&txs, 2026).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].sales, 350);
        assert_eq!(months[0].expenses, 0);
        assert_eq!(months[2].expenses, 40);
        assert_eq!(months[6].sales, 0);
    }

    #[test]
    fn totals_saturate_near_the_i64_bound() {
        let txs = vec![
            tx(TransactionKind::Income, i64::MAX / 2, 2026, 1),
            tx(TransactionKind::Income, i64::MAX / 2, 2026, 2),
            tx(TransactionKind::Income, i64::MAX / 2, 2026, 3),
        ];

        let breakdown = MonthlyBreakdown::for_year(&txs, 2026);
        let (income, expenses) = breakdown.totals();
        assert_eq!(income, i64::MAX);
        assert_eq!(expenses, 0);
    }

    #[test]
    fn iteration_is_restartable() {
        let txs = vec![tx(TransactionKind::Income, 100, 2026, 5)];
        let mut breakdown = MonthlyBreakdown::for_year(&txs, 2026);

        assert_eq!(breakdown.by_ref().count(), 12);
        assert_eq!(breakdown.next(), None);

        breakdown.restart();
        let may = breakdown.nth(4).unwrap();
        assert_eq!(may.month, 5);
        assert_eq!(may.sales, 100);
    }

    proptest! {
        /// Per-month totals must sum to the full-set totals, and input order
        /// must not matter (commutativity of summation).
        #[test]
        fn monthly_totals_sum_to_full_set_in_any_order(
            entries in prop::collection::vec(
                (prop::bool::ANY, 1i64..1_000_000i64, 1u32..=12u32),
                0..40,
            )
        ) {
            let txs: Vec<FinancialTransaction> = entries
                .iter()
                .map(|&(is_income, amount, month)| {
                    let kind = if is_income {
                        TransactionKind::Income
                    } else {
                        TransactionKind::Expense
                    };
                    tx(kind, amount, 2026, month)
                })
                .collect();

            let mut reversed = txs.clone();
            reversed.reverse();

            let forward = MonthlyBreakdown::for_year(&txs, 2026);
            let backward = MonthlyBreakdown::for_year(&reversed, 2026);
            prop_assert_eq!(forward.totals(), backward.totals());

            let (income, expenses) = forward.totals();
            let expected_income: i64 = txs
                .iter()
                .filter(|t| t.kind == TransactionKind::Income)
                .map(|t| t.magnitude())
                .sum();
            let expected_expenses: i64 = txs
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense)
                .map(|t| t.magnitude())
                .sum();

            prop_assert_eq!(income, expected_income);
            prop_assert_eq!(expenses, expected_expenses);

            let month_sum: i64 = forward.clone().map(|m| m.sales).sum();
            prop_assert_eq!(month_sum, expected_income);
        }
    }
}
