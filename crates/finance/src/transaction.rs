use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use husktrack_core::{FieldErrors, TransactionId};

/// Ledger entry kind. The sign convention follows the kind: income amounts
/// are positive, expense amounts negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A financial transaction.
///
/// Created as a side effect of purchase creation (expense) or entered
/// manually; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: TransactionId,
    /// Signed amount, smallest currency unit. Positive for income, negative
    /// for expense.
    pub amount: i64,
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Narrow an `i128` running total back to the serialized `i64` domain,
/// saturating at the bounds. Totals are accumulated in `i128` so no ledger,
/// however large, can overflow mid-sum.
pub(crate) fn clamp_amount(total: i128) -> i64 {
    total.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

impl FinancialTransaction {
    /// An income entry. `amount` is the positive magnitude.
    pub fn income(
        id: TransactionId,
        amount: i64,
        category: impl Into<String>,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            amount: amount.saturating_abs(),
            kind: TransactionKind::Income,
            category: category.into(),
            description: description.into(),
            occurred_at,
        }
    }

    /// An expense entry. `amount` is the positive magnitude; stored negated.
    pub fn expense(
        id: TransactionId,
        amount: i64,
        category: impl Into<String>,
        description: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            amount: -amount.saturating_abs(),
            kind: TransactionKind::Expense,
            category: category.into(),
            description: description.into(),
            occurred_at,
        }
    }

    /// Positive magnitude regardless of kind. Total for any stored amount,
    /// including documents written by other tooling.
    pub fn magnitude(&self) -> i64 {
        self.amount.saturating_abs()
    }
}

/// Boundary input for a manual ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    /// Positive magnitude; the sign is derived from `kind`.
    pub amount: i64,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl NewTransaction {
    pub fn into_transaction(
        self,
        id: TransactionId,
        now: DateTime<Utc>,
    ) -> Result<FinancialTransaction, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.amount <= 0 {
            errors.push("amount", "amount must be positive");
        }
        if self.category.trim().is_empty() {
            errors.push("category", "category cannot be empty");
        }
        // Validate before any arithmetic on the raw amount.
        if !errors.is_empty() {
            return Err(errors);
        }

        let tx = match self.kind {
            TransactionKind::Income => FinancialTransaction::income(
                id,
                self.amount,
                self.category.trim(),
                self.description,
                now,
            ),
            TransactionKind::Expense => FinancialTransaction::expense(
                id,
                self.amount,
                self.category.trim(),
                self.description,
                now,
            ),
        };

        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_is_stored_positive_and_expense_negative() {
        let now = Utc::now();
        let income = FinancialTransaction::income(TransactionId::new(), 900, "Coco Pith", "", now);
        let expense = FinancialTransaction::expense(TransactionId::new(), 500, "Coir Fiber", "", now);

        assert_eq!(income.amount, 900);
        assert_eq!(expense.amount, -500);
        assert_eq!(expense.magnitude(), 500);
    }

    #[test]
    fn manual_entry_derives_sign_from_kind() {
        let tx = NewTransaction {
            kind: TransactionKind::Expense,
            amount: 1_200,
            category: "Transport".to_string(),
            description: "lorry hire".to_string(),
        }
        .into_transaction(TransactionId::new(), Utc::now())
        .unwrap();

        assert_eq!(tx.amount, -1_200);
        assert_eq!(tx.kind, TransactionKind::Expense);
    }

    #[test]
    fn minimum_amount_is_rejected_without_panic() {
        let err = NewTransaction {
            kind: TransactionKind::Expense,
            amount: i64::MIN,
            category: "Transport".to_string(),
            description: String::new(),
        }
        .into_transaction(TransactionId::new(), Utc::now())
        .unwrap_err();

        assert!(err.get("amount").is_some());

        // The constructors themselves are total: the extreme magnitude
        // saturates instead of overflowing on negation.
        let tx = FinancialTransaction::expense(TransactionId::new(), i64::MIN, "x", "", Utc::now());
        assert_eq!(tx.amount, -i64::MAX);
    }

    #[test]
    fn zero_amount_and_blank_category_are_rejected() {
        let err = NewTransaction {
            kind: TransactionKind::Income,
            amount: 0,
            category: "  ".to_string(),
            description: String::new(),
        }
        .into_transaction(TransactionId::new(), Utc::now())
        .unwrap_err();

        assert_eq!(err.len(), 2);
    }
}
