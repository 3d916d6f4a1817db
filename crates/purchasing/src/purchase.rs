use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use husktrack_core::{ClientId, FieldErrors, PurchaseId};
use husktrack_products::ProductSku;

/// Whether the supplier has been paid for a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

/// A coconut purchase: raw-material intake from a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub supplier_id: ClientId,
    pub sku: ProductSku,
    pub quantity: i64,
    /// Price per unit, smallest currency unit.
    pub unit_price: i64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Total cost, smallest currency unit. Recorded in the financial ledger
    /// as a negative (expense) amount.
    pub fn total_cost(&self) -> i64 {
        self.quantity.saturating_mul(self.unit_price)
    }
}

/// Boundary input for recording a purchase, validated before any write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub supplier_id: ClientId,
    pub sku: ProductSku,
    pub quantity: i64,
    pub unit_price: i64,
    pub payment_status: PaymentStatus,
}

impl NewPurchase {
    pub fn into_purchase(
        self,
        id: PurchaseId,
        now: DateTime<Utc>,
    ) -> Result<Purchase, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.quantity <= 0 {
            errors.push("quantity", "quantity must be positive");
        }
        if self.unit_price <= 0 {
            errors.push("unit_price", "unit_price must be positive");
        }

        errors.into_result(Purchase {
            id,
            supplier_id: self.supplier_id,
            sku: self.sku,
            quantity: self.quantity,
            unit_price: self.unit_price,
            payment_status: self.payment_status,
            created_at: now,
        })
    }
}
