use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use husktrack_core::{ClientId, DomainError, FieldErrors, OrderId};
use husktrack_products::ProductSku;

/// Order status lifecycle: `To-do → In Progress → Completed`.
///
/// Forward-only in intended usage. The record itself does not prevent
/// arbitrary transitions; the coordinator routes `Completed` through the
/// atomic stock path and flags backward moves out of `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "to-do")]
    Todo,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Todo => "to-do",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `next` follows the intended
    /// forward-only lifecycle.
    pub fn is_forward_transition(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Todo, InProgress) | (Todo, Completed) | (InProgress, Completed)
        )
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-do" => Ok(OrderStatus::Todo),
            "in-progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(DomainError::validation(format!(
                "unknown order status '{other}' (expected: to-do, in-progress, completed)"
            ))),
        }
    }
}

/// Which book an order belongs to: local sales or exports.
///
/// The two channels share one record shape but live in separate collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderChannel {
    Local,
    Export,
}

impl OrderChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderChannel::Local => "local",
            OrderChannel::Export => "export",
        }
    }
}

impl core::fmt::Display for OrderChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales or export order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub channel: OrderChannel,
    pub client_id: ClientId,
    pub sku: ProductSku,
    pub quantity: i64,
    /// Price per unit, smallest currency unit.
    pub unit_price: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Order value, smallest currency unit.
    pub fn total_amount(&self) -> i64 {
        self.quantity.saturating_mul(self.unit_price)
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

/// Boundary input for creating an order, validated before any write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub client_id: ClientId,
    pub sku: ProductSku,
    pub quantity: i64,
    pub unit_price: i64,
}

impl NewOrder {
    pub fn into_order(
        self,
        id: OrderId,
        channel: OrderChannel,
        now: DateTime<Utc>,
    ) -> Result<Order, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.quantity <= 0 {
            errors.push("quantity", "quantity must be positive");
        }
        if self.unit_price <= 0 {
            errors.push("unit_price", "unit_price must be positive");
        }

        errors.into_result(Order {
            id,
            channel,
            client_id: self.client_id,
            sku: self.sku,
            quantity: self.quantity,
            unit_price: self.unit_price,
            status: OrderStatus::Todo,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_order(quantity: i64, unit_price: i64) -> NewOrder {
        NewOrder {
            client_id: ClientId::new(),
            sku: ProductSku::CocoPith,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn orders_start_in_todo() {
        let order = new_order(10, 900)
            .into_order(OrderId::new(), OrderChannel::Local, Utc::now())
            .unwrap();
        assert_eq!(order.status, OrderStatus::Todo);
        assert_eq!(order.total_amount(), 9_000);
    }

    #[test]
    fn non_positive_quantity_and_price_are_reported_per_field() {
        let err = new_order(0, -5)
            .into_order(OrderId::new(), OrderChannel::Export, Utc::now())
            .unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.get("quantity").is_some());
        assert!(err.get("unit_price").is_some());
    }

    #[test]
    fn lifecycle_is_forward_only() {
        use OrderStatus::*;
        assert!(Todo.is_forward_transition(InProgress));
        assert!(Todo.is_forward_transition(Completed));
        assert!(InProgress.is_forward_transition(Completed));

        assert!(!Completed.is_forward_transition(InProgress));
        assert!(!Completed.is_forward_transition(Todo));
        assert!(!InProgress.is_forward_transition(Todo));
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [OrderStatus::Todo, OrderStatus::InProgress, OrderStatus::Completed] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("done".parse::<OrderStatus>().is_err());
    }
}
