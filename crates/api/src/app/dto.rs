use serde::Deserialize;

use husktrack_clients::{ClientKind, ContactInfo, NewClient};
use husktrack_core::{ClientId, FieldErrors};
use husktrack_finance::{NewTransaction, TransactionKind};
use husktrack_orders::{NewOrder, OrderStatus};
use husktrack_products::ProductSku;
use husktrack_purchasing::{NewPurchase, PaymentStatus};

// -------------------------
// Request DTOs
// -------------------------
//
// Ids and SKUs arrive as strings; parsing failures surface as per-field
// validation errors rather than opaque deserialization faults.

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub kind: ClientKind,
    pub contact: Option<ContactInfo>,
}

impl CreateClientRequest {
    pub fn into_input(self) -> NewClient {
        NewClient {
            name: self.name,
            kind: self.kind,
            contact: self.contact.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub client_id: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: i64,
}

impl CreateOrderRequest {
    pub fn into_input(self) -> Result<NewOrder, FieldErrors> {
        let mut errors = FieldErrors::new();
        let client_id = parse_client_id(&self.client_id, &mut errors);
        let sku = parse_sku(&self.sku, &mut errors);

        match (client_id, sku) {
            (Some(client_id), Some(sku)) => Ok(NewOrder {
                client_id,
                sku,
                quantity: self.quantity,
                unit_price: self.unit_price,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub supplier_id: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: i64,
    /// Defaults to `pending` when omitted.
    pub payment_status: Option<PaymentStatus>,
}

impl CreatePurchaseRequest {
    pub fn into_input(self) -> Result<NewPurchase, FieldErrors> {
        let mut errors = FieldErrors::new();
        let supplier_id = parse_supplier_id(&self.supplier_id, &mut errors);
        let sku = parse_sku(&self.sku, &mut errors);

        match (supplier_id, sku) {
            (Some(supplier_id), Some(sku)) => Ok(NewPurchase {
                supplier_id,
                sku,
                quantity: self.quantity,
                unit_price: self.unit_price,
                payment_status: self.payment_status.unwrap_or(PaymentStatus::Pending),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub kind: TransactionKind,
    pub amount: i64,
    pub category: String,
    pub description: Option<String>,
}

impl CreateTransactionRequest {
    pub fn into_input(self) -> NewTransaction {
        NewTransaction {
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn parse_status(&self) -> Result<OrderStatus, FieldErrors> {
        self.status.parse().map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.push(
                "status",
                format!(
                    "unknown status '{}' (expected: to-do, in-progress, completed)",
                    self.status
                ),
            );
            errors
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NarrativeRequestBody {
    pub question: String,
    /// Year the monthly context is built from; defaults to the current year.
    pub year: Option<i32>,
}

fn parse_client_id(raw: &str, errors: &mut FieldErrors) -> Option<ClientId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push("client_id", "invalid client id");
            None
        }
    }
}

fn parse_supplier_id(raw: &str, errors: &mut FieldErrors) -> Option<ClientId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push("supplier_id", "invalid supplier id");
            None
        }
    }
}

fn parse_sku(raw: &str, errors: &mut FieldErrors) -> Option<ProductSku> {
    match raw.parse() {
        Ok(sku) => Some(sku),
        Err(_) => {
            errors.push(
                "sku",
                format!("unknown product '{raw}' (expected: coir-fiber, coco-pith, husk-chips)"),
            );
            None
        }
    }
}
