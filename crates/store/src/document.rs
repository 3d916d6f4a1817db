//! Collections and revisioned documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::StoreError;

/// The closed set of collections the application uses.
///
/// `Products` is additionally keyed by a fixed small set of well-known SKU
/// strings; every other collection is keyed by generated identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Clients,
    Products,
    LocalSales,
    Exports,
    CoconutPurchases,
    FinancialTransactions,
}

impl Collection {
    /// All collections, in declaration order.
    pub const ALL: [Collection; 6] = [
        Collection::Clients,
        Collection::Products,
        Collection::LocalSales,
        Collection::Exports,
        Collection::CoconutPurchases,
        Collection::FinancialTransactions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Products => "products",
            Collection::LocalSales => "local_sales",
            Collection::Exports => "exports",
            Collection::CoconutPurchases => "coconut_purchases",
            Collection::FinancialTransactions => "financial_transactions",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: id, monotonically increasing revision, JSON payload.
///
/// Revisions are assigned by the store on every successful write (starting at
/// 1) and are the basis for optimistic concurrency: a conditional write names
/// the revision it read, and the commit fails if the document has moved on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub revision: u64,
    pub payload: JsonValue,
}

impl Document {
    /// Deserialize the payload into a typed record.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            StoreError::Serialization(format!("document '{}': {}", self.id, e))
        })
    }
}
