use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use husktrack_core::{ClientId, FieldErrors};

/// Client classification: local buyers vs international export customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    Local,
    International,
}

/// Contact information for a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Client record.
///
/// `total_sales` and `last_purchase` are cached aggregates for dashboards.
/// They are not recomputed transactionally and must never be used as a source
/// of truth; the ledger collections are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub kind: ClientKind,
    #[serde(default)]
    pub contact: ContactInfo,
    /// Cached lifetime sales value, smallest currency unit. Informational.
    #[serde(default)]
    pub total_sales: i64,
    /// Cached timestamp of the most recent order. Informational.
    #[serde(default)]
    pub last_purchase: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Bump the informational aggregates after an order was created.
    pub fn note_order(&mut self, amount: i64, at: DateTime<Utc>) {
        self.total_sales = self.total_sales.saturating_add(amount);
        self.last_purchase = Some(at);
    }
}

/// Boundary input for registering a client, validated before any write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub kind: ClientKind,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl NewClient {
    /// Field-by-field validation; on success produces the record to persist.
    pub fn into_client(self, id: ClientId, now: DateTime<Utc>) -> Result<Client, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "name cannot be empty");
        }
        if let Some(email) = self.contact.email.as_deref() {
            if !email.contains('@') {
                errors.push("email", "email must contain '@'");
            }
        }

        errors.into_result(Client {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind,
            contact: self.contact,
            total_sales: 0,
            last_purchase: None,
            created_at: now,
        })
    }
}
