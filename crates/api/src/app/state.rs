use std::sync::Arc;

use serde::de::DeserializeOwned;

use husktrack_ai::{TemplateGenerator, TextGenerator};
use husktrack_ledger::LedgerCoordinator;
use husktrack_products::Product;
use husktrack_store::{Collection, DocumentStore, InMemoryDocumentStore, StoreError};

/// Application services: the injected store handle behind the coordinator,
/// plus the text-generation collaborator.
///
/// The entry point owns store lifecycle: `new_in_memory` seeds the product
/// catalog so every well-known SKU has a document before the first request.
#[derive(Clone)]
pub struct AppServices {
    ledger: LedgerCoordinator<Arc<InMemoryDocumentStore>>,
    generator: Arc<dyn TextGenerator>,
}

impl AppServices {
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let store = Arc::new(InMemoryDocumentStore::new());

        for product in Product::catalog() {
            if store.get(Collection::Products, product.sku.as_str())?.is_none() {
                let payload = serde_json::to_value(&product)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                store.put_plain(Collection::Products, product.sku.as_str(), payload)?;
            }
        }

        Ok(Self {
            ledger: LedgerCoordinator::new(store),
            generator: Arc::new(TemplateGenerator),
        })
    }

    pub fn ledger(&self) -> &LedgerCoordinator<Arc<InMemoryDocumentStore>> {
        &self.ledger
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    /// Read a whole collection into typed records.
    pub fn list_records<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        self.ledger
            .store()
            .list(collection)?
            .iter()
            .map(|doc| doc.to_record())
            .collect()
    }

    /// Read one document into a typed record.
    pub fn get_record<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.ledger.store().get(collection, id)? {
            Some(doc) => Ok(Some(doc.to_record()?)),
            None => Ok(None),
        }
    }
}
