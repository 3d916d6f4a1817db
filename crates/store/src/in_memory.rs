use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use crate::document::{Collection, Document};
use crate::error::StoreError;
use crate::r#trait::{DocumentStore, Write};

#[derive(Debug, Clone)]
struct Stored {
    revision: u64,
    payload: JsonValue,
}

/// In-memory transactional document store.
///
/// Intended for tests/dev. Holding the write lock across validate-then-apply
/// gives each commit read-then-conditional-write isolation, which is the
/// guarantee the hosted store's transaction primitive provides.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, HashMap<String, Stored>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(collections.get(&collection).and_then(|docs| {
            docs.get(id).map(|stored| Document {
                id: id.to_string(),
                revision: stored.revision,
                payload: stored.payload.clone(),
            })
        }))
    }

    fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, stored)| Document {
                        id: id.clone(),
                        revision: stored.revision,
                        payload: stored.payload.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        // Validate every expectation first; nothing is applied on failure.
        for w in &writes {
            let actual = collections
                .get(&w.collection)
                .and_then(|docs| docs.get(&w.id))
                .map(|stored| stored.revision);

            if !w.expected.matches(actual) {
                return Err(StoreError::Conflict(format!(
                    "{}/{}: expected {:?}, found {:?}",
                    w.collection, w.id, w.expected, actual
                )));
            }
        }

        for w in writes {
            let docs = collections.entry(w.collection).or_default();
            let next_revision = docs.get(&w.id).map(|s| s.revision + 1).unwrap_or(1);
            docs.insert(
                w.id,
                Stored {
                    revision: next_revision,
                    payload: w.payload,
                },
            );
        }

        Ok(())
    }

    fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(collections
            .get_mut(&collection)
            .map(|docs| {
                let n = docs.len() as u64;
                docs.clear();
                n
            })
            .unwrap_or(0))
    }
}
