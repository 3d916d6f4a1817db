use serde::Serialize;
use std::sync::Arc;

use crate::document::{Collection, Document};
use crate::error::StoreError;

/// Optimistic concurrency expectation for one write, captured at read time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedRevision {
    /// Skip the check (plain, last-writer-wins update).
    Any,
    /// The document must not exist yet (insert).
    NoDocument,
    /// The document must still be at this exact revision.
    Revision(u64),
}

impl ExpectedRevision {
    pub fn matches(self, actual: Option<u64>) -> bool {
        match self {
            ExpectedRevision::Any => true,
            ExpectedRevision::NoDocument => actual.is_none(),
            ExpectedRevision::Revision(rev) => actual == Some(rev),
        }
    }
}

/// One write inside an atomic commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub collection: Collection,
    pub id: String,
    pub payload: serde_json::Value,
    pub expected: ExpectedRevision,
}

impl Write {
    /// Build a write from a typed record.
    pub fn put<T: Serialize>(
        collection: Collection,
        id: impl Into<String>,
        record: &T,
        expected: ExpectedRevision,
    ) -> Result<Self, StoreError> {
        let id = id.into();
        let payload = serde_json::to_value(record).map_err(|e| {
            StoreError::Serialization(format!("document '{id}': {e}"))
        })?;
        Ok(Self {
            collection,
            id,
            payload,
            expected,
        })
    }

    /// Insert: the document must not exist yet.
    pub fn insert<T: Serialize>(
        collection: Collection,
        id: impl Into<String>,
        record: &T,
    ) -> Result<Self, StoreError> {
        Self::put(collection, id, record, ExpectedRevision::NoDocument)
    }
}

/// Transactional key-document store.
///
/// Collections of revisioned JSON documents plus one atomic multi-write
/// `commit`. The commit is the host database's transaction primitive: every
/// write carries an [`ExpectedRevision`] captured when the caller read the
/// document, all expectations are validated against current state, and either
/// **all** writes apply or none do. A failed expectation is a
/// [`StoreError::Conflict`] and leaves no partial writes visible.
///
/// Isolation holds per commit against concurrent commits touching the same
/// documents; no ordering guarantee exists across different documents or
/// across plain (`ExpectedRevision::Any`) writes racing reads elsewhere.
///
/// Implementations must:
/// - validate every expectation before applying anything (all or nothing),
/// - assign revisions monotonically per document (starting at 1),
/// - never retry internally (callers resubmit manually).
pub trait DocumentStore: Send + Sync {
    /// Read one document.
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;

    /// Read a whole collection (order unspecified).
    fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    /// Apply a batch of conditional writes atomically.
    fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError>;

    /// Delete every document in a collection. Best-effort batch; not part of
    /// any cross-collection transaction. Returns the number deleted.
    fn clear(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Plain unconditional single-document write (no revision check).
    fn put_plain(
        &self,
        collection: Collection,
        id: &str,
        payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.commit(vec![Write {
            collection,
            id: id.to_string(),
            payload,
            expected: ExpectedRevision::Any,
        }])
    }
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).get(collection, id)
    }

    fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        (**self).list(collection)
    }

    fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        (**self).commit(writes)
    }

    fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        (**self).clear(collection)
    }
}
