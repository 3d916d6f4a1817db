//! `husktrack-store` — document-store abstraction.
//!
//! The hosted database is modeled as a transactional key-document store: six
//! named collections of revisioned JSON documents, plus one atomic multi-write
//! commit primitive. Callers receive an explicit store handle (no ambient
//! global connection); process entry points own lifecycle and seeding.

pub mod document;
pub mod error;
pub mod in_memory;
mod r#trait;

pub use document::{Collection, Document};
pub use error::StoreError;
pub use in_memory::InMemoryDocumentStore;
pub use r#trait::{DocumentStore, ExpectedRevision, Write};
