//! Remote document store
//!
//! The store holds one JSON document per key inside a named collection. Writes
//! never merge: [`DocumentStore::set_field`] replaces a whole top-level field,
//! so concurrent writers to the same field resolve as last write wins.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use serde_json::{Map, Value};

mod errors;
mod http;
mod memory;

pub use errors::StoreError;
pub use http::{HttpDocumentStore, HttpStoreConfig};
pub use memory::MemoryDocumentStore;

/// A stored JSON document.
pub type Document = Map<String, Value>;

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create a document that must not already exist.
    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<(), StoreError>;

    /// Replace one top-level field of an existing document.
    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError>;
}

/// Run a store call under a deadline, turning an elapsed deadline into [`StoreError::Timeout`].
///
/// # Errors
///
/// Returns the call's own error, or [`StoreError::Timeout`] when the deadline passes first.
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_elapsed| StoreError::Timeout(deadline))?
}
