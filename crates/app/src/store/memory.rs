//! In-process document store.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, StoreError};

type Key = (String, String);

/// Document store kept in process memory.
///
/// Clones share the same documents, so two services built from clones of one
/// store see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<FxHashMap<Key, Document>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(collection: &str, id: &str) -> Key {
    (collection.to_string(), id.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(&key(collection, id)).cloned())
    }

    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let key = key(collection, id);

        if documents.contains_key(&key) {
            return Err(StoreError::AlreadyExists);
        }

        documents.insert(key, document);

        Ok(())
    }

    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;

        let document = documents
            .get_mut(&key(collection, id))
            .ok_or(StoreError::NotFound)?;

        document.insert(field.to_string(), value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[tokio::test]
    async fn get_missing_returns_none() -> TestResult {
        let store = MemoryDocumentStore::new();

        assert!(store.get("users", "nobody").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_then_get() -> TestResult {
        let store = MemoryDocumentStore::new();

        store
            .create("users", "u1", doc(json!({ "email": "a@gmail.com" })))
            .await?;

        let found = store.get("users", "u1").await?;

        assert_eq!(
            found.and_then(|d| d.get("email").cloned()),
            Some(json!("a@gmail.com"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_twice_returns_already_exists() -> TestResult {
        let store = MemoryDocumentStore::new();

        store.create("users", "u1", Document::new()).await?;
        let result = store.create("users", "u1", Document::new()).await;

        assert!(
            matches!(result, Err(StoreError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn collections_are_separate() -> TestResult {
        let store = MemoryDocumentStore::new();

        store.create("users", "u1", Document::new()).await?;

        assert!(store.get("carts", "u1").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn set_field_replaces_only_that_field() -> TestResult {
        let store = MemoryDocumentStore::new();

        store
            .create("users", "u1", doc(json!({ "email": "a@gmail.com", "cart": [1] })))
            .await?;
        store.set_field("users", "u1", "cart", json!([2, 3])).await?;

        let found = store.get("users", "u1").await?.unwrap_or_default();

        assert_eq!(found.get("cart"), Some(&json!([2, 3])));
        assert_eq!(found.get("email"), Some(&json!("a@gmail.com")));

        Ok(())
    }

    #[tokio::test]
    async fn set_field_on_missing_document_returns_not_found() {
        let store = MemoryDocumentStore::new();

        let result = store.set_field("users", "ghost", "cart", json!([])).await;

        assert!(
            matches!(result, Err(StoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clones_share_documents() -> TestResult {
        let store = MemoryDocumentStore::new();
        let other = store.clone();

        store.create("users", "u1", Document::new()).await?;

        assert!(other.get("users", "u1").await?.is_some());

        Ok(())
    }
}
