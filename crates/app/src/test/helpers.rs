//! Test Helpers

use std::time::Duration;

use async_trait::async_trait;
use cartwheel::items::NewLineItem;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::store::{Document, DocumentStore, MemoryDocumentStore, StoreError};

/// A titled line item at the given decimal price.
pub(crate) fn item(id: u64, price: &str) -> NewLineItem {
    let price: Decimal = price.parse().expect("test prices should parse");

    NewLineItem::new(id, price).with_title(format!("Product {id}"))
}

/// Memory store that waits before every call, for exercising deadlines.
#[derive(Debug, Clone)]
pub(crate) struct SlowDocumentStore {
    inner: MemoryDocumentStore,
    delay: Duration,
}

impl SlowDocumentStore {
    pub(crate) fn new(inner: MemoryDocumentStore, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl DocumentStore for SlowDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(collection, id).await
    }

    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(collection, id, document).await
    }

    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.set_field(collection, id, field, value).await
    }
}
