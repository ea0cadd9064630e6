//! JSON-over-HTTP document store client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header::IF_NONE_MATCH};
use serde_json::Value;
use tracing::debug;

use super::{Document, DocumentStore, StoreError};

/// Configuration for connecting to a document store.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL, e.g. `"https://store.example.com/v1"`.
    pub base_url: String,

    /// Optional bearer token.
    pub token: Option<String>,
}

/// HTTP client for a document store exposing one resource per document.
///
/// - `GET {base}/{collection}/{id}` fetches a document (404 when missing).
/// - `PUT {base}/{collection}/{id}` with `If-None-Match: *` creates one.
/// - `PATCH {base}/{collection}/{id}` with `{ field: value }` replaces a field.
///
/// Collection and id are sent as single percent-encoded path segments.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    base: Url,
    token: Option<String>,
    http: Client,
}

impl HttpDocumentStore {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] when the base URL does not parse or
    /// cannot take path segments.
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let base = Url::parse(&config.base_url)
            .map_err(|error| StoreError::InvalidUrl(format!("{}: {error}", config.base_url)))?;

        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(config.base_url));
        }

        Ok(Self {
            base,
            token: config.token,
            http: Client::new(),
        })
    }

    fn url(&self, collection: &str, id: &str) -> Url {
        let mut url = self.base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection).push(id);
        }

        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn unexpected(operation: &str, response: Response) -> StoreError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    StoreError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    ))
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.url(collection, id);

        debug!(%url, "fetching document");

        let response = self.authorize(self.http.get(url)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.bytes().await?;

                Ok(Some(serde_json::from_slice(&body)?))
            }
            _ => Err(unexpected("get", response).await),
        }
    }

    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<(), StoreError> {
        let url = self.url(collection, id);

        debug!(%url, "creating document");

        let response = self
            .authorize(self.http.put(url))
            .header(IF_NONE_MATCH, "*")
            .json(&document)
            .send()
            .await?;

        match response.status() {
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
                Err(StoreError::AlreadyExists)
            }
            status if status.is_success() => Ok(()),
            _ => Err(unexpected("create", response).await),
        }
    }

    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let url = self.url(collection, id);

        debug!(%url, field, "replacing document field");

        let mut patch = Document::new();
        patch.insert(field.to_string(), value);

        let response = self
            .authorize(self.http.patch(url))
            .json(&patch)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            status if status.is_success() => Ok(()),
            _ => Err(unexpected("set_field", response).await),
        }
    }
}
