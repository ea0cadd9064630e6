//! Catalog service.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use cartwheel::{items::ProductId, products::Product};
use mockall::automock;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::CatalogError;

/// Default public product catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";

/// Configuration for the HTTP catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; products are read from `{base_url}/products`.
    pub base_url: String,

    /// Deadline for each catalog request.
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ProductsPage {
    products: Vec<Product>,
}

/// Catalog client for a `dummyjson`-style products API.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    config: CatalogConfig,
    http: Client,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn within_deadline<T, F>(&self, call: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        let deadline = self.config.request_timeout;

        tokio::time::timeout(deadline, call)
            .await
            .map_err(|_elapsed| CatalogError::Timeout(deadline))?
    }
}

async fn unexpected(response: Response) -> CatalogError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    CatalogError::UnexpectedResponse(format!(
        "catalog request failed with status {status}: {text}"
    ))
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    #[instrument(skip(self), err)]
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.url("products");

        self.within_deadline(async {
            let response = self.http.get(&url).send().await?;

            if !response.status().is_success() {
                return Err(unexpected(response).await);
            }

            let page: ProductsPage = response.json().await?;

            debug!(count = page.products.len(), "fetched products");

            Ok(page.products)
        })
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.url(&format!("products/{id}"));

        self.within_deadline(async {
            let response = self.http.get(&url).send().await?;

            match response.status() {
                StatusCode::NOT_FOUND => Err(CatalogError::NotFound(id)),
                status if status.is_success() => Ok(response.json().await?),
                _ => Err(unexpected(response).await),
            }
        })
        .await
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List the products on offer.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
