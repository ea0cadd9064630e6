//! Catalog errors.

use std::time::Duration;

use cartwheel::items::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    UnexpectedResponse(String),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("catalog request timed out after {0:?}")]
    Timeout(Duration),
}
