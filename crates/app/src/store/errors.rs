//! Document store errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("document already exists")]
    AlreadyExists,

    #[error("store request timed out after {0:?}")]
    Timeout(Duration),

    #[error("store unavailable")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from store: {0}")]
    UnexpectedResponse(String),

    #[error("malformed document")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid store URL: {0}")]
    InvalidUrl(String),
}
