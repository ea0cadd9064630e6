//! Carts service errors.

use cartwheel::items::InvalidItemError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("remote store unavailable")]
    RemoteUnavailable(#[source] StoreError),

    #[error(transparent)]
    InvalidItem(#[from] InvalidItemError),

    #[error("malformed cart document")]
    MalformedDocument(#[source] serde_json::Error),

    #[error("stored cart holds an invalid line")]
    InvalidStoredLine(#[source] InvalidItemError),
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::UserNotFound,
            StoreError::Malformed(source) => Self::MalformedDocument(source),
            StoreError::AlreadyExists
            | StoreError::Timeout(_)
            | StoreError::Http(_)
            | StoreError::UnexpectedResponse(_)
            | StoreError::InvalidUrl(_) => Self::RemoteUnavailable(error),
        }
    }
}
