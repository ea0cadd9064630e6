//! Users service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("malformed user document")]
    MalformedDocument(#[source] serde_json::Error),

    #[error("remote store unavailable")]
    RemoteUnavailable(#[source] StoreError),
}

impl From<StoreError> for UsersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            StoreError::Malformed(source) => Self::MalformedDocument(source),
            StoreError::Timeout(_)
            | StoreError::Http(_)
            | StoreError::UnexpectedResponse(_)
            | StoreError::InvalidUrl(_) => Self::RemoteUnavailable(error),
        }
    }
}
