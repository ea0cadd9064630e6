//! Users service.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    domain::users::{
        errors::UsersServiceError,
        models::{Identity, NewUser, USERS_COLLECTION, User, UserId},
    },
    store::{Document, DocumentStore, with_deadline},
};

#[derive(Clone)]
pub struct StoreUsersService {
    store: Arc<dyn DocumentStore>,
    request_timeout: Duration,
}

impl fmt::Debug for StoreUsersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreUsersService")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl StoreUsersService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, request_timeout: Duration) -> Self {
        Self {
            store,
            request_timeout,
        }
    }
}

/// Decode a stored user document.
///
/// Documents written before the `id` field existed carry the user id only in
/// their key, so it is filled in from there.
fn decode_user(user: &UserId, mut document: Document) -> Result<User, serde_json::Error> {
    document
        .entry("id")
        .or_insert_with(|| Value::String(user.to_string()));

    serde_json::from_value(Value::Object(document))
}

#[async_trait]
impl UsersService for StoreUsersService {
    #[instrument(skip(self), fields(user = %user.id), err)]
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let record = User {
            id: user.id,
            email: user.email,
            provider: Some(user.provider),
            cart: Vec::new(),
            created_at: Some(Timestamp::now()),
        };

        let document: Document = serde_json::to_value(&record)
            .and_then(serde_json::from_value)
            .map_err(UsersServiceError::MalformedDocument)?;

        with_deadline(
            self.request_timeout,
            self.store
                .create(USERS_COLLECTION, record.id.as_str(), document),
        )
        .await?;

        info!("created user with an empty cart");

        Ok(record)
    }

    #[instrument(skip(self), fields(user = %user), err)]
    async fn get_user(&self, user: &UserId) -> Result<User, UsersServiceError> {
        let document = with_deadline(
            self.request_timeout,
            self.store.get(USERS_COLLECTION, user.as_str()),
        )
        .await?
        .ok_or(UsersServiceError::NotFound)?;

        decode_user(user, document).map_err(UsersServiceError::MalformedDocument)
    }

    #[instrument(skip(self, identity), fields(user = %identity.user_id), err)]
    async fn ensure_user(&self, identity: &Identity) -> Result<User, UsersServiceError> {
        match self.get_user(&identity.user_id).await {
            Err(UsersServiceError::NotFound) => {}
            found => return found,
        }

        match self.create_user(NewUser::from(identity)).await {
            // Another session created it between our read and write.
            Err(UsersServiceError::AlreadyExists) => self.get_user(&identity.user_id).await,
            created => created,
        }
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create a user record with an empty cart (signup).
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve a single user record.
    async fn get_user(&self, user: &UserId) -> Result<User, UsersServiceError>;

    /// Return the user's record, creating it with an empty cart on first sign-in.
    async fn ensure_user(&self, identity: &Identity) -> Result<User, UsersServiceError>;
}
