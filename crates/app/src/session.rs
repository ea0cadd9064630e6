//! Signed-in session
//!
//! A [`Session`] is what a sign-in produces: the user it acts for, a handle to
//! the carts service and a local copy of the cart. The remote cart is always
//! authoritative. The local copy is replaced by the result of every remote
//! mutation, dropped when one fails, and discarded on logout.

use std::{fmt, sync::Arc};

use cartwheel::{
    cart::{Cart, CartAction},
    items::{NewLineItem, ProductId},
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    carts::{CartsService, CartsServiceError},
    users::{
        UsersService, UsersServiceError,
        models::{Identity, UserId},
    },
};

pub struct Session {
    uuid: Uuid,
    user: UserId,
    carts: Arc<dyn CartsService>,
    cache: Option<Cart>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("uuid", &self.uuid)
            .field("user", &self.user)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session for an already resolved user.
    pub fn new(user: UserId, carts: Arc<dyn CartsService>) -> Self {
        let uuid = Uuid::now_v7();

        info!(session = %uuid, %user, "session started");

        Self {
            uuid,
            user,
            carts,
            cache: None,
        }
    }

    /// Sign in with a resolved identity, creating the user record on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`UsersServiceError`] when the user record cannot be read or created.
    pub async fn sign_in(
        identity: &Identity,
        users: &dyn UsersService,
        carts: Arc<dyn CartsService>,
    ) -> Result<Self, UsersServiceError> {
        let user = users.ensure_user(identity).await?;

        Ok(Self::new(user.id, carts))
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// The locally cached cart, if one has been loaded.
    pub fn cached(&self) -> Option<&Cart> {
        self.cache.as_ref()
    }

    /// The user's cart, loaded from the store when nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns a [`CartsServiceError`] when the cart has to be loaded and that fails.
    pub async fn cart(&mut self) -> Result<&Cart, CartsServiceError> {
        let cart = match self.cache.take() {
            Some(cart) => cart,
            None => self.carts.load_cart(&self.user).await?,
        };

        Ok(self.cache.insert(cart))
    }

    /// Drop the cached cart and load it again.
    ///
    /// # Errors
    ///
    /// Returns a [`CartsServiceError`] when loading fails; the cache stays empty.
    pub async fn refresh(&mut self) -> Result<&Cart, CartsServiceError> {
        self.cache = None;
        self.cart().await
    }

    /// Apply an action remotely and cache the stored result.
    ///
    /// # Errors
    ///
    /// Returns a [`CartsServiceError`] when the remote mutation fails. The
    /// cache is dropped so the next read goes back to the store.
    #[instrument(skip(self), fields(session = %self.uuid, user = %self.user))]
    pub async fn apply(&mut self, action: CartAction) -> Result<&Cart, CartsServiceError> {
        self.cache = None;

        match self.carts.mutate(&self.user, action).await {
            Ok(cart) => Ok(self.cache.insert(cart)),
            Err(error) => {
                warn!(%error, "cart mutation failed");
                Err(error)
            }
        }
    }

    /// Add an item to the cart.
    ///
    /// # Errors
    ///
    /// See [`Session::apply`].
    pub async fn add(&mut self, item: NewLineItem) -> Result<&Cart, CartsServiceError> {
        self.apply(CartAction::Add(item)).await
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// See [`Session::apply`].
    pub async fn increment(&mut self, id: ProductId) -> Result<&Cart, CartsServiceError> {
        self.apply(CartAction::Increment(id)).await
    }

    /// Remove one unit of a product.
    ///
    /// # Errors
    ///
    /// See [`Session::apply`].
    pub async fn decrement(&mut self, id: ProductId) -> Result<&Cart, CartsServiceError> {
        self.apply(CartAction::Decrement(id)).await
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// See [`Session::apply`].
    pub async fn remove(&mut self, id: ProductId) -> Result<&Cart, CartsServiceError> {
        self.apply(CartAction::Remove(id)).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// See [`Session::apply`].
    pub async fn clear(&mut self) -> Result<&Cart, CartsServiceError> {
        self.apply(CartAction::Clear).await
    }

    /// End the session, discarding the cached cart. The stored cart is kept.
    pub fn logout(self) -> UserId {
        info!(session = %self.uuid, user = %self.user, "session ended");

        self.user
    }
}
