//! Carts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use cartwheel::{
    cart::{Cart, CartAction},
    items::{LineItem, NewLineItem, ProductId},
};
use mockall::automock;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    domain::{
        carts::{errors::CartsServiceError, models::CartSettings},
        users::models::{CART_FIELD, USERS_COLLECTION, UserId},
    },
    store::{DocumentStore, with_deadline},
};

#[derive(Clone)]
pub struct StoreCartsService {
    store: Arc<dyn DocumentStore>,
    settings: CartSettings,
}

impl fmt::Debug for StoreCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCartsService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, settings: CartSettings) -> Self {
        Self { store, settings }
    }

    #[must_use]
    pub fn settings(&self) -> CartSettings {
        self.settings
    }

    fn build_cart(&self, items: Vec<LineItem>) -> Result<Cart, CartsServiceError> {
        let cart = Cart::with_items(items, self.settings.currency)
            .map_err(CartsServiceError::InvalidStoredLine)?;

        Ok(cart.with_rounding(self.settings.rounding))
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    #[instrument(skip(self), fields(user = %user), err)]
    async fn load_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        let mut document = with_deadline(
            self.settings.request_timeout,
            self.store.get(USERS_COLLECTION, user.as_str()),
        )
        .await?
        .ok_or(CartsServiceError::UserNotFound)?;

        let items: Vec<LineItem> = match document.remove(CART_FIELD) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => {
                serde_json::from_value(value).map_err(CartsServiceError::MalformedDocument)?
            }
        };

        debug!(lines = items.len(), "loaded cart");

        self.build_cart(items)
    }

    #[instrument(skip(self, cart), fields(user = %user, lines = cart.len()), err)]
    async fn save_cart(&self, user: &UserId, cart: &Cart) -> Result<(), CartsServiceError> {
        let value =
            serde_json::to_value(cart.items()).map_err(CartsServiceError::MalformedDocument)?;

        with_deadline(
            self.settings.request_timeout,
            self.store
                .set_field(USERS_COLLECTION, user.as_str(), CART_FIELD, value),
        )
        .await?;

        Ok(())
    }

    #[instrument(skip(self), fields(user = %user), err)]
    async fn mutate(&self, user: &UserId, action: CartAction) -> Result<Cart, CartsServiceError> {
        let mut cart = self.load_cart(user).await?;

        let total = cart.apply(action)?;

        self.save_cart(user, &cart).await?;

        debug!(%total, "saved cart");

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Load the user's cart, empty when the user has never stored one.
    async fn load_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError>;

    /// Overwrite the user's stored cart. The last writer wins.
    async fn save_cart(&self, user: &UserId, cart: &Cart) -> Result<(), CartsServiceError>;

    /// Load, apply one action, and save, returning the saved cart.
    async fn mutate(&self, user: &UserId, action: CartAction) -> Result<Cart, CartsServiceError>;

    /// Add an item to the user's cart.
    async fn add_item(&self, user: &UserId, item: NewLineItem) -> Result<Cart, CartsServiceError> {
        self.mutate(user, CartAction::Add(item)).await
    }

    /// Add one unit of a product already in the user's cart.
    async fn increment_item(
        &self,
        user: &UserId,
        id: ProductId,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(user, CartAction::Increment(id)).await
    }

    /// Remove one unit of a product, dropping the line at zero.
    async fn decrement_item(
        &self,
        user: &UserId,
        id: ProductId,
    ) -> Result<Cart, CartsServiceError> {
        self.mutate(user, CartAction::Decrement(id)).await
    }

    /// Remove a product's line from the user's cart.
    async fn remove_item(&self, user: &UserId, id: ProductId) -> Result<Cart, CartsServiceError> {
        self.mutate(user, CartAction::Remove(id)).await
    }

    /// Empty the user's cart.
    async fn clear_cart(&self, user: &UserId) -> Result<Cart, CartsServiceError> {
        self.mutate(user, CartAction::Clear).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cartwheel::{items::InvalidItemError, pricing::RoundingMode};
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        store::{MockDocumentStore, StoreError},
        test::{
            TestContext,
            helpers::{SlowDocumentStore, item},
        },
    };

    use super::*;

    #[test]
    fn debug_shows_settings_but_not_the_store() {
        let carts = StoreCartsService::new(
            Arc::new(MockDocumentStore::new()),
            CartSettings::default(),
        );

        let debug = format!("{carts:?}");

        assert!(debug.starts_with("StoreCartsService {"), "{debug}");
        assert!(debug.contains("settings"), "{debug}");
        assert!(debug.ends_with(".. }"), "{debug}");
    }

    #[tokio::test]
    async fn load_cart_for_new_user_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.load_cart(&ctx.user).await?;

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn load_cart_without_cart_field_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_bare_user("old-account").await?;

        let cart = ctx.carts.load_cart(&user).await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn load_cart_unknown_user_returns_user_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.load_cart(&UserId::new("ghost")).await;

        assert!(
            matches!(result, Err(CartsServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn load_cart_with_malformed_lines_is_reported() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store
            .set_field(USERS_COLLECTION, ctx.user.as_str(), CART_FIELD, json!("oops"))
            .await?;

        let result = ctx.carts.load_cart(&ctx.user).await;

        assert!(
            matches!(result, Err(CartsServiceError::MalformedDocument(_))),
            "expected MalformedDocument, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn load_cart_rejects_invalid_stored_lines() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store
            .set_field(
                USERS_COLLECTION,
                ctx.user.as_str(),
                CART_FIELD,
                json!([{ "id": 1, "price": -5.0, "quantity": 1 }]),
            )
            .await?;

        let result = ctx.carts.load_cart(&ctx.user).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InvalidStoredLine(InvalidItemError::NegativePrice(..)))
            ),
            "expected InvalidStoredLine, got {result:?}"
        );

        // A mutation on top of the bad line is refused rather than saved.
        let result = ctx.carts.add_item(&ctx.user, item(2, "10")).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidStoredLine(_))),
            "expected InvalidStoredLine, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn load_cart_applies_settings() -> TestResult {
        let ctx = TestContext::with_rounding(RoundingMode::Down).await;

        let cart = ctx.carts.add_item(&ctx.user, item(1, "100.50")).await?;

        assert_eq!(cart.rounding(), RoundingMode::Down);
        assert_eq!(cart.total(), Decimal::from(100));

        let reloaded = ctx.carts.load_cart(&ctx.user).await?;

        assert_eq!(reloaded, cart);

        Ok(())
    }

    #[tokio::test]
    async fn save_cart_unknown_user_returns_user_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let mut cart = Cart::default();
        cart.add(item(1, "10"))?;

        let result = ctx.carts.save_cart(&UserId::new("ghost"), &cart).await;

        assert!(
            matches!(result, Err(CartsServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );
        assert!(ctx.store.get(USERS_COLLECTION, "ghost").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn save_cart_replaces_whole_field() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.add_item(&ctx.user, item(1, "10")).await?;
        ctx.carts.add_item(&ctx.user, item(2, "20")).await?;

        let mut replacement = Cart::default();
        replacement.add(item(3, "30"))?;

        ctx.carts.save_cart(&ctx.user, &replacement).await?;

        let cart = ctx.carts.load_cart(&ctx.user).await?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(3)), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_flow_persists_every_step() -> TestResult {
        let ctx = TestContext::new().await;
        let one = ProductId::new(1);

        let cart = ctx.carts.add_item(&ctx.user, item(1, "100")).await?;
        assert_eq!(cart.total(), Decimal::from(100));

        let cart = ctx.carts.increment_item(&ctx.user, one).await?;
        assert_eq!(cart.total(), Decimal::from(200));

        let cart = ctx.carts.decrement_item(&ctx.user, one).await?;
        assert_eq!(cart.quantity_of(one), 1);

        let cart = ctx.carts.decrement_item(&ctx.user, one).await?;
        assert!(cart.is_empty());

        ctx.carts.add_item(&ctx.user, item(2, "125.50")).await?;
        let cart = ctx.carts.load_cart(&ctx.user).await?;
        assert_eq!(cart.total(), Decimal::from(126));

        let cart = ctx.carts.remove_item(&ctx.user, ProductId::new(2)).await?;
        assert!(cart.is_empty());

        ctx.carts.add_item(&ctx.user, item(3, "5")).await?;
        let cart = ctx.carts.clear_cart(&ctx.user).await?;
        assert!(cart.is_empty());
        assert!(ctx.carts.load_cart(&ctx.user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_item_leaves_stored_cart_untouched() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.add_item(&ctx.user, item(1, "10")).await?;

        let result = ctx.carts.add_item(&ctx.user, item(2, "-1")).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidItem(_))),
            "expected InvalidItem, got {result:?}"
        );
        assert_eq!(ctx.carts.load_cart(&ctx.user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn absent_product_mutations_are_noops() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.add_item(&ctx.user, item(1, "10")).await?;

        let cart = ctx.carts.increment_item(&ctx.user, ProductId::new(9)).await?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Decimal::from(10));

        Ok(())
    }

    #[tokio::test]
    async fn stale_read_modify_write_loses_an_update() -> TestResult {
        let ctx = TestContext::new().await;

        // Two sessions read the same (empty) cart before either writes.
        let mut first = ctx.carts.load_cart(&ctx.user).await?;
        let mut second = ctx.carts.load_cart(&ctx.user).await?;

        first.add(item(1, "10"))?;
        second.add(item(2, "20"))?;

        ctx.carts.save_cart(&ctx.user, &first).await?;
        ctx.carts.save_cart(&ctx.user, &second).await?;

        let stored = ctx.carts.load_cart(&ctx.user).await?;

        assert_eq!(stored, second);
        assert_eq!(stored.quantity_of(ProductId::new(1)), 0);

        Ok(())
    }

    #[tokio::test]
    async fn store_failures_surface_as_remote_unavailable() {
        let mut store = MockDocumentStore::new();

        store.expect_get().returning(|_, _| {
            Err(StoreError::UnexpectedResponse("status 502".to_string()))
        });

        let carts = StoreCartsService::new(Arc::new(store), CartSettings::default());

        let result = carts.load_cart(&UserId::new("u1")).await;

        assert!(
            matches!(result, Err(CartsServiceError::RemoteUnavailable(_))),
            "expected RemoteUnavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_write_is_reported_after_successful_read() -> TestResult {
        let mut store = MockDocumentStore::new();

        store.expect_get().returning(|_, _| {
            Ok(Some(serde_json::from_value(json!({ "id": "u1", "cart": [] }))?))
        });
        store
            .expect_set_field()
            .times(1)
            .returning(|_, _, _, _| Err(StoreError::UnexpectedResponse("status 500".to_string())));

        let carts = StoreCartsService::new(Arc::new(store), CartSettings::default());

        let result = carts.add_item(&UserId::new("u1"), item(1, "10")).await;

        assert!(
            matches!(result, Err(CartsServiceError::RemoteUnavailable(_))),
            "expected RemoteUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_times_out_as_remote_unavailable() -> TestResult {
        let ctx = TestContext::new().await;

        let slow = SlowDocumentStore::new(ctx.store.clone(), Duration::from_secs(30));
        let carts = StoreCartsService::new(
            Arc::new(slow),
            CartSettings {
                request_timeout: Duration::from_secs(10),
                ..CartSettings::default()
            },
        );

        let result = carts.load_cart(&ctx.user).await;

        let Err(CartsServiceError::RemoteUnavailable(source)) = result else {
            return Err(format!("expected RemoteUnavailable, got {result:?}").into());
        };

        assert!(
            matches!(source, StoreError::Timeout(d) if d == Duration::from_secs(10)),
            "{source:?}"
        );

        Ok(())
    }
}
