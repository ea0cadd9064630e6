//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{CatalogConfig, CatalogService, HttpCatalogService},
    config::{AppConfig, StoreKind},
    domain::{
        carts::{CartsService, StoreCartsService, models::CartSettings},
        users::{StoreUsersService, UsersService},
    },
    store::{
        DocumentStore, HttpDocumentStore, HttpStoreConfig, MemoryDocumentStore, StoreError,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("--store-url (DOCUMENT_STORE_URL) is required for the http store")]
    MissingStoreUrl,

    #[error(transparent)]
    InvalidStoreUrl(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppContext {
    pub settings: CartSettings,
    pub users: Arc<dyn UsersService>,
    pub carts: Arc<dyn CartsService>,
    pub catalog: Arc<dyn CatalogService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the http store is selected without a usable URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let settings = config.cart.settings();

        let store: Arc<dyn DocumentStore> = match config.store.kind {
            StoreKind::Memory => Arc::new(MemoryDocumentStore::new()),
            StoreKind::Http => {
                let base_url = config
                    .store
                    .store_url
                    .clone()
                    .ok_or(AppInitError::MissingStoreUrl)?;

                Arc::new(HttpDocumentStore::new(HttpStoreConfig {
                    base_url,
                    token: config.store.store_token.clone(),
                })?)
            }
        };

        info!(
            store = ?config.store.kind,
            rounding = settings.rounding.as_str(),
            "store ready"
        );

        let catalog = HttpCatalogService::new(CatalogConfig {
            base_url: config.catalog.catalog_url.clone(),
            request_timeout: settings.request_timeout,
        });

        Ok(Self::new(store, Arc::new(catalog), settings))
    }

    /// Build application context around an existing store and catalog.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        catalog: Arc<dyn CatalogService>,
        settings: CartSettings,
    ) -> Self {
        Self {
            users: Arc::new(StoreUsersService::new(
                store.clone(),
                settings.request_timeout,
            )),
            carts: Arc::new(StoreCartsService::new(store, settings)),
            catalog,
            settings,
        }
    }
}
