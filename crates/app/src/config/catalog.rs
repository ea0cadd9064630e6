//! Catalog Config

use clap::Args;

use crate::catalog::DEFAULT_CATALOG_URL;

/// Product catalog settings.
#[derive(Debug, Args)]
pub struct CatalogUrlConfig {
    /// Base URL of the product catalog
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_CATALOG_URL, global = true)]
    pub catalog_url: String,
}
