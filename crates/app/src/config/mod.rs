//! Application configuration
//!
//! Every setting can be given as a flag or an environment variable; a `.env`
//! file in the working directory is read first.

use clap::Args;

mod cart;
mod catalog;
mod logging;
mod store;

pub use cart::{CartConfig, parse_currency};
pub use catalog::CatalogUrlConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use store::{StoreConfig, StoreKind};

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Cart pricing and store deadline settings.
    #[command(flatten)]
    pub cart: CartConfig,

    /// Document store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogUrlConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
