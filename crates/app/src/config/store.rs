//! Store Config

use clap::Args;

/// Which document store backs user records.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum StoreKind {
    /// Process-local store; nothing outlives the command.
    #[default]
    Memory,

    /// Remote JSON-over-HTTP document store.
    Http,
}

/// Document store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Document store backend (memory, http)
    #[arg(
        id = "store",
        long = "store",
        env = "CART_STORE",
        value_enum,
        default_value_t = StoreKind::Memory,
        global = true
    )]
    pub kind: StoreKind,

    /// Base URL of the HTTP document store
    #[arg(long, env = "DOCUMENT_STORE_URL", global = true)]
    pub store_url: Option<String>,

    /// Bearer token for the HTTP document store
    #[arg(long, env = "DOCUMENT_STORE_TOKEN", hide_env_values = true, global = true)]
    pub store_token: Option<String>,
}
