//! Cart Config

use std::time::Duration;

use cartwheel::pricing::RoundingMode;
use clap::Args;
use rusty_money::iso::{self, Currency};

use crate::domain::carts::models::CartSettings;

/// Cart pricing settings.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// How cart totals are rounded (nearest, up, down)
    #[arg(long, env = "CART_ROUNDING_MODE", default_value = "nearest", global = true)]
    pub rounding_mode: RoundingMode,

    /// ISO 4217 currency code used to display amounts
    #[arg(
        long,
        env = "CART_CURRENCY",
        default_value = "INR",
        value_parser = parse_currency,
        global = true
    )]
    pub currency: &'static Currency,

    /// Deadline for each remote call, in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value_t = 10_000, global = true)]
    pub request_timeout_ms: u64,
}

impl CartConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn settings(&self) -> CartSettings {
        CartSettings {
            rounding: self.rounding_mode,
            currency: self.currency,
            request_timeout: self.request_timeout(),
        }
    }
}

/// Look up an ISO currency by code, case-insensitively.
///
/// # Errors
///
/// Returns a message naming the code when it is not an ISO currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, String> {
    iso::find(&code.to_ascii_uppercase()).ok_or_else(|| format!("unknown currency code {code}"))
}
