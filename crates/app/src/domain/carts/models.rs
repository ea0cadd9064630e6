//! Cart Models

use std::time::Duration;

use cartwheel::pricing::RoundingMode;
use rusty_money::iso::{self, Currency};

/// Default deadline for a single store call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How remote carts are priced and how long store calls may take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSettings {
    pub rounding: RoundingMode,
    pub currency: &'static Currency,
    pub request_timeout: Duration,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            currency: iso::INR,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
