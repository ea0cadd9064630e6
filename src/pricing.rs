//! Pricing

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::LineItem;

/// How a cart total is rounded to a whole amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Nearest whole amount, halves rounded away from zero.
    #[default]
    Nearest,

    /// Next whole amount up.
    Up,

    /// Next whole amount down.
    Down,
}

impl RoundingMode {
    /// Round an amount to a whole number using this mode.
    pub fn round(self, amount: Decimal) -> Decimal {
        match self {
            Self::Nearest => {
                amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            Self::Up => amount.ceil(),
            Self::Down => amount.floor(),
        }
    }

    /// The configuration name of this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// An unrecognised rounding mode name.
#[derive(Debug, Error, PartialEq)]
#[error("unknown rounding mode `{0}`, expected nearest, up or down")]
pub struct UnknownRoundingMode(pub String);

impl FromStr for RoundingMode {
    type Err = UnknownRoundingMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(UnknownRoundingMode(value.to_string())),
        }
    }
}

/// Calculates the rounded total price of a list of line items.
///
/// An empty list totals zero. The sum saturates at [`Decimal::MAX`].
pub fn total_price(items: &[LineItem], mode: RoundingMode) -> Decimal {
    let sum = items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()));

    mode.round(sum)
}
