//! Cart summary table

use std::io;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::Cart;

/// Errors that can occur when writing a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount does not fit in the currency's minor units.
    #[error("amount {0} cannot be represented in {1}")]
    Overflow(Decimal, &'static str),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Convert a decimal amount to money in the given currency.
///
/// # Errors
///
/// Returns [`SummaryError::Overflow`] if the amount does not fit in `i64` minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, SummaryError> {
    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or(SummaryError::Overflow(amount, currency.iso_alpha_code))?;

    let minor = amount
        .checked_mul(Decimal::from(scale))
        .map(|value| value.round())
        .and_then(|value| value.to_i64())
        .ok_or(SummaryError::Overflow(amount, currency.iso_alpha_code))?;

    Ok(Money::from_minor(minor, currency))
}

/// Writes the cart as a table of lines followed by the rounded total.
///
/// # Errors
///
/// Returns an error if an amount cannot be formatted or the output cannot be written.
pub fn write_to(cart: &Cart, mut out: impl io::Write) -> Result<(), SummaryError> {
    let currency = cart.currency();

    if cart.is_empty() {
        writeln!(out, "Your cart is empty").map_err(|_err| SummaryError::IO)?;
    } else {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Price", "Qty", "Line total"]);

        for line in cart.items() {
            builder.push_record([
                line.title.clone(),
                to_money(line.price, currency)?.to_string(),
                line.quantity.to_string(),
                to_money(line.line_total(), currency)?.to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| SummaryError::IO)?;
    }

    let total = to_money(cart.total(), currency)?;

    writeln!(out, "Total: {total} ({} rounding)", cart.rounding().as_str())
        .map_err(|_err| SummaryError::IO)
}
