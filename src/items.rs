//! Items

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::NonZeroU32,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque product identifier, unique within a cart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Highest accepted unit price.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Most units a single line may hold.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Errors raised when an item offered to a cart is malformed.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidItemError {
    /// The unit price is below zero (product id, price).
    #[error("product {0} has negative price {1}")]
    NegativePrice(ProductId, Decimal),

    /// The unit price is above [`MAX_UNIT_PRICE`] (product id, price).
    #[error("product {0} has price {1} above the limit of {max}", max = MAX_UNIT_PRICE)]
    PriceTooLarge(ProductId, Decimal),

    /// An explicit quantity of zero was supplied.
    #[error("product {0} was added with a quantity of zero")]
    ZeroQuantity(ProductId),

    /// The line would hold more than [`MAX_QUANTITY`] units.
    #[error("product {0} would exceed the limit of {max} units", max = MAX_QUANTITY)]
    QuantityTooLarge(ProductId),
}

fn check_price(id: ProductId, price: Decimal) -> Result<(), InvalidItemError> {
    if price < Decimal::ZERO {
        return Err(InvalidItemError::NegativePrice(id, price));
    }

    if price > MAX_UNIT_PRICE {
        return Err(InvalidItemError::PriceTooLarge(id, price));
    }

    Ok(())
}

/// Quantity of a line after gaining `units`, if it stays within [`MAX_QUANTITY`].
pub(crate) fn grown_quantity(
    id: ProductId,
    current: NonZeroU32,
    units: u32,
) -> Result<NonZeroU32, InvalidItemError> {
    current
        .checked_add(units)
        .filter(|quantity| quantity.get() <= MAX_QUANTITY)
        .ok_or(InvalidItemError::QuantityTooLarge(id))
}

/// A line in a cart: one product and how many units of it were selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier
    pub id: ProductId,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Display images
    #[serde(default)]
    pub images: Vec<String>,

    /// Units selected, never zero
    #[serde(alias = "count")]
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Price of all units on this line, before rounding.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity.get()))
    }

    /// Check a stored line against the same bounds as [`NewLineItem::validate`].
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidItemError`] for a price outside `0..=MAX_UNIT_PRICE`
    /// or more than [`MAX_QUANTITY`] units.
    pub fn validate(&self) -> Result<(), InvalidItemError> {
        check_price(self.id, self.price)?;

        if self.quantity.get() > MAX_QUANTITY {
            return Err(InvalidItemError::QuantityTooLarge(self.id));
        }

        Ok(())
    }
}

/// An item offered to [`Cart::add`](crate::cart::Cart::add), validated on insertion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    /// Product identifier
    pub id: ProductId,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Display images
    #[serde(default)]
    pub images: Vec<String>,

    /// Units to add
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl NewLineItem {
    /// A single unit of the given product at the given price.
    pub fn new(id: impl Into<ProductId>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
            title: String::new(),
            images: Vec::new(),
            quantity: default_quantity(),
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the display images.
    #[must_use]
    pub fn with_images(mut self, images: impl Into<Vec<String>>) -> Self {
        self.images = images.into();
        self
    }

    /// Set an explicit number of units.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Check the price and quantity, returning the quantity as a non-zero count.
    ///
    /// # Errors
    ///
    /// - [`InvalidItemError::NegativePrice`]: the unit price is below zero.
    /// - [`InvalidItemError::PriceTooLarge`]: the unit price is above [`MAX_UNIT_PRICE`].
    /// - [`InvalidItemError::ZeroQuantity`]: the quantity is zero.
    /// - [`InvalidItemError::QuantityTooLarge`]: the quantity is above [`MAX_QUANTITY`].
    pub fn validate(&self) -> Result<NonZeroU32, InvalidItemError> {
        check_price(self.id, self.price)?;

        let quantity =
            NonZeroU32::new(self.quantity).ok_or(InvalidItemError::ZeroQuantity(self.id))?;

        if quantity.get() > MAX_QUANTITY {
            return Err(InvalidItemError::QuantityTooLarge(self.id));
        }

        Ok(quantity)
    }

    pub(crate) fn into_line_item(self, quantity: NonZeroU32) -> LineItem {
        LineItem {
            id: self.id,
            price: self.price,
            title: self.title,
            images: self.images,
            quantity,
        }
    }
}
