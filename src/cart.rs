//! Cart

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::{Deserialize, Serialize};

use crate::{
    items::{
        InvalidItemError, LineItem, MAX_QUANTITY, NewLineItem, ProductId, grown_quantity,
    },
    pricing::{RoundingMode, total_price},
};

/// A single mutation that can be applied to a cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum CartAction {
    /// Add units of a product, merging with an existing line.
    Add(NewLineItem),

    /// One more unit of a product already in the cart.
    Increment(ProductId),

    /// One less unit; the line is removed when it would reach zero.
    Decrement(ProductId),

    /// Remove a product's line entirely.
    Remove(ProductId),

    /// Remove every line.
    Clear,
}

/// Cart
///
/// Line items are kept in insertion order and are unique by product id. The
/// total is never stored; [`Cart::total`] recomputes it from the lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    rounding: RoundingMode,
    currency: &'static Currency,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(iso::INR)
    }
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            rounding: RoundingMode::default(),
            currency,
        }
    }

    /// Create a cart from stored lines.
    ///
    /// Lines sharing a product id are merged by summing their quantities, so
    /// the result always holds unique ids.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidItemError`] when a line fails [`LineItem::validate`]
    /// or merged lines exceed [`MAX_QUANTITY`].
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem>,
        currency: &'static Currency,
    ) -> Result<Self, InvalidItemError> {
        let mut cart = Self::new(currency);
        let mut seen = FxHashMap::default();

        for item in items {
            item.validate()?;

            match seen.get(&item.id).copied() {
                Some(idx) => cart.grow(idx, item.quantity.get())?,
                None => {
                    seen.insert(item.id, cart.items.len());
                    cart.items.push(item);
                }
            }
        }

        Ok(cart)
    }

    /// Use the given rounding mode for totals.
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Add a product to the cart.
    ///
    /// An existing line gains the item's quantity; otherwise a new line is
    /// appended. Returns the new total.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidItemError`] when [`NewLineItem::validate`] fails or
    /// the merged line would exceed [`MAX_QUANTITY`]. The cart is left
    /// untouched in that case.
    pub fn add(&mut self, item: NewLineItem) -> Result<Decimal, InvalidItemError> {
        let quantity = item.validate()?;

        match self.position(item.id) {
            Some(idx) => self.grow(idx, quantity.get())?,
            None => self.items.push(item.into_line_item(quantity)),
        }

        Ok(self.total())
    }

    /// Add one unit to an existing line. Absent ids are ignored, and a line
    /// already holding [`MAX_QUANTITY`] units is left as it is.
    pub fn increment(&mut self, id: ProductId) -> Decimal {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == id)
            && let Ok(quantity) = grown_quantity(id, line.quantity, 1)
        {
            line.quantity = quantity;
        }

        self.total()
    }

    /// Take one unit off an existing line, removing it when it held a single
    /// unit. Absent ids are ignored.
    pub fn decrement(&mut self, id: ProductId) -> Decimal {
        let Some(idx) = self.position(id) else {
            return self.total();
        };

        if let Some(line) = self.items.get_mut(idx) {
            match NonZeroU32::new(line.quantity.get() - 1) {
                Some(quantity) => line.quantity = quantity,
                None => {
                    self.items.remove(idx);
                }
            }
        }

        self.total()
    }

    /// Remove a line regardless of its quantity. Absent ids are ignored.
    pub fn remove(&mut self, id: ProductId) -> Decimal {
        self.items.retain(|line| line.id != id);

        self.total()
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Decimal {
        self.items.clear();

        Decimal::ZERO
    }

    /// Apply a single action, returning the new total.
    ///
    /// # Errors
    ///
    /// Only [`CartAction::Add`] can fail, see [`Cart::add`].
    pub fn apply(&mut self, action: CartAction) -> Result<Decimal, InvalidItemError> {
        match action {
            CartAction::Add(item) => self.add(item),
            CartAction::Increment(id) => Ok(self.increment(id)),
            CartAction::Decrement(id) => Ok(self.decrement(id)),
            CartAction::Remove(id) => Ok(self.remove(id)),
            CartAction::Clear => Ok(self.clear()),
        }
    }

    /// Rounded sum of `price * quantity` over every line.
    pub fn total(&self) -> Decimal {
        total_price(&self.items, self.rounding)
    }

    /// Units of the given product in the cart, zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |line| line.quantity.get())
    }

    /// Look up the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart, returning its lines.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rounding mode used for totals.
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Currency used for display.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|line| line.id == id)
    }

    fn grow(&mut self, idx: usize, units: u32) -> Result<(), InvalidItemError> {
        if let Some(line) = self.items.get_mut(idx) {
            line.quantity = grown_quantity(line.id, line.quantity, units)?;
        }

        Ok(())
    }
}
