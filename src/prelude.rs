//! Cartwheel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction},
    items::{InvalidItemError, LineItem, NewLineItem, ProductId},
    pricing::{RoundingMode, UnknownRoundingMode, total_price},
    products::Product,
    summary::{SummaryError, to_money, write_to},
};
